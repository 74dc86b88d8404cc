//! Report kinds and patient metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

/// Kind of report a user can ask for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// X-ray image interpretation
    Xray,
    /// CT scan image interpretation
    CtScan,
    /// Ultrasound image interpretation
    Ultrasound,
    /// Structured analysis of an existing report's text
    ReportAnalysis,
}

impl ReportKind {
    pub const ALL: [Self; 4] = [Self::Xray, Self::CtScan, Self::Ultrasound, Self::ReportAnalysis];

    /// Stable identifier used in URLs and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xray => "xray",
            Self::CtScan => "ct_scan",
            Self::Ultrasound => "ultrasound",
            Self::ReportAnalysis => "report_analysis",
        }
    }

    /// Title printed at the top of exported documents.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Xray => "X-ray Analysis",
            Self::CtScan => "CT Scan Analysis",
            Self::Ultrasound => "Ultrasound Analysis",
            Self::ReportAnalysis => "Medical Report Analysis",
        }
    }

    pub const fn requires_image(self) -> bool {
        !matches!(self, Self::ReportAnalysis)
    }

    /// Model tried first for this kind.
    pub const fn preferred_model(self) -> &'static str {
        match self {
            Self::CtScan => "gemini-2.0-flash-lite",
            Self::Xray | Self::Ultrasound | Self::ReportAnalysis => "gemini-1.5-flash",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "xray" | "x_ray" => Ok(Self::Xray),
            "ct" | "ct_scan" => Ok(Self::CtScan),
            "ultrasound" => Ok(Self::Ultrasound),
            "report_analysis" | "analysis" => Ok(Self::ReportAnalysis),
            _ => Err(ReportError::UnknownKind { kind: s.to_string() }),
        }
    }
}

/// File format of an exported document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    #[serde(alias = "txt")]
    Text,
    Pdf,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown export format '{}' (expected text or pdf)", other)),
        }
    }
}

/// Optional patient details printed on exported reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referring_physician: Option<String>,
}

impl PatientInfo {
    /// Labelled, non-blank fields in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Patient ID", &self.patient_id),
            ("Age", &self.age),
            ("Gender", &self.gender),
            ("Referring Physician", &self.referring_physician),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(|v| (label, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Patient preferences that steer hospital recommendations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarePreferences {
    /// Free-form budget band, e.g. "Economy" or "Premium"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Urgent case; favours hospitals with emergency care
    #[serde(default)]
    pub emergency: bool,
}

impl CarePreferences {
    pub fn budget_or_default(&self) -> &str {
        self.budget.as_deref().map(str::trim).filter(|b| !b.is_empty()).unwrap_or("Not provided")
    }
}
