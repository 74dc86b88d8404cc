//! Hospital recommendations built on top of a report analysis.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use medinsight_types::{CarePreferences, ExportFormat, PatientInfo};

use super::document::DISCLAIMER;
use super::pdf::PdfBuilder;
use crate::error::AppResult;

const TITLE: &str = "Hospital Recommendation Report";
const SUBTITLE: &str = "Based on AI Medical Report Analysis";

/// Caller input for the analyse-then-recommend flow.
///
/// `analysis` short-circuits the first step when the caller already holds one.
#[derive(Debug, Clone, Default)]
pub struct RecommendationInput {
    pub report_text: Option<String>,
    pub analysis: Option<String>,
    pub patient: PatientInfo,
    pub preferences: CarePreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HospitalRecommendation {
    pub analysis: String,
    pub recommendations: String,
    #[serde(default)]
    pub patient: PatientInfo,
    #[serde(default)]
    pub preferences: CarePreferences,
    pub generated_at: NaiveDateTime,
}

impl HospitalRecommendation {
    pub fn title(&self) -> &'static str {
        TITLE
    }

    /// `hospital_recommendation_20240131_142501.pdf` style name.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "hospital_recommendation_{}.{}",
            self.generated_at.format("%Y%m%d_%H%M%S"),
            extension.trim_start_matches('.')
        )
    }

    fn patient_lines(&self) -> Vec<(&'static str, String)> {
        let emergency = if self.preferences.emergency { "Yes" } else { "No" };
        let mut lines: Vec<(&'static str, String)> = self
            .patient
            .entries()
            .into_iter()
            .map(|(label, value)| (label, value.to_string()))
            .collect();
        lines.push(("Budget Preference", self.preferences.budget_or_default().to_string()));
        lines.push(("Emergency Case", emergency.to_string()));
        lines
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n{}\n{}\n\n", TITLE, SUBTITLE, "=".repeat(TITLE.len()));

        out.push_str("PATIENT INFORMATION\n");
        for (label, value) in self.patient_lines() {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        out.push_str(&format!(
            "Generated on: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        out.push_str("MEDICAL REPORT ANALYSIS\n\n");
        out.push_str(self.analysis.trim());
        out.push_str("\n\nRECOMMENDED HOSPITALS\n\n");
        out.push_str(self.recommendations.trim());
        out.push_str("\n\n");
        out.push_str(DISCLAIMER);
        out.push('\n');
        out
    }

    pub fn render_pdf(&self) -> AppResult<Vec<u8>> {
        let mut pdf = PdfBuilder::new();
        pdf.title(TITLE).note(SUBTITLE).heading("Patient Information");
        for (label, value) in self.patient_lines() {
            pdf.field(label, &value);
        }
        pdf.field("Generated on", &self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string());

        pdf.heading("Medical Report Analysis").paragraph(&self.analysis);
        pdf.heading("Recommended Hospitals").paragraph(&self.recommendations);
        pdf.note(DISCLAIMER);
        pdf.finish()
    }

    pub fn export(&self, format: ExportFormat) -> AppResult<Vec<u8>> {
        match format {
            ExportFormat::Text => Ok(self.render_text().into_bytes()),
            ExportFormat::Pdf => self.render_pdf(),
        }
    }
}
