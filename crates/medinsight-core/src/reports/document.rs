//! Report export as plain text or PDF.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use medinsight_types::{ExportFormat, PatientInfo, ReportKind};

use super::pdf::PdfBuilder;
use crate::error::AppResult;

const SUBTITLE: &str = "AI-Powered Medical Analysis Report";

pub(crate) const DISCLAIMER: &str = "\
Disclaimer: This report was generated by an AI model and is a preliminary analysis only. \
It is not a diagnosis and must be reviewed by a qualified healthcare professional.";

/// A generated report ready to be rendered or saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub analysis: String,
    #[serde(default)]
    pub patient: PatientInfo,
    pub generated_at: NaiveDateTime,
}

impl ReportDocument {
    pub fn new(
        kind: ReportKind,
        analysis: impl Into<String>,
        patient: PatientInfo,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self { kind, analysis: analysis.into(), patient, generated_at }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// `x-ray_analysis_20240131_142501.txt` style name.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}_{}.{}",
            self.title().to_lowercase().replace(' ', "_"),
            self.generated_at.format("%Y%m%d_%H%M%S"),
            extension.trim_start_matches('.')
        )
    }

    /// Analysis text split on blank lines, empty paragraphs dropped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.analysis.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(self.title().len().max(SUBTITLE.len()));

        out.push_str(self.title());
        out.push('\n');
        out.push_str(SUBTITLE);
        out.push('\n');
        out.push_str(&rule);
        out.push_str("\n\n");

        let entries = self.patient.entries();
        if !entries.is_empty() {
            out.push_str("Patient Information\n");
            for (label, value) in entries {
                out.push_str(&format!("{}: {}\n", label, value));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "Generated on: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        out.push_str("AI Analysis Results\n");
        out.push_str(&"-".repeat("AI Analysis Results".len()));
        out.push_str("\n\n");
        for paragraph in self.paragraphs() {
            out.push_str(paragraph);
            out.push_str("\n\n");
        }

        out.push_str(DISCLAIMER);
        out.push('\n');
        out
    }

    /// A4 PDF with the same sections as [`Self::render_text`].
    pub fn render_pdf(&self) -> AppResult<Vec<u8>> {
        let mut pdf = PdfBuilder::new();
        pdf.title(self.title()).note(SUBTITLE);

        let entries = self.patient.entries();
        if !entries.is_empty() {
            pdf.heading("Patient Information");
            for (label, value) in entries {
                pdf.field(label, value);
            }
        }

        pdf.spacer()
            .field("Generated on", &self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string())
            .heading("AI Analysis Results");
        for paragraph in self.paragraphs() {
            pdf.paragraph(paragraph);
        }
        pdf.note(DISCLAIMER);
        pdf.finish()
    }

    /// Rendered bytes for `format`.
    pub fn export(&self, format: ExportFormat) -> AppResult<Vec<u8>> {
        match format {
            ExportFormat::Text => Ok(self.render_text().into_bytes()),
            ExportFormat::Pdf => self.render_pdf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_opt(14, 25, 1))
            .expect("valid timestamp")
    }

    #[test]
    fn test_file_name() {
        let doc = ReportDocument::new(ReportKind::CtScan, "x", PatientInfo::default(), at());
        assert_eq!(doc.file_name("txt"), "ct_scan_analysis_20240131_142501.txt");
        assert_eq!(doc.file_name(".pdf"), "ct_scan_analysis_20240131_142501.pdf");
    }

    #[test]
    fn test_render_includes_patient_and_paragraphs() {
        let patient = PatientInfo {
            patient_id: Some("P-17".to_string()),
            gender: Some("  ".to_string()),
            referring_physician: Some("Dr. Rao".to_string()),
            ..PatientInfo::default()
        };
        let doc = ReportDocument::new(
            ReportKind::Xray,
            "Findings: clear lungs.\n\n\n\nImpression: normal study.",
            patient,
            at(),
        );

        let text = doc.render_text();
        assert!(text.starts_with("X-ray Analysis\nAI-Powered Medical Analysis Report\n"));
        assert!(text.contains("Patient Information\nPatient ID: P-17\nReferring Physician: Dr. Rao\n"));
        assert!(!text.contains("Gender"));
        assert!(text.contains("Generated on: 2024-01-31 14:25:01"));
        assert!(text.contains("Findings: clear lungs.\n\nImpression: normal study.\n\n"));
        assert!(text.trim_end().ends_with("qualified healthcare professional."));
        assert_eq!(doc.paragraphs().count(), 2);
    }

    #[test]
    fn test_pdf_export_carries_the_analysis() {
        let patient = PatientInfo { patient_id: Some("P-17".to_string()), ..PatientInfo::default() };
        let doc = ReportDocument::new(
            ReportKind::Xray,
            "**Findings**: clear lungs.\n\nImpression: normal study.",
            patient,
            at(),
        );

        let bytes = doc.export(ExportFormat::Pdf).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(doc.file_name(ExportFormat::Pdf.extension()).ends_with(".pdf"));

        let text = crate::reports::extract_pdf_text("report.pdf", &bytes).expect("text layer");
        assert!(text.contains("X-ray Analysis"));
        assert!(text.contains("Patient ID: P-17"));
        assert!(text.contains("Findings: clear lungs."));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_text_export_matches_render() {
        let doc = ReportDocument::new(ReportKind::CtScan, "ok", PatientInfo::default(), at());
        assert_eq!(doc.export(ExportFormat::Text).expect("text"), doc.render_text().into_bytes());
    }

    #[test]
    fn test_render_without_patient_skips_section() {
        let doc =
            ReportDocument::new(ReportKind::Ultrasound, "ok", PatientInfo::default(), at());
        assert!(!doc.render_text().contains("Patient Information"));
    }
}
