//! Text extraction from uploaded PDF reports.

use lopdf::Document;
use tracing::debug;

use medinsight_types::ReportError;

/// `%PDF` file signature.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Whether `data` (or its file name) looks like a PDF document.
pub fn is_pdf(file_name: &str, data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC) || file_name.to_ascii_lowercase().ends_with(".pdf")
}

/// Concatenate the text layer of every page.
///
/// Pages that fail to decode are skipped, matching how viewers degrade. A
/// document with no text at all (a scanned image, for instance) is rejected
/// so the analysis prompt never runs on an empty report.
pub fn extract_pdf_text(file_name: &str, data: &[u8]) -> Result<String, ReportError> {
    if data.is_empty() {
        return Err(ReportError::EmptyUpload { file_name: file_name.to_string() });
    }

    let unreadable =
        |reason: String| ReportError::UnreadablePdf { file_name: file_name.to_string(), reason };

    let doc = Document::load_mem(data).map_err(|e| unreadable(e.to_string()))?;
    if doc.is_encrypted() {
        return Err(unreadable("document is encrypted".to_string()));
    }

    let mut text = String::new();
    for page in doc.get_pages().into_keys() {
        match doc.extract_text(&[page]) {
            Ok(page_text) => {
                text.push_str(page_text.trim_end());
                text.push('\n');
            },
            Err(e) => debug!("Skipping page {} of {}: {}", page, file_name, e),
        }
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(ReportError::EmptyPdf { file_name: file_name.to_string() });
    }
    Ok(text.to_string())
}
