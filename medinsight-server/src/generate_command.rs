use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use medinsight_core::modules::config as core_config;
use medinsight_core::reports::{extract_pdf_text, is_pdf};
use medinsight_core::{GeminiClient, ReportInput, ReportService};
use medinsight_types::{ImageAttachment, PatientInfo};

use crate::cli::GenerateArgs;

/// Report service over the configured Gemini client. Fails fast without a key.
pub(crate) fn load_service() -> Result<ReportService<Arc<GeminiClient>>> {
    let config = core_config::load_effective_config()?;
    if !config.gemini.has_api_key() {
        anyhow::bail!("{}", medinsight_types::ConfigError::MissingApiKey);
    }

    let client = GeminiClient::new(&config.gemini)?;
    Ok(ReportService::from_config(Arc::new(client), &config))
}

pub async fn generate_report(args: GenerateArgs) -> Result<()> {
    let service = load_service()?;

    let input = build_input(&args).await?;
    println!("{} Generating {}...", "→".cyan(), args.kind.title());

    let doc = service.generate_report(input).await?;
    let body = doc.export(args.format)?;
    let path = write_export(&args.output, &doc.file_name(args.format.extension()), &body).await?;

    println!("{} Report saved to {}", "✓".green(), path.display());
    Ok(())
}

/// Write `body` as `dir/file_name`, creating `dir` first.
pub(crate) async fn write_export(dir: &Path, file_name: &str, body: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Report text from a plain-text file or the text layer of a PDF.
pub(crate) async fn read_report_file(path: &Path) -> Result<String> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    let name = display_name(path);

    if is_pdf(&name, &data) {
        return Ok(extract_pdf_text(&name, &data)?);
    }
    String::from_utf8(data).with_context(|| format!("{} is neither UTF-8 text nor a PDF", name))
}

async fn build_input(args: &GenerateArgs) -> Result<ReportInput> {
    let mut input = ReportInput::new(args.kind);

    if let Some(path) = &args.image {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        input.image = Some(ImageAttachment::from_upload(&display_name(path), data)?);
    }

    if let Some(path) = &args.report_text {
        input.report_text = Some(read_report_file(path).await?);
    }

    input.patient = PatientInfo {
        patient_id: args.patient_id.clone(),
        age: args.age.clone(),
        gender: args.gender.clone(),
        referring_physician: args.physician.clone(),
    };
    Ok(input)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
