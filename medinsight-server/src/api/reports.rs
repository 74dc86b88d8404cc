//! Report generation handlers

use axum::{
    extract::{multipart::Field, Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Json},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use medinsight_core::reports::extract_pdf_text;
use medinsight_core::{ReportDocument, ReportInput};
use medinsight_types::{ExportFormat, ImageAttachment, PatientInfo, ReportKind};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct KindInfo {
    pub kind: ReportKind,
    pub title: &'static str,
    pub requires_image: bool,
    pub preferred_model: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub kind: ReportKind,
    pub title: &'static str,
    pub file_name: String,
    pub report: String,
    pub generated_at: NaiveDateTime,
}

impl From<ReportDocument> for ReportResponse {
    fn from(doc: ReportDocument) -> Self {
        Self {
            kind: doc.kind,
            title: doc.title(),
            file_name: doc.file_name(ExportFormat::Text.extension()),
            generated_at: doc.generated_at,
            report: doc.analysis,
        }
    }
}

/// `?format=text|pdf` on export routes.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

pub async fn list_kinds() -> Json<Vec<KindInfo>> {
    Json(
        ReportKind::ALL
            .into_iter()
            .map(|kind| KindInfo {
                kind,
                title: kind.title(),
                requires_image: kind.requires_image(),
                preferred_model: kind.preferred_model(),
            })
            .collect(),
    )
}

pub async fn generate_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    multipart: Multipart,
) -> Result<Json<ReportResponse>, ApiError> {
    let doc = run(&state, &kind, multipart).await?;
    Ok(Json(ReportResponse::from(doc)))
}

pub async fn export_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ExportQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let doc = run(&state, &kind, multipart).await?;
    let body = doc.export(query.format)?;
    Ok(attachment(&doc.file_name(query.format.extension()), query.format, body))
}

/// Download response with a `Content-Disposition` file name.
pub(super) fn attachment(file_name: &str, format: ExportFormat, body: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
        ],
        body,
    )
}

async fn run(state: &AppState, kind: &str, multipart: Multipart) -> Result<ReportDocument, ApiError> {
    let kind: ReportKind = kind.parse()?;
    let input = read_input(kind, multipart).await?;
    Ok(state.reports().generate_report(input).await?)
}

/// Collect `image`, `report_text`, `report_pdf` and patient fields from a multipart body.
async fn read_input(kind: ReportKind, mut multipart: Multipart) -> Result<ReportInput, ApiError> {
    let mut input = ReportInput::new(kind);

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "image" => {
                let (file_name, data) = read_file(field).await?;
                // Browsers send an empty part for an untouched file input.
                if data.is_empty() && !kind.requires_image() {
                    continue;
                }
                input.image = Some(ImageAttachment::from_upload(&file_name, data)?);
            },
            "report_pdf" => {
                if let Some(text) = read_report_pdf(field).await? {
                    input.report_text = Some(text);
                }
            },
            "report_text" => input.report_text = Some(field.text().await.map_err(bad_request)?),
            _ => read_patient_field(&mut input.patient, &name, field).await?,
        }
    }

    Ok(input)
}

async fn read_file(field: Field<'_>) -> Result<(String, Vec<u8>), ApiError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let data = field.bytes().await.map_err(bad_request)?;
    Ok((file_name, data.to_vec()))
}

/// Extracted text of an uploaded PDF; `None` for an empty part.
pub(super) async fn read_report_pdf(field: Field<'_>) -> Result<Option<String>, ApiError> {
    let (file_name, data) = read_file(field).await?;
    if data.is_empty() {
        return Ok(None);
    }
    Ok(Some(extract_pdf_text(&file_name, &data)?))
}

/// Store a patient field by name; unknown names are ignored.
pub(super) async fn read_patient_field(
    patient: &mut PatientInfo,
    name: &str,
    field: Field<'_>,
) -> Result<(), ApiError> {
    let slot = match name {
        "patient_id" => &mut patient.patient_id,
        "age" => &mut patient.age,
        "gender" => &mut patient.gender,
        "referring_physician" => &mut patient.referring_physician,
        _ => {
            debug!("Ignoring multipart field {}", name);
            return Ok(());
        },
    };
    *slot = Some(field.text().await.map_err(bad_request)?);
    Ok(())
}

pub(super) fn bad_request(e: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(e.to_string())
}
