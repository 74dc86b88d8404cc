//! Hospital recommendation handlers

use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Json},
};
use chrono::NaiveDateTime;
use serde::Serialize;

use medinsight_core::{HospitalRecommendation, RecommendationInput};
use medinsight_types::{CarePreferences, ExportFormat};

use super::reports::{attachment, bad_request, read_patient_field, read_report_pdf, ExportQuery};
use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: &'static str,
    pub file_name: String,
    pub analysis: String,
    pub recommendations: String,
    pub preferences: CarePreferences,
    pub generated_at: NaiveDateTime,
}

impl From<HospitalRecommendation> for RecommendationResponse {
    fn from(rec: HospitalRecommendation) -> Self {
        Self {
            title: rec.title(),
            file_name: rec.file_name(ExportFormat::Text.extension()),
            generated_at: rec.generated_at,
            preferences: rec.preferences,
            analysis: rec.analysis,
            recommendations: rec.recommendations,
        }
    }
}

pub async fn recommend(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let rec = run(&state, multipart).await?;
    Ok(Json(RecommendationResponse::from(rec)))
}

pub async fn export_recommendation(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let rec = run(&state, multipart).await?;
    let body = rec.export(query.format)?;
    Ok(attachment(&rec.file_name(query.format.extension()), query.format, body))
}

async fn run(state: &AppState, multipart: Multipart) -> Result<HospitalRecommendation, ApiError> {
    let input = read_input(multipart).await?;
    Ok(state.reports().recommend(input).await?)
}

/// Fields: `report_text` or `report_pdf` (or a ready `analysis`), patient
/// fields, `budget` and `emergency`.
async fn read_input(mut multipart: Multipart) -> Result<RecommendationInput, ApiError> {
    let mut input = RecommendationInput::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "report_pdf" => {
                if let Some(text) = read_report_pdf(field).await? {
                    input.report_text = Some(text);
                }
            },
            "report_text" => input.report_text = Some(field.text().await.map_err(bad_request)?),
            "analysis" => input.analysis = Some(field.text().await.map_err(bad_request)?),
            "budget" => input.preferences.budget = Some(field.text().await.map_err(bad_request)?),
            "emergency" => {
                let value = field.text().await.map_err(bad_request)?;
                input.preferences.emergency = is_truthy(&value);
            },
            _ => read_patient_field(&mut input.patient, &name, field).await?,
        }
    }

    Ok(input)
}

/// Checkbox-style flag: `on`, `true`, `yes` or `1`.
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "on" | "true" | "yes" | "1")
}
