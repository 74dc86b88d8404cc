//! API Routes
//!
//! REST endpoints for report generation and hospital recommendations under `/api`.

mod error;
mod recommendations;
mod reports;


pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/kinds", get(reports::list_kinds))
        .route("/reports/:kind", post(reports::generate_report))
        .route("/reports/:kind/export", post(reports::export_report))
        .route("/recommendations", post(recommendations::recommend))
        .route("/recommendations/export", post(recommendations::export_recommendation))
}
