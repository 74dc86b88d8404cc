//! Report generation on top of the resilient invoker.
//!
//! [`ReportService`] owns the candidate-list policy (preferred model first,
//! then the configured vision or text fallbacks) and turns an exhausted
//! invocation into a single user-facing error. Hospital recommendations are a
//! second text invocation fed by a report analysis.

mod document;
mod extract;
mod pdf;
mod prompts;
mod recommendation;


pub use document::ReportDocument;
pub use extract::{extract_pdf_text, is_pdf};
pub use prompts::{prompt_for, recommendation_prompt};
pub use recommendation::{HospitalRecommendation, RecommendationInput};

use chrono::Local;
use tracing::{info, warn};

use medinsight_types::{
    AppConfig, CarePreferences, HospitalConfig, ImageAttachment, InvocationResult, InvokerConfig,
    ModelCandidates, ModelDefaults, PatientInfo, ReportError, ReportKind, Request,
};

use crate::invoker::{ModelProvider, ResilientInvoker};

/// Everything a caller supplies for one report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub kind: ReportKind,
    pub image: Option<ImageAttachment>,
    pub report_text: Option<String>,
    pub patient: PatientInfo,
}

impl ReportInput {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind, image: None, report_text: None, patient: PatientInfo::default() }
    }
}

pub struct ReportService<P> {
    invoker: ResilientInvoker<P>,
    models: ModelDefaults,
    hospitals: HospitalConfig,
}

impl<P: ModelProvider> ReportService<P> {
    pub fn new(provider: P, invoker_config: InvokerConfig, models: ModelDefaults) -> Self {
        Self {
            invoker: ResilientInvoker::new(provider, invoker_config),
            models,
            hospitals: HospitalConfig::default(),
        }
    }

    pub fn from_config(provider: P, config: &AppConfig) -> Self {
        Self::new(provider, config.invoker, config.models.clone())
            .with_hospitals(config.hospitals.clone())
    }

    /// Directory text used by [`Self::recommend_hospitals`].
    pub fn with_hospitals(mut self, hospitals: HospitalConfig) -> Self {
        self.hospitals = hospitals;
        self
    }

    pub fn invoker(&self) -> &ResilientInvoker<P> {
        &self.invoker
    }

    /// Preferred model followed by the vision or text fallbacks.
    pub fn candidates_for(
        &self,
        preferred: &str,
        has_image: bool,
    ) -> Result<ModelCandidates, ReportError> {
        let fallbacks =
            if has_image { &self.models.vision_fallbacks } else { &self.models.text_fallbacks };
        ModelCandidates::with_preferred(preferred, fallbacks)
    }

    /// Generate text for a raw prompt. `None` when every candidate failed.
    pub async fn generate(
        &self,
        prompt: &str,
        image: Option<ImageAttachment>,
        preferred_model: &str,
    ) -> Option<String> {
        let candidates = match self.candidates_for(preferred_model, image.is_some()) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Cannot build candidate list: {}", e);
                return None;
            },
        };
        self.invoker.invoke(&Request::new(prompt, image), &candidates).await.into_text()
    }

    /// Validate input, run the kind's prompt, and wrap the text in a document.
    pub async fn generate_report(&self, input: ReportInput) -> Result<ReportDocument, ReportError> {
        let ReportInput { kind, image, report_text, patient } = input;

        let (prompt, image) = if kind.requires_image() {
            let image = image.ok_or_else(|| ReportError::MissingImage { kind: kind.to_string() })?;
            (prompt_for(kind, None), Some(image))
        } else {
            let text = report_text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ReportError::MissingReportText { kind: kind.to_string() })?;
            (prompt_for(kind, Some(text)), None)
        };

        let candidates = self.candidates_for(kind.preferred_model(), image.is_some())?;
        info!("Generating {} report ({} candidate models)", kind, candidates.len());

        match self.invoker.invoke(&Request::new(prompt, image), &candidates).await {
            InvocationResult::Success(text) => {
                Ok(ReportDocument::new(kind, text, patient, Local::now().naive_local()))
            },
            InvocationResult::Exhausted(last_error) => {
                warn!("{} report generation failed: {}", kind, last_error);
                Err(ReportError::GenerationFailed { last_error })
            },
        }
    }

    /// Ask for hospitals suited to `analysis`, using the text fallbacks.
    pub async fn recommend_hospitals(
        &self,
        analysis: &str,
        patient: &PatientInfo,
        preferences: &CarePreferences,
    ) -> Result<HospitalRecommendation, ReportError> {
        let analysis = analysis.trim();
        if analysis.is_empty() {
            return Err(ReportError::MissingAnalysis);
        }

        let prompt = recommendation_prompt(analysis, patient, preferences, &self.hospitals);
        let candidates = self.candidates_for(ReportKind::ReportAnalysis.preferred_model(), false)?;
        info!("Generating hospital recommendations ({} candidate models)", candidates.len());

        match self.invoker.invoke(&Request::text(prompt), &candidates).await {
            InvocationResult::Success(recommendations) => Ok(HospitalRecommendation {
                analysis: analysis.to_string(),
                recommendations,
                patient: patient.clone(),
                preferences: preferences.clone(),
                generated_at: Local::now().naive_local(),
            }),
            InvocationResult::Exhausted(last_error) => {
                warn!("Hospital recommendation failed: {}", last_error);
                Err(ReportError::GenerationFailed { last_error })
            },
        }
    }

    /// Analyse the report unless an analysis is supplied, then recommend.
    pub async fn recommend(
        &self,
        input: RecommendationInput,
    ) -> Result<HospitalRecommendation, ReportError> {
        let RecommendationInput { report_text, analysis, patient, preferences } = input;

        let analysis = match analysis.filter(|a| !a.trim().is_empty()) {
            Some(analysis) => analysis,
            None => {
                let mut report = ReportInput::new(ReportKind::ReportAnalysis);
                report.report_text = report_text;
                report.patient = patient.clone();
                self.generate_report(report).await?.analysis
            },
        };

        self.recommend_hospitals(&analysis, &patient, &preferences).await
    }
}
