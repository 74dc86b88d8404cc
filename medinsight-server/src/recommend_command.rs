use anyhow::{Context, Result};
use colored::Colorize;

use medinsight_core::RecommendationInput;
use medinsight_types::{CarePreferences, PatientInfo};

use crate::cli::RecommendArgs;
use crate::generate_command::{load_service, read_report_file, write_export};

pub async fn recommend_hospitals(args: RecommendArgs) -> Result<()> {
    let service = load_service()?;
    let input = build_input(&args).await?;

    if input.analysis.is_none() {
        println!("{} Analyzing report...", "→".cyan());
    }
    println!("{} Finding hospitals for this case...", "→".cyan());

    let rec = service.recommend(input).await?;
    let body = rec.export(args.format)?;
    let path = write_export(&args.output, &rec.file_name(args.format.extension()), &body).await?;

    println!("{} Recommendations saved to {}", "✓".green(), path.display());
    Ok(())
}

async fn build_input(args: &RecommendArgs) -> Result<RecommendationInput> {
    let mut input = RecommendationInput {
        patient: PatientInfo {
            patient_id: args.patient_id.clone(),
            age: args.age.clone(),
            gender: args.gender.clone(),
            referring_physician: None,
        },
        preferences: CarePreferences { budget: args.budget.clone(), emergency: args.emergency },
        ..RecommendationInput::default()
    };

    if let Some(path) = &args.analysis {
        let analysis = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read analysis {}", path.display()))?;
        input.analysis = Some(analysis);
    }
    if let Some(path) = &args.report {
        input.report_text = Some(read_report_file(path).await?);
    }
    Ok(input)
}
