use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use medinsight_types::{ExportFormat, ReportKind};

#[derive(Parser)]
#[command(
    name = "medinsight",
    about = "MedInsight - AI medical imaging reports over Gemini",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, help = "Override the listen port")]
    pub port: Option<u16>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve,

    #[command(about = "Generate one report and save it as text or PDF")]
    Generate(GenerateArgs),

    #[command(about = "Analyze a report and recommend suitable hospitals")]
    Recommend(RecommendArgs),

    #[command(subcommand, about = "View and modify configuration")]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(short, long, value_parser = parse_kind, help = "xray, ct_scan, ultrasound or report_analysis")]
    pub kind: ReportKind,

    #[arg(short, long, help = "Image file (PNG, JPEG or WEBP)")]
    pub image: Option<PathBuf>,

    #[arg(long, help = "Text or PDF file holding the report to analyze")]
    pub report_text: Option<PathBuf>,

    #[arg(long)]
    pub patient_id: Option<String>,

    #[arg(long)]
    pub age: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long, help = "Referring physician")]
    pub physician: Option<String>,

    #[arg(short, long, default_value = ".", help = "Directory for the exported report")]
    pub output: PathBuf,

    #[arg(short, long, default_value = "text", value_parser = parse_format, help = "text or pdf")]
    pub format: ExportFormat,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[arg(
        long,
        required_unless_present = "analysis",
        help = "Text or PDF file holding the report to analyze first"
    )]
    pub report: Option<PathBuf>,

    #[arg(long, conflicts_with = "report", help = "Text file holding an existing report analysis")]
    pub analysis: Option<PathBuf>,

    #[arg(long)]
    pub patient_id: Option<String>,

    #[arg(long)]
    pub age: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long, help = "Budget preference, e.g. Economy or Premium")]
    pub budget: Option<String>,

    #[arg(long, help = "Mark the case as an emergency")]
    pub emergency: bool,

    #[arg(short, long, default_value = ".", help = "Directory for the exported recommendation")]
    pub output: PathBuf,

    #[arg(short, long, default_value = "text", value_parser = parse_format, help = "text or pdf")]
    pub format: ExportFormat,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Get a specific configuration value")]
    Get {
        #[arg(help = "Configuration key (e.g., 'gemini.base_url', 'invoker.max_retries')")]
        key: String,
    },

    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key")]
        key: String,

        #[arg(help = "New value")]
        value: String,
    },
}

fn parse_kind(value: &str) -> Result<ReportKind, String> {
    value.parse().map_err(|e: medinsight_types::ReportError| e.to_string())
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse()
}
