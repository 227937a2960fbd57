// Engine main entry point
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mission_engine::config::PipelineSettings;
use mission_engine::data::csv_loader::MissionCsvLoader;
use mission_engine::ReportPipeline;
use mission_engine::output::render_table;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "mission-engine", about = "Descriptive statistics over historical space mission launches")]
struct Args {
    /// Launch table CSV (e.g. mission_launches.csv)
    #[arg(long)]
    input: PathBuf,

    /// JSON settings file; the embedded defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only compute this view
    #[arg(long)]
    view: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    info!("Starting mission launch analysis...");

    let settings = match &args.config {
        Some(path) => PipelineSettings::load_from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => PipelineSettings::load_default()?,
    };
    let display = settings.display.clone();
    let pipeline = ReportPipeline::new(settings);

    let Some(name) = &args.view else {
        let report = pipeline
            .run_file(&args.input)
            .with_context(|| format!("failed to load {}", args.input.display()))?;
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => {
                info!(
                    records = report.summary.total_records,
                    date_failures = report.summary.date_failures,
                    price_failures = report.summary.price_failures,
                    missing_values = report.summary.missing_values,
                    "Pipeline finished"
                );
                for name in pipeline.view_names() {
                    if let Some(view) = report.view(name) {
                        println!("{}", render_table(view, &display));
                    }
                }
            }
        }
        return Ok(());
    };

    let records = MissionCsvLoader::load_records_from_csv(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let view = pipeline.run_view(&records, name)?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Table => print!("{}", render_table(&view, &display)),
    }

    Ok(())
}
