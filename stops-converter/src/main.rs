use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stops_converter::config::ConverterConfig;
use stops_converter::consolidate::Consolidator;
use stops_converter::export::Exporter;
use stops_converter::input::{load_groups, load_visits};
use stops_converter::reference::{ReferenceClient, ReferenceProvider};
use stops_converter::registry::StopRegistry;
use stops_converter::rules::StopRules;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConverterConfig::from_env()?;

    // Reference data is required; without it railway stations cannot be built.
    let client = ReferenceClient::new(config.reference.clone())?;
    let provider = ReferenceProvider::new(client);
    let reference = provider.get().await?;

    let groups = load_groups(&config.groups_path)?;
    info!(groups = groups.len(), "loaded stop groups");

    let mut registry = StopRegistry::new();
    let mut consolidator = Consolidator::new(StopRules::default(), reference.clone());
    for record in groups {
        consolidator.load_group(record.group, record.stakes, &mut registry);
    }
    info!(stops = registry.len(), "consolidated stop groups");

    let visits = load_visits(&config.visits_path)?;
    let resolved = visits.iter().filter_map(|visit| visit.apply(&mut registry)).count();
    info!(visits = visits.len(), resolved, "recorded stop visits");

    let summary = Exporter::new(&registry, &reference).export(&config.output_dir, &config.report_path)?;
    info!(
        stops = summary.stops_written,
        consumed = summary.report.consumed.len(),
        unconsumed = summary.report.unconsumed.len(),
        missing = summary.report.missing.len(),
        "export finished"
    );

    Ok(())
}
