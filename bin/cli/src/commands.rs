use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dcat_quality_core::reference::{
    DATASET_PROPERTIES, DISTRIBUTION_PROPERTIES, EU_FREQUENCIES, EU_THEMES, HIDDEN_NULLS,
};
use dcat_quality_core::{
    check_dataset, DatasetRecord, Feature, Finding, LlmConfig, LlmGateway, OpenAiClient,
    QualityAnalyzer,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::TableArg;
use crate::input::{load_catalog, write_json};

/// Build the analyzer once; the client is shared by every call
pub fn build_analyzer(config: &LlmConfig) -> anyhow::Result<QualityAnalyzer> {
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; completion calls will fail");
    }
    let client = OpenAiClient::new(config).context("Failed to create LLM client")?;
    let gateway = LlmGateway::new(Arc::new(client), config);
    Ok(QualityAnalyzer::new(gateway))
}

pub async fn analyze(
    analyzer: &QualityAnalyzer,
    input: &Path,
    output: Option<&Path>,
    concurrency: usize,
) -> anyhow::Result<()> {
    let records = load_catalog(input)?;
    let report = analyzer.analyze_catalog(&records, concurrency).await;
    write_json(&report, output)
}

pub async fn anomalies(
    analyzer: &QualityAnalyzer,
    input: &Path,
    feature: Feature,
    skip_hidden_nulls: bool,
) -> anyhow::Result<()> {
    let records = load_catalog(input)?;
    match analyzer
        .scan_feature(&records, feature, skip_hidden_nulls)
        .await?
    {
        Some(report) => {
            info!(
                "Anomaly report for {} from {} ({} values)",
                report.feature, report.model, report.values
            );
            println!("{}", report.text);
            Ok(())
        }
        None => anyhow::bail!("No anomaly report: the completion call failed"),
    }
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    name: &'a str,
    findings: Vec<Finding>,
}

fn check_records(records: &[DatasetRecord]) -> Vec<CheckReport<'_>> {
    records
        .iter()
        .map(|record| CheckReport {
            name: record.display_name(),
            findings: check_dataset(record),
        })
        .collect()
}

pub fn check(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let records = load_catalog(input)?;
    let reports = check_records(&records);
    let total: usize = reports.iter().map(|r| r.findings.len()).sum();
    info!("{} findings across {} datasets", total, reports.len());
    write_json(&reports, output)
}

pub fn reference(table: TableArg) -> anyhow::Result<()> {
    match table {
        TableArg::Dataset => write_json(&DATASET_PROPERTIES, None),
        TableArg::Distribution => write_json(&DISTRIBUTION_PROPERTIES, None),
        TableArg::Themes => write_json(&EU_THEMES, None),
        TableArg::Frequencies => write_json(&EU_FREQUENCIES, None),
        TableArg::HiddenNulls => write_json(&HIDDEN_NULLS, None),
    }
}
