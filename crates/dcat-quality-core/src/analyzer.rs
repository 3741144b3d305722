/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Orchestrates prompt rendering, the completion call and reply parsing

use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisRow, ScoredAnalysis};
use crate::catalog::{feature_values, DatasetRecord, Feature, VALUE_SEPARATOR};
use crate::checks::{check_dataset, Finding};
use crate::errors::{MalformedReply, QualityError, QualityResult};
use crate::llm_client::LlmGateway;
use crate::parser::{parse_analysis, ReplyTag};
use crate::prompts::{PromptLibrary, TemplateInfo};

/// Why a dataset has no scored analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The completion endpoint could not be reached or returned an error
    #[error("completion service unavailable")]
    Unavailable,

    /// The endpoint answered without following the reply format
    #[error("malformed reply: {error}")]
    Malformed { error: MalformedReply, reply: String },

    #[error(transparent)]
    Prompt(#[from] QualityError),
}

/// Serializable outcome of the LLM analysis for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Scored { analysis: AnalysisRow, mean_score: f32 },
    Unavailable,
    Malformed { reason: String, tags: Vec<ReplyTag> },
    PromptError { reason: String },
}

impl From<Result<ScoredAnalysis, AnalysisError>> for AnalysisOutcome {
    fn from(result: Result<ScoredAnalysis, AnalysisError>) -> Self {
        match result {
            Ok(analysis) => AnalysisOutcome::Scored {
                analysis: analysis.to_row(),
                mean_score: analysis.mean_score(),
            },
            Err(AnalysisError::Unavailable) => AnalysisOutcome::Unavailable,
            Err(AnalysisError::Malformed { error, .. }) => AnalysisOutcome::Malformed {
                reason: error.to_string(),
                tags: error.tags(),
            },
            Err(AnalysisError::Prompt(e)) => AnalysisOutcome::PromptError {
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub name: String,
    pub findings: Vec<Finding>,
    pub outcome: AnalysisOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub datasets: usize,
    pub scored: usize,
    pub unavailable: usize,
    pub malformed: usize,
    pub prompt_errors: usize,
    pub findings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReport {
    pub model: String,
    pub template: TemplateInfo,
    pub summary: CatalogSummary,
    pub datasets: Vec<DatasetReport>,
}

/// Free-text anomaly report for one feature across the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub feature: String,
    pub model: String,
    pub template: TemplateInfo,
    pub values: usize,
    pub text: String,
}

pub struct QualityAnalyzer {
    gateway: LlmGateway,
    prompts: PromptLibrary,
}

impl QualityAnalyzer {
    pub fn new(gateway: LlmGateway) -> Self {
        Self {
            gateway,
            prompts: PromptLibrary::default(),
        }
    }

    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn prompts(&self) -> &PromptLibrary {
        &self.prompts
    }

    /// Score one dataset's title and description
    pub async fn analyze_dataset(
        &self,
        record: &DatasetRecord,
    ) -> Result<ScoredAnalysis, AnalysisError> {
        let prompt = self.prompts.analysis_prompt(record)?;

        let Some(reply) = self.gateway.complete(&prompt).await else {
            return Err(AnalysisError::Unavailable);
        };

        parse_analysis(&reply).map_err(|error| {
            warn!(
                "Discarding reply for {}: {}",
                record.display_name(),
                error
            );
            debug!("Malformed reply text: {}", reply);
            AnalysisError::Malformed { error, reply }
        })
    }

    /// Rule checks plus LLM analysis for one record
    pub async fn report_dataset(&self, record: &DatasetRecord) -> DatasetReport {
        let findings = check_dataset(record);
        let outcome = AnalysisOutcome::from(self.analyze_dataset(record).await);
        DatasetReport {
            name: record.display_name().to_string(),
            findings,
            outcome,
        }
    }

    /// Analyze every record with at most `concurrency` calls in flight.
    ///
    /// Reports come back in input order. A concurrency of 0 is treated as 1.
    pub async fn analyze_catalog(
        &self,
        records: &[DatasetRecord],
        concurrency: usize,
    ) -> CatalogReport {
        let concurrency = concurrency.max(1);
        info!(
            "Analyzing {} datasets with {} ({} in flight)",
            records.len(),
            self.gateway.model(),
            concurrency
        );

        let datasets: Vec<DatasetReport> = stream::iter(records)
            .map(|record| self.report_dataset(record))
            .buffered(concurrency)
            .collect()
            .await;

        let summary = summarize(&datasets);
        info!(
            "Scored {}/{} datasets ({} unavailable, {} malformed)",
            summary.scored, summary.datasets, summary.unavailable, summary.malformed
        );

        CatalogReport {
            model: self.gateway.model().to_string(),
            template: self.prompts.analysis_info(),
            summary,
            datasets,
        }
    }

    /// Send a pre-serialized value list for `feature` to the anomaly prompt.
    ///
    /// Returns `Ok(None)` when the completion call failed.
    pub async fn check_text_properties(
        &self,
        feature: &str,
        data: &str,
    ) -> QualityResult<Option<String>> {
        let prompt = self.prompts.anomalies_prompt(feature, data)?;
        Ok(self.gateway.complete(&prompt).await)
    }

    /// Anomaly scan over one feature column of the catalog
    pub async fn scan_feature(
        &self,
        records: &[DatasetRecord],
        feature: Feature,
        skip_hidden_nulls: bool,
    ) -> QualityResult<Option<AnomalyReport>> {
        let values = feature_values(records, feature, skip_hidden_nulls);
        let data = values.join(VALUE_SEPARATOR);
        let values = values.len();
        info!("Scanning {} {} values for anomalies", values, feature);

        let text = self.check_text_properties(feature.label(), &data).await?;
        Ok(text.map(|text| AnomalyReport {
            feature: feature.label().to_string(),
            model: self.gateway.model().to_string(),
            template: self.prompts.anomalies_info(),
            values,
            text,
        }))
    }
}

fn summarize(datasets: &[DatasetReport]) -> CatalogSummary {
    let mut summary = CatalogSummary {
        datasets: datasets.len(),
        ..Default::default()
    };
    for report in datasets {
        summary.findings += report.findings.len();
        match report.outcome {
            AnalysisOutcome::Scored { .. } => summary.scored += 1,
            AnalysisOutcome::Unavailable => summary.unavailable += 1,
            AnalysisOutcome::Malformed { .. } => summary.malformed += 1,
            AnalysisOutcome::PromptError { .. } => summary.prompt_errors += 1,
        }
    }
    summary
}
