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

//! # DCAT Quality Core
//!
//! Quality assessment for open-data catalog metadata.
//!
//! Two independent paths are provided: rule checks of structured DCAT-AP
//! fields against static reference tables, and LLM-assisted scoring of a
//! dataset's title and description. The LLM path renders a versioned prompt,
//! sends it through an [`LlmGateway`] and parses the tagged reply into a
//! [`ScoredAnalysis`].

pub mod analysis;
pub mod analyzer;
pub mod catalog;
pub mod checks;
pub mod errors;
pub mod llm_client;
pub mod parser;
pub mod prompts;
pub mod reference;

// Re-export commonly used types
pub use analysis::{AnalysisRow, Assessment, Dimension, Score, ScoredAnalysis};
pub use analyzer::{
    AnalysisError, AnalysisOutcome, AnomalyReport, CatalogReport, DatasetReport, QualityAnalyzer,
};
pub use catalog::{DatasetRecord, Feature};
pub use checks::{check_dataset, Finding, FindingKind};
pub use errors::{LlmError, MalformedReply, QualityError, QualityResult};
pub use parser::{parse_analysis, ReplyTag};
pub use prompts::{PromptLibrary, SystemPersona};

// Re-export traits
pub use llm_client::LlmClient;

// Re-export concrete types
pub use llm_client::{
    config::LlmConfig,
    models::{ChatRequest, Message},
    openai_client::OpenAiClient,
    LlmGateway,
};
