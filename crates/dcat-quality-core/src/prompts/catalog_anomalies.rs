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

//! Catalog-wide anomaly scan prompt
//!
//! The reply is free text and is not parsed.

use crate::errors::QualityResult;
use crate::prompts::models::{PromptContext, PromptTemplate};

pub const CATALOG_ANOMALIES_V1: PromptTemplate = PromptTemplate::new(
    "catalog_anomalies",
    "v1",
    include_str!("templates/catalog_anomalies_v1.txt"),
);

/// Render `template` for a feature name and its comma-separated values
pub fn render(template: &PromptTemplate, feature: &str, data: &str) -> QualityResult<String> {
    let context = PromptContext::from([("feature", feature), ("data", data)]);
    template.render(&context)
}

pub fn anomalies_prompt(feature: &str, data: &str) -> QualityResult<String> {
    render(&CATALOG_ANOMALIES_V1, feature, data)
}
