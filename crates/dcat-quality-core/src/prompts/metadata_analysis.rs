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

//! Single-dataset analysis prompt
//!
//! Asks for commentary and a 1-5 score on content, methodology, data quality
//! and geography, wrapped in the tags read by [`crate::parser`].

use crate::catalog::DatasetRecord;
use crate::errors::QualityResult;
use crate::prompts::models::{PromptContext, PromptTemplate};

pub const METADATA_ANALYSIS_V1: PromptTemplate = PromptTemplate::new(
    "metadata_analysis",
    "v1",
    include_str!("templates/metadata_analysis_v1.txt"),
);

/// Render `template` for one dataset's title and description
pub fn render(template: &PromptTemplate, title: &str, description: &str) -> QualityResult<String> {
    let context = PromptContext::from([("title", title), ("description", description)]);
    template.render(&context)
}

/// Render the current analysis template for a record
pub fn analysis_prompt(record: &DatasetRecord) -> QualityResult<String> {
    render(&METADATA_ANALYSIS_V1, &record.title, &record.description)
}
