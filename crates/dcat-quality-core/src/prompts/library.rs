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

//! Prompt library implementation

use crate::catalog::DatasetRecord;
use crate::errors::QualityResult;
use crate::prompts::{
    catalog_anomalies::{self, CATALOG_ANOMALIES_V1},
    metadata_analysis::{self, METADATA_ANALYSIS_V1},
    models::{PromptTemplate, TemplateInfo},
};

/// The templates an analyzer renders, pinned to specific versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptLibrary {
    pub metadata_analysis: PromptTemplate,
    pub catalog_anomalies: PromptTemplate,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self {
            metadata_analysis: METADATA_ANALYSIS_V1,
            catalog_anomalies: CATALOG_ANOMALIES_V1,
        }
    }
}

impl PromptLibrary {
    pub fn analysis_prompt(&self, record: &DatasetRecord) -> QualityResult<String> {
        metadata_analysis::render(&self.metadata_analysis, &record.title, &record.description)
    }

    pub fn anomalies_prompt(&self, feature: &str, data: &str) -> QualityResult<String> {
        catalog_anomalies::render(&self.catalog_anomalies, feature, data)
    }

    pub fn analysis_info(&self) -> TemplateInfo {
        self.metadata_analysis.info()
    }

    pub fn anomalies_info(&self) -> TemplateInfo {
        self.catalog_anomalies.info()
    }
}

/// Get the default prompt library instance
pub fn get_prompt_library() -> PromptLibrary {
    PromptLibrary::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QualityError;

    #[test]
    fn test_default_library_uses_v1() {
        let library = get_prompt_library();
        assert_eq!(library.analysis_info().version, "v1");
        assert_eq!(library.anomalies_info().name, "catalog_anomalies");
    }

    #[test]
    fn test_custom_template_missing_value_fails() {
        let library = PromptLibrary {
            metadata_analysis: PromptTemplate::new("custom", "v2", "{title} / {publisher}"),
            ..PromptLibrary::default()
        };
        let record = DatasetRecord::new("Kühe", "Anzahl Kühe");
        assert!(matches!(
            library.analysis_prompt(&record),
            Err(QualityError::MissingPlaceholder { .. })
        ));
    }
}
