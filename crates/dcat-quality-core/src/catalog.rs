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

//! Catalog records as supplied by the caller

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::is_hidden_null;

/// Separator used when a feature column is sent to the LLM as one list
pub const VALUE_SEPARATOR: &str = ", ";

/// One catalog entry. `properties` maps DCAT predicates to their values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Vec<String>>,
}

impl DatasetRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_property(mut self, predicate: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .entry(predicate.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Identifier if present, otherwise the title
    pub fn display_name(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.title)
    }

    pub fn feature(&self, feature: Feature) -> &str {
        match feature {
            Feature::Title => &self.title,
            Feature::Description => &self.description,
        }
    }

    /// Values for a predicate. `dct:title` and `dct:description` fall back to
    /// the record's own fields when not listed explicitly.
    pub fn values(&self, predicate: &str) -> Vec<&str> {
        if let Some(values) = self.properties.get(predicate) {
            return values.iter().map(String::as_str).collect();
        }
        match predicate {
            "dct:title" => vec![self.title.as_str()],
            "dct:description" => vec![self.description.as_str()],
            _ => Vec::new(),
        }
    }
}

/// A free-text column that can be scanned catalog-wide for anomalies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Title,
    Description,
}

impl Feature {
    /// German name inserted into the anomaly prompt
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Title => "Titel",
            Feature::Description => "Beschreibung",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One feature of every record, in catalog order.
///
/// With `skip_hidden_nulls`, values such as "keine angabe" are dropped.
pub fn feature_values(
    records: &[DatasetRecord],
    feature: Feature,
    skip_hidden_nulls: bool,
) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.feature(feature))
        .filter(|v| !skip_hidden_nulls || !is_hidden_null(v))
        .collect()
}

/// Join one feature of every record into a comma-separated list
pub fn join_feature_values(
    records: &[DatasetRecord],
    feature: Feature,
    skip_hidden_nulls: bool,
) -> String {
    feature_values(records, feature, skip_hidden_nulls).join(VALUE_SEPARATOR)
}
