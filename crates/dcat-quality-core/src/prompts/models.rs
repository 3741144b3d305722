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

//! Core prompt models and types

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{QualityError, QualityResult};

/// Values substituted into a template, keyed by placeholder name
pub type PromptContext<'a> = HashMap<&'a str, &'a str>;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern compiles"));

/// A versioned instruction template with `{name}` placeholders.
///
/// The rubric and the reply format live entirely in the template text, so a
/// wording change is a behavior change: bump `version` when editing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub version: &'static str,
    pub text: &'static str,
}

/// Identifies the exact template that produced a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub version: String,
    pub fingerprint: String,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, version: &'static str, text: &'static str) -> Self {
        Self {
            name,
            version,
            text,
        }
    }

    /// Placeholder names in order of first appearance
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(self.text) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute every placeholder in a single pass.
    ///
    /// Values are inserted verbatim and never scanned for placeholders
    /// themselves. A placeholder without a value is an error.
    pub fn render(&self, context: &PromptContext<'_>) -> QualityResult<String> {
        let mut rendered = String::with_capacity(self.text.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(self.text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = context.get(name.as_str()).ok_or_else(|| {
                QualityError::MissingPlaceholder {
                    template: self.name.to_string(),
                    placeholder: name.as_str().to_string(),
                }
            })?;
            rendered.push_str(&self.text[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }

        rendered.push_str(&self.text[last..]);
        Ok(rendered)
    }

    /// SHA-256 of the template text, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            name: self.name.to_string(),
            version: self.version.to_string(),
            fingerprint: self.fingerprint(),
        }
    }
}
