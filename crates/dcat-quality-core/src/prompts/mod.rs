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

//! Prompt library for LLM interactions
//!
//! Templates are versioned text assets under `templates/`; rendered output is
//! snapshot-tested against `snapshots/`.

pub mod catalog_anomalies;
pub mod library;
pub mod metadata_analysis;
pub mod models;
pub mod system;

pub use library::{get_prompt_library, PromptLibrary};
pub use models::{PromptContext, PromptTemplate, TemplateInfo};
pub use system::SystemPersona;
