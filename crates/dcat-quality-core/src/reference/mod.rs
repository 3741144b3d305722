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

//! Static reference data for DCAT-AP metadata
//!
//! Tables are `'static` and never mutated, so they can be shared freely
//! across tasks.

pub mod dcat;
pub mod hidden_nulls;
pub mod vocabularies;

pub use dcat::{
    distribution_property, dataset_property, Cardinality, DcatClass, DcatProperty, Obligation,
    DATASET_PROPERTIES, DISTRIBUTION_PROPERTIES,
};
pub use hidden_nulls::{is_hidden_null, HIDDEN_NULLS};
pub use vocabularies::{is_eu_frequency, is_eu_theme, EU_FREQUENCIES, EU_THEMES};
