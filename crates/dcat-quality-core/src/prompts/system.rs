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

//! System instructions sent ahead of every prompt

use serde::{Deserialize, Serialize};

pub const GENERIC_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

pub const STATISTICS_OFFICE_SYSTEM_MESSAGE: &str = "Du bist ein hilfreicher Assistent für ein Statistikamt. Du wirst gebeten, Metadaten für einen Datensatz zu analysieren. Bleibe stets wahrheitsgemäß und objektiv. Schreib nur das, was du anhand der vom Benutzer bereitgestellten Metadaten sicher feststellen kannst. Mache keine Annahmen. Schreibe einfach und klar. Schreibe immer in deutscher Sprache.";

/// Which system instruction the gateway sends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemPersona {
    #[default]
    Generic,
    StatisticsOffice,
}

impl SystemPersona {
    pub fn message(&self) -> &'static str {
        match self {
            SystemPersona::Generic => GENERIC_SYSTEM_MESSAGE,
            SystemPersona::StatisticsOffice => STATISTICS_OFFICE_SYSTEM_MESSAGE,
        }
    }
}
