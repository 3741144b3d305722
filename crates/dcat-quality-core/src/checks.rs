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

//! Rule-based checks of a dataset's structured fields against the DCAT-AP
//! reference tables. These run without the LLM.

use serde::{Deserialize, Serialize};

use crate::catalog::DatasetRecord;
use crate::reference::{is_eu_frequency, is_eu_theme, is_hidden_null, DcatClass};

const THEME_PREDICATE: &str = "dcat:theme";
const FREQUENCY_PREDICATE: &str = "dct:accrualPeriodicity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MissingMandatory,
    Cardinality,
    HiddenNull,
    UnknownVocabularyTerm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub predicate: String,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    fn new(predicate: &str, kind: FindingKind, message: String) -> Self {
        Self {
            predicate: predicate.to_string(),
            kind,
            message,
        }
    }
}

/// Run every rule against a `dcat:Dataset` record
pub fn check_dataset(record: &DatasetRecord) -> Vec<Finding> {
    let mut findings = Vec::new();

    for property in DcatClass::Dataset.properties() {
        let values = record.values(property.predicate);
        let informative: Vec<&str> = values
            .iter()
            .copied()
            .filter(|v| !is_hidden_null(v))
            .collect();

        for value in values.iter().filter(|v| is_hidden_null(v)) {
            findings.push(Finding::new(
                property.predicate,
                FindingKind::HiddenNull,
                format!("{} has uninformative value {:?}", property.label, value),
            ));
        }

        if property.cardinality.min > 0 && informative.is_empty() {
            findings.push(Finding::new(
                property.predicate,
                FindingKind::MissingMandatory,
                format!("mandatory property {} has no value", property.label),
            ));
        } else if !property.cardinality.allows(informative.len()) {
            findings.push(Finding::new(
                property.predicate,
                FindingKind::Cardinality,
                format!(
                    "{} has {} values, allowed {}",
                    property.label,
                    informative.len(),
                    property.cardinality
                ),
            ));
        }
    }

    findings.extend(vocabulary_findings(record, THEME_PREDICATE, is_eu_theme));
    findings.extend(vocabulary_findings(
        record,
        FREQUENCY_PREDICATE,
        is_eu_frequency,
    ));
    findings
}

fn vocabulary_findings(
    record: &DatasetRecord,
    predicate: &str,
    is_known: fn(&str) -> bool,
) -> Vec<Finding> {
    record
        .values(predicate)
        .into_iter()
        .filter(|v| !is_hidden_null(v) && !is_known(v))
        .map(|v| {
            Finding::new(
                predicate,
                FindingKind::UnknownVocabularyTerm,
                format!("{:?} is not in the EU controlled vocabulary", v),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGRI: &str = "http://publications.europa.eu/resource/authority/data-theme/AGRI";
    const ANNUAL: &str = "http://publications.europa.eu/resource/authority/frequency/ANNUAL";

    fn complete_record() -> DatasetRecord {
        DatasetRecord::new("Kühe [Anz.]", "Anzahl Kühe pro Gemeinde")
            .with_property("dcat:contactPoint", "statistik@example.ch")
            .with_property("dct:identifier", "kuehe@kanton")
            .with_property("dct:publisher", "Statistisches Amt")
            .with_property("dcat:theme", AGRI)
            .with_property("dct:accrualPeriodicity", ANNUAL)
    }

    fn kinds(findings: &[Finding]) -> Vec<(&str, FindingKind)> {
        findings
            .iter()
            .map(|f| (f.predicate.as_str(), f.kind))
            .collect()
    }

    #[test]
    fn test_complete_record_has_no_findings() {
        assert!(check_dataset(&complete_record()).is_empty());
    }

    #[test]
    fn test_missing_mandatory_properties() {
        let findings = check_dataset(&DatasetRecord::new("Titel", "Beschreibung"));
        assert_eq!(
            kinds(&findings),
            vec![
                ("dcat:contactPoint", FindingKind::MissingMandatory),
                ("dct:identifier", FindingKind::MissingMandatory),
                ("dct:publisher", FindingKind::MissingMandatory),
            ]
        );
    }

    #[test]
    fn test_hidden_null_description_counts_as_missing() {
        let mut record = complete_record();
        record.description = "Keine Angabe".to_string();
        assert_eq!(
            kinds(&check_dataset(&record)),
            vec![
                ("dct:description", FindingKind::HiddenNull),
                ("dct:description", FindingKind::MissingMandatory),
            ]
        );
    }

    #[test]
    fn test_cardinality_violation() {
        let record = complete_record().with_property("dct:publisher", "Zweites Amt");
        assert_eq!(
            kinds(&check_dataset(&record)),
            vec![("dct:publisher", FindingKind::Cardinality)]
        );
    }

    #[test]
    fn test_unknown_vocabulary_terms() {
        let record = complete_record()
            .with_property("dcat:theme", "Landwirtschaft")
            .with_property("dct:accrualPeriodicity", "jährlich");
        let findings = check_dataset(&record);
        assert_eq!(
            kinds(&findings),
            vec![
                ("dct:accrualPeriodicity", FindingKind::Cardinality),
                ("dcat:theme", FindingKind::UnknownVocabularyTerm),
                ("dct:accrualPeriodicity", FindingKind::UnknownVocabularyTerm),
            ]
        );
    }
}
