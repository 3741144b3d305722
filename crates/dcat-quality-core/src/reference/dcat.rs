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

//! DCAT-AP CH 2.0 class definitions for `dcat:Dataset` and `dcat:Distribution`.
//!
//! Derived from <https://www.dcat-ap.ch/releases/2.0/dcat-ap-ch.html>.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DcatClass {
    Dataset,
    Distribution,
}

impl DcatClass {
    pub fn properties(&self) -> &'static [DcatProperty] {
        match self {
            DcatClass::Dataset => DATASET_PROPERTIES,
            DcatClass::Distribution => DISTRIBUTION_PROPERTIES,
        }
    }

    /// Properties with obligation [`Obligation::Mandatory`]
    pub fn mandatory(&self) -> impl Iterator<Item = &'static DcatProperty> {
        self.properties()
            .iter()
            .filter(|p| p.obligation == Obligation::Mandatory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Obligation {
    Mandatory,
    Recommended,
    Optional,
}

impl Obligation {
    /// Single-letter code used in the DCAT-AP tables
    pub fn code(&self) -> char {
        match self {
            Obligation::Mandatory => 'M',
            Obligation::Recommended => 'R',
            Obligation::Optional => 'O',
        }
    }
}

/// Allowed number of values; `max == None` means unbounded (`n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cardinality {
    pub min: u32,
    pub max: Option<u32>,
}

impl Cardinality {
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    pub fn allows(&self, count: usize) -> bool {
        let count = count as u64;
        count >= u64::from(self.min) && self.max.map_or(true, |max| count <= u64::from(max))
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..n", self.min),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DcatProperty {
    pub label: &'static str,
    pub predicate: &'static str,
    pub range: &'static str,
    pub obligation: Obligation,
    pub cardinality: Cardinality,
}

const fn prop(
    label: &'static str,
    predicate: &'static str,
    range: &'static str,
    obligation: Obligation,
    cardinality: Cardinality,
) -> DcatProperty {
    DcatProperty {
        label,
        predicate,
        range,
        obligation,
        cardinality,
    }
}

use self::Obligation::{Mandatory as M, Optional as O, Recommended as R};

const ONE_ONE: Cardinality = Cardinality::new(1, Some(1));
const ONE_N: Cardinality = Cardinality::new(1, None);
const ZERO_ONE: Cardinality = Cardinality::new(0, Some(1));
const ZERO_THREE: Cardinality = Cardinality::new(0, Some(3));
const ZERO_N: Cardinality = Cardinality::new(0, None);

const TYPED_DATE: &str =
    "rdfs:Literal (typed as xsd:date, xsd:dateTime, xsd:gYear or xsd:gYearMonth)";

pub static DATASET_PROPERTIES: &[DcatProperty] = &[
    prop("contact point", "dcat:contactPoint", "vcard:Kind", M, ONE_N),
    prop("description", "dct:description", "rdfs:Literal", M, ONE_N),
    prop("identifier", "dct:identifier", "rdfs:Literal", M, ONE_N),
    prop("publisher", "dct:publisher", "foaf:Agent", M, ONE_ONE),
    prop("Title", "dct:title", "rdfs:Literal", M, ONE_N),
    prop("dataset distribution", "dcat:distribution", "dcat:Distribution", R, ZERO_N),
    prop("keyword/tag", "dcat:keyword", "rdfs:Literal", R, ZERO_N),
    prop("landing page", "dcat:landingPage", "foaf:Document", R, ZERO_N),
    prop("release date", "dct:issued", TYPED_DATE, R, ZERO_ONE),
    prop("spatial/ geographical coverage", "dct:spatial", "dct:Location", R, ZERO_N),
    prop("temporal coverage", "dct:temporal", "dct:PeriodOfTime", R, ZERO_N),
    prop("theme/category", "dcat:theme", "skos:Concept", R, ZERO_N),
    prop("update/ modification date", "dct:modified", TYPED_DATE, R, ZERO_ONE),
    prop("access rights", "dct:accessRights", "dct:RightsStatement", O, ZERO_ONE),
    prop("conforms to", "dct:conformsTo", "dct:Standard", O, ZERO_N),
    prop("documentation", "foaf:page", "foaf:Document", O, ZERO_N),
    prop("frequency", "dct:accrualPeriodicity", "dct:Frequency", O, ZERO_ONE),
    prop("image", "schema:image", "schema:url or schema:ImageObject", O, ZERO_THREE),
    prop("is referenced by", "dct:isReferencedBy", "rdfs:Resource", O, ZERO_N),
    prop("language", "dct:language", "dct:LinguisticSystem", O, ZERO_N),
    prop("qualified attribution", "prov:qualifiedAttribution", "prov:Attribution", O, ZERO_N),
    prop("qualified relation", "dcat:qualifiedRelation", "dcat:Relationship", O, ZERO_N),
    prop("related resource", "dct:relation", "rdfs:Resource", O, ZERO_N),
];

pub static DISTRIBUTION_PROPERTIES: &[DcatProperty] = &[
    prop("access URL", "dcat:accessURL", "rdfs:Resource", M, ONE_N),
    prop("licence", "dct:license", "dct:LicenseDocument", M, ONE_ONE),
    prop("availability", "dcatap:availability", "skos:Concept", R, ZERO_ONE),
    prop("description", "dct:description", "rdfs:Literal", R, ZERO_N),
    prop("format", "dct:format", "dct:MediaTypeOrExtent", R, ZERO_ONE),
    prop("rights", "dct:rights", "dct:RightsStatement", R, ZERO_ONE),
    prop("title", "dct:title", "rdfs:Literal", R, ZERO_N),
    prop("update/ modification date", "dct:modified", TYPED_DATE, R, ZERO_ONE),
    prop("access service", "dcat:accessService", "dcat:DataService", O, ZERO_N),
    prop("byte size", "dcat:byteSize", "rdfs:Literal (typed as xsd:decimal)", O, ZERO_ONE),
    prop("checksum", "spdx:checksum", "spdx:Checksum", O, ZERO_ONE),
    prop("coverage", "dct:coverage", "LocationPeriodOrJurisdiction", O, ZERO_N),
    prop("documentation", "foaf:page", "foaf:Document", O, ZERO_N),
    prop("download URL", "dcat:downloadURL", "rdfs:Resource", O, ZERO_N),
    prop("identifier", "dct:identifier", "rdfs:Literal", O, ZERO_ONE),
    prop("image", "schema:image", "schema:url or schema:ImageObject", O, ZERO_THREE),
    prop("language", "dct:language", "dct:LinguisticSystem", O, ZERO_N),
    prop("conforms to", "dct:conformsTo", "dct:Standard", O, ZERO_N),
    prop("media type", "dcat:mediaType", "dct:MediaType", O, ZERO_ONE),
    prop("packaging format", "dcat:packageFormat", "dcat:mediaType", O, ZERO_ONE),
    prop("release date", "dct:issued", TYPED_DATE, R, ZERO_ONE),
    prop("temporal resolution", "dcat:temporalResolution", "xsd:duration", R, ZERO_ONE),
];

/// Look up a `dcat:Dataset` property by predicate, e.g. `dct:title`
pub fn dataset_property(predicate: &str) -> Option<&'static DcatProperty> {
    DATASET_PROPERTIES.iter().find(|p| p.predicate == predicate)
}

/// Look up a `dcat:Distribution` property by predicate
pub fn distribution_property(predicate: &str) -> Option<&'static DcatProperty> {
    DISTRIBUTION_PROPERTIES
        .iter()
        .find(|p| p.predicate == predicate)
}
