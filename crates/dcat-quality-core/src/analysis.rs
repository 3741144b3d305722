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

//! Typed result of a single-dataset metadata analysis

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Evaluation dimension of a dataset's title and description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// "Dateninhalt": what the dataset is about
    Content,
    /// "Methodik": how and why the data was collected
    Methodology,
    /// "Datenqualität": completeness and changes in collection
    DataQuality,
    /// "Geographie": which places or areas the data covers
    Geography,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Content,
        Dimension::Methodology,
        Dimension::DataQuality,
        Dimension::Geography,
    ];

    /// German label used in the prompt rubric
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Content => "Dateninhalt",
            Dimension::Methodology => "Methodik",
            Dimension::DataQuality => "Datenqualität",
            Dimension::Geography => "Geographie",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rubric score, 1 (no information) to 5 (excellent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub fn new(value: u8) -> Option<Self> {
        (MIN_SCORE..=MAX_SCORE).contains(&value).then_some(Self(value))
    }

    /// Parse the trimmed text of a score tag. Only a bare integer is accepted.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Score::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "score {} outside {}..={}",
                value, MIN_SCORE, MAX_SCORE
            ))
        })
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commentary and score for one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub commentary: String,
    pub score: Score,
}

/// Fully populated analysis of one dataset.
///
/// Only the reply parser constructs this; a value always carries all four
/// dimensions with validated scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAnalysis {
    content: Assessment,
    methodology: Assessment,
    data_quality: Assessment,
    geography: Assessment,
}

impl ScoredAnalysis {
    pub(crate) fn new(
        content: Assessment,
        methodology: Assessment,
        data_quality: Assessment,
        geography: Assessment,
    ) -> Self {
        Self {
            content,
            methodology,
            data_quality,
            geography,
        }
    }

    pub fn get(&self, dimension: Dimension) -> &Assessment {
        match dimension {
            Dimension::Content => &self.content,
            Dimension::Methodology => &self.methodology,
            Dimension::DataQuality => &self.data_quality,
            Dimension::Geography => &self.geography,
        }
    }

    pub fn content(&self) -> &Assessment {
        &self.content
    }

    pub fn methodology(&self) -> &Assessment {
        &self.methodology
    }

    pub fn data_quality(&self) -> &Assessment {
        &self.data_quality
    }

    pub fn geography(&self) -> &Assessment {
        &self.geography
    }

    /// Mean of the four scores
    pub fn mean_score(&self) -> f32 {
        let total: u32 = Dimension::ALL
            .iter()
            .map(|d| u32::from(self.get(*d).score.value()))
            .sum();
        total as f32 / Dimension::ALL.len() as f32
    }

    /// Dimensions scored at or below `threshold`
    pub fn weak_dimensions(&self, threshold: u8) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.get(*d).score.value() <= threshold)
            .collect()
    }

    pub fn to_row(&self) -> AnalysisRow {
        AnalysisRow {
            content: self.content.commentary.clone(),
            content_score: self.content.score.value(),
            context: self.methodology.commentary.clone(),
            context_score: self.methodology.score.value(),
            quality: self.data_quality.commentary.clone(),
            quality_score: self.data_quality.score.value(),
            spacial: self.geography.commentary.clone(),
            spacial_score: self.geography.score.value(),
        }
    }
}

/// Flat tabular form of a [`ScoredAnalysis`]. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub content: String,
    pub content_score: u8,
    pub context: String,
    pub context_score: u8,
    pub quality: String,
    pub quality_score: u8,
    pub spacial: String,
    pub spacial_score: u8,
}

impl AnalysisRow {
    pub const COLUMNS: [&'static str; 8] = [
        "content",
        "content_score",
        "context",
        "context_score",
        "quality",
        "quality_score",
        "spacial",
        "spacial_score",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(text: &str, score: u8) -> Assessment {
        Assessment {
            commentary: text.to_string(),
            score: Score::new(score).unwrap(),
        }
    }

    fn sample() -> ScoredAnalysis {
        ScoredAnalysis::new(
            assessment("Gut.", 4),
            assessment("Keine Angaben zur Erhebung.", 1),
            assessment("Teilweise.", 3),
            assessment("Kanton Zürich.", 5),
        )
    }

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(0).is_none());
        assert!(Score::new(6).is_none());
        assert_eq!(Score::new(1).map(|s| s.value()), Some(1));
        assert_eq!(Score::new(5).map(|s| s.value()), Some(5));
    }

    #[test]
    fn test_score_parse_is_strict() {
        assert_eq!(Score::parse(" 4\n").map(|s| s.value()), Some(4));
        assert!(Score::parse("4 Punkte").is_none());
        assert!(Score::parse("4.5").is_none());
        assert!(Score::parse("-1").is_none());
        assert!(Score::parse("").is_none());
    }

    #[test]
    fn test_score_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Score>("3").is_ok());
        assert!(serde_json::from_str::<Score>("9").is_err());
    }

    #[test]
    fn test_row_keeps_column_order() {
        let json = serde_json::to_string(&sample().to_row()).unwrap();
        let mut last = 0;
        for column in AnalysisRow::COLUMNS {
            let pos = json.find(&format!("\"{}\"", column)).unwrap();
            assert!(pos >= last, "column {} out of order", column);
            last = pos;
        }
    }

    #[test]
    fn test_mean_and_weak_dimensions() {
        let analysis = sample();
        assert!((analysis.mean_score() - 3.25).abs() < f32::EPSILON);
        assert_eq!(
            analysis.weak_dimensions(3),
            vec![Dimension::Methodology, Dimension::DataQuality]
        );
    }
}
