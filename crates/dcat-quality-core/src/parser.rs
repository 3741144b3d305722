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

//! Extraction of tagged sections from an analysis reply
//!
//! The analysis prompt asks the model to wrap each commentary and each score
//! in a fixed XML-like tag. Tag names are German and matched byte-exact; the
//! prompt templates depend on the same spelling.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{Assessment, Dimension, Score, ScoredAnalysis};
use crate::errors::{InvalidScore, MalformedReply};

/// One of the eight tags an analysis reply must contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplyTag {
    Content,
    ContentScore,
    Methodology,
    MethodologyScore,
    DataQuality,
    DataQualityScore,
    Geography,
    GeographyScore,
}

impl ReplyTag {
    /// All tags in output column order
    pub const ALL: [ReplyTag; 8] = [
        ReplyTag::Content,
        ReplyTag::ContentScore,
        ReplyTag::Methodology,
        ReplyTag::MethodologyScore,
        ReplyTag::DataQuality,
        ReplyTag::DataQualityScore,
        ReplyTag::Geography,
        ReplyTag::GeographyScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReplyTag::Content => "dateninhalt",
            ReplyTag::ContentScore => "dateninhalt-score",
            ReplyTag::Methodology => "methodik",
            ReplyTag::MethodologyScore => "methodik-score",
            ReplyTag::DataQuality => "datenqualität",
            ReplyTag::DataQualityScore => "datenqualität-score",
            ReplyTag::Geography => "geographie",
            ReplyTag::GeographyScore => "geographie-score",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            ReplyTag::Content | ReplyTag::ContentScore => Dimension::Content,
            ReplyTag::Methodology | ReplyTag::MethodologyScore => Dimension::Methodology,
            ReplyTag::DataQuality | ReplyTag::DataQualityScore => Dimension::DataQuality,
            ReplyTag::Geography | ReplyTag::GeographyScore => Dimension::Geography,
        }
    }

    pub fn is_score(&self) -> bool {
        matches!(
            self,
            ReplyTag::ContentScore
                | ReplyTag::MethodologyScore
                | ReplyTag::DataQualityScore
                | ReplyTag::GeographyScore
        )
    }

    fn pattern(&self) -> &'static Regex {
        &TAG_PATTERNS[self]
    }
}

impl fmt::Display for ReplyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

static TAG_PATTERNS: Lazy<HashMap<ReplyTag, Regex>> = Lazy::new(|| {
    ReplyTag::ALL
        .iter()
        .map(|tag| {
            let name = regex::escape(tag.name());
            let pattern = format!(r"(?s)<{name}>(.*?)</{name}>");
            // Tag names are fixed literals, so the pattern is always valid.
            let regex = Regex::new(&pattern).expect("tag pattern compiles");
            (*tag, regex)
        })
        .collect()
});

/// Trimmed text between the first `<tag>` and the next `</tag>`.
///
/// Later occurrences of the same tag are ignored.
pub fn extract_tag<'a>(reply: &'a str, tag: ReplyTag) -> Option<&'a str> {
    tag.pattern()
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// The eight raw sections of a reply, before score validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplySections {
    pub content: String,
    pub content_score: String,
    pub context: String,
    pub context_score: String,
    pub quality: String,
    pub quality_score: String,
    pub spacial: String,
    pub spacial_score: String,
}

impl ReplySections {
    pub fn get(&self, tag: ReplyTag) -> &str {
        match tag {
            ReplyTag::Content => &self.content,
            ReplyTag::ContentScore => &self.content_score,
            ReplyTag::Methodology => &self.context,
            ReplyTag::MethodologyScore => &self.context_score,
            ReplyTag::DataQuality => &self.quality,
            ReplyTag::DataQualityScore => &self.quality_score,
            ReplyTag::Geography => &self.spacial,
            ReplyTag::GeographyScore => &self.spacial_score,
        }
    }
}

/// Extract all eight sections or fail naming every missing tag
pub fn extract_sections(reply: &str) -> Result<ReplySections, MalformedReply> {
    let mut found = HashMap::with_capacity(ReplyTag::ALL.len());
    let mut missing = Vec::new();

    for tag in ReplyTag::ALL {
        match extract_tag(reply, tag) {
            Some(text) => {
                found.insert(tag, text.to_string());
            }
            None => missing.push(tag),
        }
    }

    if !missing.is_empty() {
        return Err(MalformedReply::MissingTags { tags: missing });
    }

    let mut take = |tag: ReplyTag| found.remove(&tag).unwrap_or_default();
    Ok(ReplySections {
        content: take(ReplyTag::Content),
        content_score: take(ReplyTag::ContentScore),
        context: take(ReplyTag::Methodology),
        context_score: take(ReplyTag::MethodologyScore),
        quality: take(ReplyTag::DataQuality),
        quality_score: take(ReplyTag::DataQualityScore),
        spacial: take(ReplyTag::Geography),
        spacial_score: take(ReplyTag::GeographyScore),
    })
}

impl TryFrom<ReplySections> for ScoredAnalysis {
    type Error = MalformedReply;

    fn try_from(sections: ReplySections) -> Result<Self, Self::Error> {
        let mut invalid = Vec::new();
        let mut scores = HashMap::with_capacity(Dimension::ALL.len());

        for tag in ReplyTag::ALL.into_iter().filter(ReplyTag::is_score) {
            let text = sections.get(tag);
            match Score::parse(text) {
                Some(score) => {
                    scores.insert(tag.dimension(), score);
                }
                None => invalid.push(InvalidScore {
                    tag,
                    value: text.to_string(),
                }),
            }
        }

        if !invalid.is_empty() {
            return Err(MalformedReply::InvalidScores { scores: invalid });
        }

        let assessment = |commentary: String, dimension: Dimension| Assessment {
            commentary,
            score: scores[&dimension],
        };

        Ok(ScoredAnalysis::new(
            assessment(sections.content, Dimension::Content),
            assessment(sections.context, Dimension::Methodology),
            assessment(sections.quality, Dimension::DataQuality),
            assessment(sections.spacial, Dimension::Geography),
        ))
    }
}

/// Parse a complete analysis reply into a validated [`ScoredAnalysis`]
pub fn parse_analysis(reply: &str) -> Result<ScoredAnalysis, MalformedReply> {
    let sections = extract_sections(reply)?;
    let analysis = ScoredAnalysis::try_from(sections)?;
    debug!("Parsed analysis with mean score {:.2}", analysis.mean_score());
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Hier ist meine Analyse.

<dateninhalt>Gut.</dateninhalt>
<methodik>
  Es gibt keine Informationen darüber, wie die Daten gemessen wurden.
  Die Quelle fehlt.
</methodik>
<datenqualität> Keine Angaben zur Vollständigkeit. </datenqualität>
<geographie>Kanton Zürich</geographie>

<dateninhalt-score>4</dateninhalt-score>
<methodik-score> 1 </methodik-score>
<datenqualität-score>2</datenqualität-score>
<geographie-score>
5
</geographie-score>";

    fn without(tag: ReplyTag) -> String {
        let open = format!("<{}>", tag.name());
        let close = format!("</{}>", tag.name());
        let start = WELL_FORMED.find(&open).unwrap();
        let end = WELL_FORMED.find(&close).unwrap() + close.len();
        format!("{}{}", &WELL_FORMED[..start], &WELL_FORMED[end..])
    }

    #[test]
    fn test_extracts_all_sections_trimmed() {
        let sections = extract_sections(WELL_FORMED).unwrap();
        assert_eq!(sections.content, "Gut.");
        assert_eq!(sections.content_score, "4");
        assert_eq!(
            sections.context,
            "Es gibt keine Informationen darüber, wie die Daten gemessen wurden.\n  Die Quelle fehlt."
        );
        assert_eq!(sections.context_score, "1");
        assert_eq!(sections.quality, "Keine Angaben zur Vollständigkeit.");
        assert_eq!(sections.quality_score, "2");
        assert_eq!(sections.spacial, "Kanton Zürich");
        assert_eq!(sections.spacial_score, "5");
    }

    #[test]
    fn test_parse_analysis_builds_scored_record() {
        let analysis = parse_analysis(WELL_FORMED).unwrap();
        assert_eq!(analysis.content().commentary, "Gut.");
        assert_eq!(analysis.content().score.value(), 4);
        assert_eq!(analysis.methodology().score.value(), 1);
        assert_eq!(analysis.data_quality().score.value(), 2);
        assert_eq!(analysis.geography().commentary, "Kanton Zürich");
        assert_eq!(analysis.geography().score.value(), 5);
    }

    #[test]
    fn test_each_missing_tag_fails_whole_record() {
        for tag in ReplyTag::ALL {
            let reply = without(tag);
            assert_eq!(
                parse_analysis(&reply),
                Err(MalformedReply::MissingTags { tags: vec![tag] }),
                "removing {} should fail the record",
                tag
            );
        }
    }

    #[test]
    fn test_missing_geography_score_yields_no_record() {
        let reply = without(ReplyTag::GeographyScore);
        assert!(extract_sections(&reply).is_err());
        assert!(parse_analysis(&reply).is_err());
    }

    #[test]
    fn test_reports_every_missing_tag() {
        let err = extract_sections("<dateninhalt>Gut.</dateninhalt>").unwrap_err();
        let MalformedReply::MissingTags { tags } = err else {
            panic!("expected missing tags");
        };
        assert_eq!(tags.len(), 7);
        assert!(!tags.contains(&ReplyTag::Content));
        assert_eq!(tags[0], ReplyTag::ContentScore);
    }

    #[test]
    fn test_duplicate_tag_uses_first_occurrence() {
        let reply = format!("{}\n<dateninhalt>Schlecht.</dateninhalt>", WELL_FORMED);
        let analysis = parse_analysis(&reply).unwrap();
        assert_eq!(analysis.content().commentary, "Gut.");
    }

    #[test]
    fn test_match_is_non_greedy() {
        let reply = "<methodik>a</methodik> zwischen <methodik>b</methodik>";
        assert_eq!(extract_tag(reply, ReplyTag::Methodology), Some("a"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let reply = WELL_FORMED.replace("<dateninhalt>Gut.</dateninhalt>", "<Dateninhalt>Gut.</Dateninhalt>");
        assert_eq!(
            extract_sections(&reply),
            Err(MalformedReply::MissingTags {
                tags: vec![ReplyTag::Content]
            })
        );
    }

    #[test]
    fn test_score_tag_does_not_satisfy_text_tag() {
        // "<dateninhalt-score>" must not be read as "<dateninhalt>"
        assert_eq!(extract_tag("<dateninhalt-score>4</dateninhalt-score>", ReplyTag::Content), None);
    }

    #[test]
    fn test_empty_section_is_present() {
        let reply = WELL_FORMED.replace("<dateninhalt>Gut.</dateninhalt>", "<dateninhalt>  </dateninhalt>");
        let analysis = parse_analysis(&reply).unwrap();
        assert_eq!(analysis.content().commentary, "");
    }

    #[test]
    fn test_non_numeric_score_is_distinct_from_missing() {
        let reply = WELL_FORMED.replace(
            "<dateninhalt-score>4</dateninhalt-score>",
            "<dateninhalt-score>4 Punkte</dateninhalt-score>",
        );
        assert!(extract_sections(&reply).is_ok());
        assert_eq!(
            parse_analysis(&reply),
            Err(MalformedReply::InvalidScores {
                scores: vec![InvalidScore {
                    tag: ReplyTag::ContentScore,
                    value: "4 Punkte".to_string(),
                }]
            })
        );
    }

    #[test]
    fn test_out_of_range_scores_are_all_reported() {
        let reply = WELL_FORMED
            .replace("<methodik-score> 1 </methodik-score>", "<methodik-score>0</methodik-score>")
            .replace("<datenqualität-score>2</datenqualität-score>", "<datenqualität-score>6</datenqualität-score>");
        let err = parse_analysis(&reply).unwrap_err();
        assert_eq!(
            err.tags(),
            vec![ReplyTag::MethodologyScore, ReplyTag::DataQualityScore]
        );
    }

    #[test]
    fn test_missing_tags_reported_before_invalid_scores() {
        let reply = without(ReplyTag::Geography).replace(
            "<dateninhalt-score>4</dateninhalt-score>",
            "<dateninhalt-score>x</dateninhalt-score>",
        );
        assert!(matches!(
            parse_analysis(&reply),
            Err(MalformedReply::MissingTags { .. })
        ));
    }
}
