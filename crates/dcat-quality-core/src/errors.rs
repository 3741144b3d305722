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

use std::fmt;

use thiserror::Error;

use crate::parser::ReplyTag;

/// Base error type for quality assessment operations
#[derive(Debug, Error)]
pub enum QualityError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed LLM reply: {0}")]
    MalformedReply(#[from] MalformedReply),

    #[error("Template {template} requires a value for placeholder {{{placeholder}}}")]
    MissingPlaceholder { template: String, placeholder: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Transport-level failures while talking to the completion endpoint
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limit exceeded: {message}")]
    RateLimit { message: String },

    #[error("LLM refused to generate a response: {message}")]
    Refusal { message: String },

    #[error("LLM returned an empty response: {message}")]
    EmptyResponse { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid model configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Timeout error: {message}")]
    Timeout { message: String },

    #[error("Malformed response body: {message}")]
    MalformedBody { message: String },
}

/// A score tag whose content is not an integer between 1 and 5
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidScore {
    pub tag: ReplyTag,
    pub value: String,
}

impl fmt::Display for InvalidScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> = {:?}", self.tag.name(), self.value)
    }
}

/// The completion endpoint answered, but not in the requested tag format.
///
/// Missing tags are checked first; score validation only runs once all
/// eight tags were found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReply {
    #[error("missing tags: {}", join_tags(.tags))]
    MissingTags { tags: Vec<ReplyTag> },

    #[error("invalid scores: {}", join_scores(.scores))]
    InvalidScores { scores: Vec<InvalidScore> },
}

impl MalformedReply {
    /// Tags responsible for the failure, in vocabulary order
    pub fn tags(&self) -> Vec<ReplyTag> {
        match self {
            MalformedReply::MissingTags { tags } => tags.clone(),
            MalformedReply::InvalidScores { scores } => scores.iter().map(|s| s.tag).collect(),
        }
    }
}

fn join_tags(tags: &[ReplyTag]) -> String {
    tags.iter()
        .map(|t| format!("<{}>", t.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_scores(scores: &[InvalidScore]) -> String {
    scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for quality assessment operations
pub type QualityResult<T> = Result<T, QualityError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tags_message_lists_every_tag() {
        let err = MalformedReply::MissingTags {
            tags: vec![ReplyTag::Methodology, ReplyTag::GeographyScore],
        };
        assert_eq!(
            err.to_string(),
            "missing tags: <methodik>, <geographie-score>"
        );
    }

    #[test]
    fn test_invalid_scores_message_quotes_value() {
        let err = MalformedReply::InvalidScores {
            scores: vec![InvalidScore {
                tag: ReplyTag::ContentScore,
                value: "vier".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "invalid scores: <dateninhalt-score> = \"vier\"");
        assert_eq!(err.tags(), vec![ReplyTag::ContentScore]);
    }

    #[test]
    fn test_missing_placeholder_message() {
        let err = QualityError::MissingPlaceholder {
            template: "metadata_analysis".to_string(),
            placeholder: "title".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Template metadata_analysis requires a value for placeholder {title}"
        );
    }
}
