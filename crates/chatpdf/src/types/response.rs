//! Model answers, tagged as generated or failed

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Prefix shown in front of every failed answer
pub const ERROR_MARKER: &str = "Ollama Error: ";

/// Detail used when the service gave no reason for a failure
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Why the model did not produce an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GenerationFailure {
    /// Network failure reaching the service
    ServiceUnavailable(String),
    /// No reply within the configured timeout (seconds)
    Timeout(u64),
    /// Reply without the expected answer field
    MalformedResponse(String),
}

impl GenerationFailure {
    /// Error detail as reported to the user
    pub fn detail(&self) -> String {
        match self {
            Self::ServiceUnavailable(detail) | Self::MalformedResponse(detail) => detail.clone(),
            Self::Timeout(secs) => format!("request timed out after {}s", secs),
        }
    }
}

impl From<Error> for GenerationFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::ServiceUnavailable(detail) => Self::ServiceUnavailable(detail),
            Error::Timeout(secs) => Self::Timeout(secs),
            Error::MalformedResponse(detail) => Self::MalformedResponse(detail),
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}

/// Assistant reply for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Answer {
    /// Model reply, verbatim
    Generated { content: String },
    /// The model call failed; the turn still records it
    Failed { failure: GenerationFailure },
}

impl Answer {
    pub fn generated(content: impl Into<String>) -> Self {
        Self::Generated {
            content: content.into(),
        }
    }

    pub fn failed(failure: GenerationFailure) -> Self {
        Self::Failed { failure }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Text shown in the transcript: the reply itself, or the error marker
    /// followed by the failure detail
    pub fn display_text(&self) -> String {
        match self {
            Self::Generated { content } => content.clone(),
            Self::Failed { failure } => format!("{}{}", ERROR_MARKER, failure.detail()),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_text_is_verbatim() {
        let answer = Answer::generated("  The answer.\n");
        assert!(!answer.is_error());
        assert_eq!(answer.display_text(), "  The answer.\n");
    }

    #[test]
    fn test_failed_text_has_marker() {
        let answer = Answer::failed(GenerationFailure::MalformedResponse("rate limited".to_string()));
        assert!(answer.is_error());
        assert_eq!(answer.display_text(), "Ollama Error: rate limited");

        let answer = Answer::failed(GenerationFailure::MalformedResponse(UNKNOWN_ERROR.to_string()));
        assert_eq!(answer.to_string(), "Ollama Error: Unknown error");
    }

    #[test]
    fn test_failure_from_error() {
        assert_eq!(
            GenerationFailure::from(Error::Timeout(5)),
            GenerationFailure::Timeout(5)
        );
        assert_eq!(
            GenerationFailure::from(Error::ServiceUnavailable("refused".to_string())),
            GenerationFailure::ServiceUnavailable("refused".to_string())
        );
        assert_eq!(
            GenerationFailure::from(Error::MalformedResponse("no message".to_string())),
            GenerationFailure::MalformedResponse("no message".to_string())
        );
        assert!(matches!(
            GenerationFailure::from(Error::internal("boom")),
            GenerationFailure::ServiceUnavailable(_)
        ));
    }
}
