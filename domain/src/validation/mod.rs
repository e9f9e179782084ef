//! Input validation: product idea vs. chit-chat.
//!
//! The validation stage has two halves. [`filler`] is the local fast path
//! that answers single filler words without a model call; [`ValidationVerdict`]
//! is the typed result of either path.

pub mod filler;

use crate::extraction::{ExtractionError, extract_json};
use serde::{Deserialize, Serialize};

/// Reply used when the model does not supply one for a valid idea
const DEFAULT_VALID_REPLY: &str = "valid";

/// Classification of a raw idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    /// Reply shown to the user when the idea is not valid
    pub canned_reply: String,
    pub reasoning: String,
}

impl ValidationVerdict {
    /// Verdict that lets the pipeline proceed
    pub fn proceed(reasoning: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            canned_reply: DEFAULT_VALID_REPLY.to_string(),
            reasoning: reasoning.into(),
        }
    }

    /// Verdict that stops the pipeline with a reply
    pub fn reject(reply: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            canned_reply: reply.into(),
            reasoning: reasoning.into(),
        }
    }

    /// Parse the classifier's `{isValid, reasoning, response}` reply.
    ///
    /// `isValid` counts only when it is literally `true`; a string `"true"`
    /// or a missing field is a rejection. Missing `response`/`reasoning`
    /// fall back to defaults.
    pub fn from_model_output(raw: &str) -> Result<Self, ExtractionError> {
        let value = extract_json(raw)?;
        if !value.is_object() {
            return Err(ExtractionError::new(
                "Expected a JSON object with an isValid field",
                raw,
            ));
        }

        let is_valid = value.get("isValid").and_then(|v| v.as_bool()) == Some(true);
        let reply = value
            .get("response")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_VALID_REPLY);
        let reasoning = value
            .get("reasoning")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("No reasoning provided");

        Ok(Self {
            is_valid,
            canned_reply: reply.to_string(),
            reasoning: reasoning.to_string(),
        })
    }
}
