//! Validated analysis input.

use serde::Serialize;

use crate::{Result, TrollGuardError};

/// A single piece of text submitted for tone analysis.
///
/// Always non-empty: surrounding whitespace is trimmed on construction and
/// blank input is rejected before any classifier is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalysisInput(String);

impl AnalysisInput {
    /// Trim `text` and wrap it, rejecting empty or whitespace-only input.
    pub fn new(text: impl AsRef<str>) -> Result<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TrollGuardError::InvalidInput(
                "please enter some text".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AnalysisInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
