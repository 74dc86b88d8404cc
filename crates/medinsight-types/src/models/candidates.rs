//! Ordered, deduplicated list of candidate model identifiers.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Model identifiers in preference order, most-desired first.
///
/// Duplicates are collapsed on construction, keeping the first occurrence.
/// Blank identifiers are dropped. Never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ModelCandidates(Vec<String>);

impl ModelCandidates {
    pub fn new<I, S>(ids: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut models: Vec<String> = Vec::new();
        for id in ids {
            let id = id.as_ref().trim();
            if id.is_empty() || models.iter().any(|m| m == id) {
                continue;
            }
            models.push(id.to_string());
        }

        if models.is_empty() {
            return Err(ReportError::NoCandidates);
        }
        Ok(Self(models))
    }

    /// Put `preferred` in front of `fallbacks`.
    pub fn with_preferred<S: AsRef<str>>(
        preferred: &str,
        fallbacks: &[S],
    ) -> Result<Self, ReportError> {
        Self::new(std::iter::once(preferred).chain(fallbacks.iter().map(AsRef::as_ref)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }
}

impl TryFrom<Vec<String>> for ModelCandidates {
    type Error = ReportError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelCandidates> for Vec<String> {
    fn from(value: ModelCandidates) -> Self {
        value.0
    }
}
