//! Hospital directory used by the recommendation prompt.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Region and directory text handed to the model as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct HospitalConfig {
    /// Area the recommendations should cover, e.g. "Gulbarga (Kalaburagi)"
    #[validate(length(max = 200_u64, message = "must be at most 200 characters"))]
    #[serde(default)]
    pub region: String,
    /// Free-form listing of hospitals (names, specialties, costs); empty lets the model choose
    #[serde(default)]
    pub directory: String,
}

impl HospitalConfig {
    pub fn region(&self) -> Option<&str> {
        Some(self.region.trim()).filter(|r| !r.is_empty())
    }

    pub fn directory(&self) -> Option<&str> {
        Some(self.directory.trim()).filter(|d| !d.is_empty())
    }
}
