//! Compiler configuration.

use crate::enforcement::violations::DuplicatePolicy;
use serde::{Deserialize, Serialize};

/// Settings applied to a whole compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Handling of duplicate ids/events and extra invoke blocks
    pub duplicates: DuplicatePolicy,
}

impl CompileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}
