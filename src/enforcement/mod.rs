//! Structural checks over sibling fragments.
//!
//! Merging resolves duplicate ids, duplicate events and extra invoke
//! blocks silently by fold order. The checks here make those collisions
//! visible, accumulating ALL of them with Stillwater's `Validation`, and
//! the configured [`DuplicatePolicy`] decides whether they are logged or
//! abort the compilation.
//!
//! # Example
//!
//! ```rust
//! use statechart_markup::enforcement::{CompileConfig, DuplicatePolicy};
//!
//! let config: CompileConfig = serde_json::from_str(r#"{"duplicates": "reject"}"#).unwrap();
//! assert_eq!(config.duplicates, DuplicatePolicy::Reject);
//! ```

pub mod config;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use config::CompileConfig;
pub use rules::{enforce, SiblingCheck, MACHINE_CHECKS, STATE_CHECKS};
pub use violations::{DuplicatePolicy, StructureViolation};
