//! `cf-repair` — broken content-fragment reference repair.
//!
//! Given a listing of the content paths that exist in an AEM author
//! environment and a list of references that failed to resolve, proposes a
//! fix for each broken reference.
//!
//! # Rules
//!
//! - `PublishRule` — the content exists but is draft or modified
//! - `LocaleFallbackRule` — the same file exists under a sibling locale
//! - `SimilarPathRule` — a near-identical path exists (Levenshtein)
//! - `ParentFolderRule` — a misspelled folder, resolved via the author client
//!
//! # Architecture
//!
//! ```text
//! listing ─→ PathIndex (trie) ─────────────┐
//!                                          ↓
//! broken paths ─→ RuleEngine ─→ Rule chain (by priority) ─→ Suggestion
//!                                          ↑ (optional)
//!                                   AemAuthorClient
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod index;
pub mod levenshtein;
pub mod rules;
pub mod util;

pub use client::{AemAuthorClient, StaticAemAuthorClient};
pub use config::RepairConfig;
pub use domain::{ContentPath, ContentStatus, Locale, LocaleType, Suggestion, SuggestionType};
pub use engine::RuleEngine;
pub use error::{RepairError, RepairResult};
pub use index::PathIndex;
pub use rules::{BaseRule, Rule};
