//! Fuzzy path matching.
//!
//! First tries the cheap fix of collapsing doubled slashes. Otherwise
//! candidates are taken from the narrowest scope that has any:
//!
//! 1. stored paths in the broken path's parent folder, compared by file name
//! 2. stored paths under the broken path's locale folder, compared by the
//!    path below that folder
//! 3. every stored path, compared by the whole path
//!
//! Comparison is case-insensitive. The closest candidate is accepted if its
//! Levenshtein distance is at most `ceil(len(key) * max_relative_distance)`,
//! where `key` is the broken path's compared part. Deleted and archived
//! entries are never candidates.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{Rule, RuleBase};
use crate::client::AemAuthorClient;
use crate::domain::{ContentPath, Locale, Suggestion};
use crate::error::RepairResult;
use crate::index::PathIndex;
use crate::levenshtein;
use crate::util::path;

/// Default accepted distance relative to the compared part's length.
pub const DEFAULT_MAX_RELATIVE_DISTANCE: f64 = 0.6;

/// Where candidates came from, and therefore which part of a path is scored.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Folder,
    /// Locale folder, with a trailing `/`.
    Under(String),
    Everywhere,
}

impl Scope {
    fn key<'p>(&self, full: &'p str) -> &'p str {
        match self {
            Self::Folder => path::name(full),
            Self::Under(root) => full.strip_prefix(root.as_str()).unwrap_or(full),
            Self::Everywhere => full.trim_start_matches('/'),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimilarPathRule {
    base: RuleBase,
    max_relative_distance: f64,
}

impl Default for SimilarPathRule {
    fn default() -> Self {
        Self {
            base: RuleBase::default(),
            max_relative_distance: DEFAULT_MAX_RELATIVE_DISTANCE,
        }
    }
}

impl SimilarPathRule {
    pub fn new(priority: i32, aem_author_client: Option<Arc<dyn AemAuthorClient>>) -> Self {
        Self {
            base: RuleBase::new(priority, aem_author_client),
            max_relative_distance: DEFAULT_MAX_RELATIVE_DISTANCE,
        }
    }

    #[must_use]
    pub fn with_max_relative_distance(mut self, ratio: f64) -> Self {
        self.max_relative_distance = ratio;
        self
    }

    /// Largest distance accepted for a compared part of `key`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn threshold(&self, key: &str) -> usize {
        (key.chars().count() as f64 * self.max_relative_distance).ceil() as usize
    }

    fn candidates<'i>(&self, broken_path: &str, index: &'i PathIndex) -> (Scope, Vec<&'i ContentPath>) {
        let usable = |cp: &&ContentPath| cp.path != broken_path && cp.is_suggestible();

        let siblings: Vec<&ContentPath> = path::parent(broken_path)
            .map(|parent| index.find_children(parent))
            .unwrap_or_default()
            .into_iter()
            .filter(usable)
            .collect();
        if !siblings.is_empty() {
            return (Scope::Folder, siblings);
        }

        if let Some(root) = Locale::from_path(broken_path)
            .and_then(|locale| locale.root_in_path(broken_path).map(|r| format!("{r}/")))
        {
            let localized: Vec<&ContentPath> = index
                .find_paths_with_prefix(&root)
                .into_iter()
                .filter(usable)
                .collect();
            if !localized.is_empty() {
                return (Scope::Under(root), localized);
            }
        }

        (Scope::Everywhere, index.paths().into_iter().filter(usable).collect())
    }
}

#[async_trait]
impl Rule for SimilarPathRule {
    fn name(&self) -> &'static str {
        "SimilarPathRule"
    }

    fn priority(&self) -> i32 {
        self.base.priority()
    }

    async fn apply_rule(&self, broken_path: &str, index: &PathIndex) -> RepairResult<Option<Suggestion>> {
        if path::has_double_slashes(broken_path) {
            let collapsed = path::collapse_slashes(broken_path);
            if let Some(found) = index
                .find(&collapsed)
                .filter(|cp| cp.path == collapsed && cp.is_suggestible())
            {
                return Ok(Some(
                    Suggestion::similar(broken_path, &found.path)
                        .with_rule(self.name())
                        .with_reason("collapsed double slashes"),
                ));
            }
        }

        let (scope, candidates) = self.candidates(broken_path, index);
        let target = scope.key(broken_path).to_lowercase();
        let best = candidates
            .into_iter()
            .map(|cp| (levenshtein::distance(&target, &scope.key(&cp.path).to_lowercase()), cp))
            .min_by_key(|(distance, _)| *distance);

        let Some((distance, found)) = best else {
            return Ok(None);
        };
        let threshold = self.threshold(scope.key(broken_path));
        if distance > threshold {
            debug!(
                path = broken_path,
                nearest = %found.path,
                distance,
                threshold,
                "nearest path too far"
            );
            return Ok(None);
        }

        Ok(Some(
            Suggestion::similar(broken_path, &found.path)
                .with_rule(self.name())
                .with_reason(format!("levenshtein distance {distance}")),
        ))
    }
}
