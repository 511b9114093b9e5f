//! Repair rules for broken content-fragment references.
//!
//! Each rule is one repair strategy. The [`RuleEngine`](crate::engine::RuleEngine)
//! tries rules in ascending [`Rule::priority`] order and keeps the first
//! suggestion produced.
//!
//! # Rules
//!
//! 1. [`PublishRule`] — the path exists but is unpublished
//! 2. [`LocaleFallbackRule`] — the same path exists under a sibling locale
//! 3. [`SimilarPathRule`] — a near-identical path exists (Levenshtein)
//! 4. [`ParentFolderRule`] — a folder on the way down is misspelled (needs
//!    an [`AemAuthorClient`])

pub mod locale_fallback;
pub mod parent_folder;
pub mod publish;
pub mod similar_path;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::client::AemAuthorClient;
use crate::config::DEFAULT_RULE_PRIORITY;
use crate::domain::Suggestion;
use crate::error::{RepairError, RepairResult};
use crate::index::PathIndex;

pub use locale_fallback::LocaleFallbackRule;
pub use parent_folder::ParentFolderRule;
pub use publish::PublishRule;
pub use similar_path::SimilarPathRule;

/// A repair strategy.
///
/// Implementors override [`apply_rule`](Rule::apply_rule); callers go through
/// [`apply`](Rule::apply). `Ok(None)` means the rule has no fix for this path.
#[async_trait]
pub trait Rule: Send + Sync {
    /// Name recorded on the suggestions this rule produces.
    fn name(&self) -> &'static str;

    /// Lower priorities are tried first.
    fn priority(&self) -> i32;

    /// Apply the rule to one broken path. Results and errors from
    /// [`apply_rule`](Rule::apply_rule) are passed through unchanged.
    async fn apply(&self, broken_path: &str, index: &PathIndex) -> RepairResult<Option<Suggestion>> {
        self.apply_rule(broken_path, index).await
    }

    /// The strategy itself. The default fails with
    /// [`RepairError::NotImplemented`].
    async fn apply_rule(
        &self,
        _broken_path: &str,
        _index: &PathIndex,
    ) -> RepairResult<Option<Suggestion>> {
        Err(RepairError::NotImplemented)
    }
}

/// State shared by every rule: its priority and the optional author client.
#[derive(Clone)]
pub struct RuleBase {
    priority: i32,
    aem_author_client: Option<Arc<dyn AemAuthorClient>>,
}

impl RuleBase {
    pub fn new(priority: i32, aem_author_client: Option<Arc<dyn AemAuthorClient>>) -> Self {
        Self {
            priority,
            aem_author_client,
        }
    }

    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// The injected author client.
    ///
    /// Fails with [`RepairError::ClientNotInjected`], logged at error level,
    /// when the rule was built without one.
    pub fn aem_author_client(&self) -> RepairResult<&dyn AemAuthorClient> {
        match &self.aem_author_client {
            Some(client) => Ok(&**client),
            None => {
                let err = RepairError::ClientNotInjected;
                error!("{err}");
                Err(err)
            }
        }
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::new(DEFAULT_RULE_PRIORITY, None)
    }
}

impl fmt::Debug for RuleBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBase")
            .field("priority", &self.priority)
            .field("has_aem_author_client", &self.aem_author_client.is_some())
            .finish()
    }
}

/// A rule with no strategy of its own. Applying it always fails with
/// [`RepairError::NotImplemented`].
#[derive(Debug, Clone, Default)]
pub struct BaseRule {
    base: RuleBase,
}

impl BaseRule {
    pub fn new(priority: i32, aem_author_client: Option<Arc<dyn AemAuthorClient>>) -> Self {
        Self {
            base: RuleBase::new(priority, aem_author_client),
        }
    }

    pub fn aem_author_client(&self) -> RepairResult<&dyn AemAuthorClient> {
        self.base.aem_author_client()
    }
}

#[async_trait]
impl Rule for BaseRule {
    fn name(&self) -> &'static str {
        "BaseRule"
    }

    fn priority(&self) -> i32 {
        self.base.priority()
    }
}
