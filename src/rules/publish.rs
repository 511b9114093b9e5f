//! Broken because unpublished: the path is in the index but only as a draft
//! or with unpublished modifications.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Rule, RuleBase};
use crate::client::AemAuthorClient;
use crate::domain::{ContentStatus, Suggestion};
use crate::error::RepairResult;
use crate::index::PathIndex;

#[derive(Debug, Clone, Default)]
pub struct PublishRule {
    base: RuleBase,
}

impl PublishRule {
    pub fn new(priority: i32, aem_author_client: Option<Arc<dyn AemAuthorClient>>) -> Self {
        Self {
            base: RuleBase::new(priority, aem_author_client),
        }
    }
}

#[async_trait]
impl Rule for PublishRule {
    fn name(&self) -> &'static str {
        "PublishRule"
    }

    fn priority(&self) -> i32 {
        self.base.priority()
    }

    async fn apply_rule(&self, broken_path: &str, index: &PathIndex) -> RepairResult<Option<Suggestion>> {
        let Some(content) = index.find(broken_path) else {
            return Ok(None);
        };
        if !matches!(content.status, ContentStatus::Draft | ContentStatus::Modified) {
            return Ok(None);
        }

        Ok(Some(
            Suggestion::publish(broken_path, &content.path)
                .with_rule(self.name())
                .with_reason(format!("content exists with status {}", content.status)),
        ))
    }
}
