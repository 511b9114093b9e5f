//! AEM author access used by the repair rules and the index loader.
//!
//! Rules only need two capabilities from the author environment: listing the
//! direct children of a folder and checking whether a single path resolves.
//! [`StaticAemAuthorClient`] answers both from an in-memory listing;
//! `HttpAemAuthorClient` (feature `http`) talks to a live author instance.

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;

use crate::domain::{ContentPath, ContentStatus};
use crate::error::RepairResult;
use crate::index::PathIndex;
use crate::util::path::join;

#[cfg(feature = "http")]
pub use http::HttpAemAuthorClient;

/// Author-environment capabilities required by the repair rules.
#[async_trait]
pub trait AemAuthorClient: Send + Sync {
    /// Whether `path` resolves to existing content.
    async fn is_available(&self, path: &str) -> RepairResult<bool>;

    /// Direct children of the folder at `path`.
    async fn get_children_from_path(&self, path: &str) -> RepairResult<Vec<ContentPath>>;
}

/// Client backed by a fixed listing of content paths.
#[derive(Debug, Default)]
pub struct StaticAemAuthorClient {
    index: PathIndex,
}

impl StaticAemAuthorClient {
    pub fn new(listing: impl IntoIterator<Item = ContentPath>) -> Self {
        Self {
            index: listing.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AemAuthorClient for StaticAemAuthorClient {
    /// Deleted and archived entries are listed but not available.
    async fn is_available(&self, path: &str) -> RepairResult<bool> {
        Ok(self.index.find(path).is_some_and(ContentPath::is_suggestible))
    }

    /// Folders are listed alongside stored content, with an unknown status.
    async fn get_children_from_path(&self, path: &str) -> RepairResult<Vec<ContentPath>> {
        let children = self
            .index
            .child_names(path)
            .into_iter()
            .map(|name| {
                let child = join(path, name);
                self.index.find(&child).cloned().unwrap_or_else(|| {
                    ContentPath::new(child, ContentStatus::Unknown, None)
                })
            })
            .collect();
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StaticAemAuthorClient {
        StaticAemAuthorClient::new(
            ["/content/dam/en-US/a.jpg", "/content/dam/en-US/b.jpg", "/content/dam/en-US/x/c.jpg"]
                .into_iter()
                .map(|p| ContentPath::new(p, ContentStatus::Published, None)),
        )
    }

    #[tokio::test]
    async fn test_is_available() {
        let client = client();
        assert!(client.is_available("/content/dam/en-US/a.jpg").await.expect("ok"));
        assert!(!client.is_available("/content/dam/en-US/z.jpg").await.expect("ok"));
    }

    #[tokio::test]
    async fn test_deleted_and_archived_are_unavailable() {
        let client = StaticAemAuthorClient::new([
            ContentPath::new("/content/dam/en-US/gone.jpg", ContentStatus::Deleted, None),
            ContentPath::new("/content/dam/en-US/old.jpg", ContentStatus::Archived, None),
            ContentPath::new("/content/dam/en-US/wip.jpg", ContentStatus::Draft, None),
        ]);
        assert!(!client.is_available("/content/dam/en-US/gone.jpg").await.expect("ok"));
        assert!(!client.is_available("/content/dam/en-US/old.jpg").await.expect("ok"));
        assert!(client.is_available("/content/dam/en-US/wip.jpg").await.expect("ok"));
    }

    #[tokio::test]
    async fn test_children_are_direct_only() {
        let children = client()
            .get_children_from_path("/content/dam/en-US")
            .await
            .expect("ok");
        let paths: Vec<&str> = children.iter().map(|cp| cp.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/content/dam/en-US/a.jpg", "/content/dam/en-US/b.jpg", "/content/dam/en-US/x"]
        );
        assert_eq!(children[0].status, ContentStatus::Published);
        assert_eq!(children[2].status, ContentStatus::Unknown);
    }

    #[tokio::test]
    async fn test_children_of_unknown_folder() {
        let children = client().get_children_from_path("/nope").await.expect("ok");
        assert!(children.is_empty());
    }
}
