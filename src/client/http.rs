//! [`AemAuthorClient`] over the Sites content-fragment HTTP API.
//!
//! ```text
//! GET {base}/adobe/sites/cf/fragments?path=/content/dam/en-US&limit=50&cursor=...
//! Authorization: Bearer <token>
//!
//! { "items": [{ "path": "...", "status": "DRAFT" }], "cursor": "..." }
//! ```
//!
//! The endpoint returns every fragment below `path`, one page at a time.
//! Deeper results are folded into the folder that contains them so callers
//! see direct children only.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::AemAuthorClient;
use crate::domain::{ContentPath, ContentStatus};
use crate::error::{RepairError, RepairResult};
use crate::util::path::join;

const FRAGMENTS_ENDPOINT: &str = "/adobe/sites/cf/fragments";
const DEFAULT_PAGE_SIZE: usize = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Upper bound on pages fetched for one listing.
const MAX_PAGES: usize = 200;

#[derive(Debug, Deserialize)]
struct FragmentPage {
    #[serde(default)]
    items: Vec<FragmentItem>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FragmentItem {
    path: String,
    #[serde(default)]
    status: ContentStatus,
}

/// Live author-environment client.
#[derive(Debug, Clone)]
pub struct HttpAemAuthorClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    page_size: usize,
}

impl HttpAemAuthorClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> RepairResult<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| RepairError::client(&base_url, e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    async fn fetch_page(&self, path: &str, limit: usize, cursor: Option<&str>) -> RepairResult<FragmentPage> {
        let url = format!("{}{FRAGMENTS_ENDPOINT}", self.base_url);
        let mut query = vec![("path", path.to_owned()), ("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_owned()));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await
            .map_err(|e| RepairError::client(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepairError::client(path, format!("author returned HTTP {status}")));
        }

        response
            .json::<FragmentPage>()
            .await
            .map_err(|e| RepairError::client(path, e))
    }

    /// Every fragment below `path`, following cursors.
    async fn list_all(&self, path: &str) -> RepairResult<Vec<FragmentItem>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        for page_no in 0..MAX_PAGES {
            let page = self.fetch_page(path, self.page_size, cursor.as_deref()).await?;
            debug!(path, page = page_no, items = page.items.len(), "fetched fragment page");
            items.extend(page.items);

            match page.cursor.filter(|c| !c.is_empty()) {
                Some(next) => cursor = Some(next),
                None => return Ok(items),
            }
        }

        Err(RepairError::client(path, format!("listing exceeded {MAX_PAGES} pages")))
    }
}

/// Fold a recursive listing of `parent` into its direct children. Entries
/// deeper than one level become folder entries with an unknown status.
fn direct_children(parent: &str, items: Vec<FragmentItem>) -> Vec<ContentPath> {
    let prefix = format!("{}/", parent.trim_end_matches('/'));
    let mut seen = HashSet::new();
    let mut children = Vec::new();

    for item in items {
        let Some(rest) = item.path.strip_prefix(&prefix) else {
            continue;
        };
        let Some(name) = rest.split('/').find(|s| !s.is_empty()) else {
            continue;
        };
        let direct = rest.trim_matches('/') == name;
        if !seen.insert(name.to_owned()) {
            continue;
        }

        let child = join(parent, name);
        let status = if direct { item.status } else { ContentStatus::Unknown };
        children.push(ContentPath::new(child, status, None));
    }
    children
}

#[async_trait]
impl AemAuthorClient for HttpAemAuthorClient {
    async fn is_available(&self, path: &str) -> RepairResult<bool> {
        let page = self.fetch_page(path, 1, None).await?;
        Ok(page.items.iter().any(|item| item.path == path))
    }

    async fn get_children_from_path(&self, path: &str) -> RepairResult<Vec<ContentPath>> {
        let items = self.list_all(path).await?;
        Ok(direct_children(path, items))
    }
}
