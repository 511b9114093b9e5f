//! Known content paths and their publication status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::locale::Locale;
use crate::util::path;

/// Publication status reported by the author environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Published,
    Modified,
    Draft,
    Archived,
    Deleted,
    #[default]
    Unknown,
}

impl ContentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "PUBLISHED",
            Self::Modified => "MODIFIED",
            Self::Draft => "DRAFT",
            Self::Archived => "ARCHIVED",
            Self::Deleted => "DELETED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for ContentStatus {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unrecognized text is `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "PUBLISHED" => Self::Published,
            "MODIFIED" => Self::Modified,
            "DRAFT" => Self::Draft,
            "ARCHIVED" => Self::Archived,
            "DELETED" => Self::Deleted,
            _ => Self::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for ContentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::Unknown, |s| s.parse().unwrap_or_default()))
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content path as stored in the path index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPath {
    pub path: String,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub locale: Option<String>,
}

impl ContentPath {
    /// Build a content path. Without an explicit locale, the first locale
    /// segment of `path` is used.
    pub fn new(path: impl Into<String>, status: ContentStatus, locale: Option<String>) -> Self {
        let path = path.into();
        let locale = locale
            .filter(|code| !code.trim().is_empty())
            .or_else(|| Locale::from_path(&path).map(|l| l.code().to_owned()));
        Self {
            path,
            status,
            locale,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.path.is_empty()
    }

    /// Whether a link pointing here would resolve. Deleted and archived
    /// content is never offered as a fix.
    pub const fn is_suggestible(&self) -> bool {
        !matches!(self.status, ContentStatus::Deleted | ContentStatus::Archived)
    }

    /// Last non-empty segment of the path.
    pub fn name(&self) -> &str {
        path::name(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(ContentPath::new("/content/dam/a.jpg", ContentStatus::Published, None).is_valid());
        assert!(!ContentPath::new("", ContentStatus::Published, None).is_valid());
    }

    #[test]
    fn test_locale_derived_from_path() {
        let cp = ContentPath::new("/content/dam/en-US/a.jpg", ContentStatus::Draft, None);
        assert_eq!(cp.locale.as_deref(), Some("en-US"));

        let cp = ContentPath::new("/content/dam/a.jpg", ContentStatus::Draft, None);
        assert_eq!(cp.locale, None);
    }

    #[test]
    fn test_explicit_locale_wins() {
        let cp = ContentPath::new(
            "/content/dam/en-US/a.jpg",
            ContentStatus::Published,
            Some("en".to_owned()),
        );
        assert_eq!(cp.locale.as_deref(), Some("en"));
    }

    #[test]
    fn test_suggestible_statuses() {
        for (status, expected) in [
            (ContentStatus::Published, true),
            (ContentStatus::Modified, true),
            (ContentStatus::Draft, true),
            (ContentStatus::Unknown, true),
            (ContentStatus::Deleted, false),
            (ContentStatus::Archived, false),
        ] {
            let cp = ContentPath::new("/content/dam/a.jpg", status, None);
            assert_eq!(cp.is_suggestible(), expected, "{status}");
        }
    }

    #[test]
    fn test_name() {
        let cp = ContentPath::new("/content/dam/en-US/a.jpg", ContentStatus::Published, None);
        assert_eq!(cp.name(), "a.jpg");
        let cp = ContentPath::new("/content/dam/folder/", ContentStatus::Published, None);
        assert_eq!(cp.name(), "folder");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("published".parse::<ContentStatus>(), Ok(ContentStatus::Published));
        assert_eq!(" Modified ".parse::<ContentStatus>(), Ok(ContentStatus::Modified));
        assert_eq!("whatever".parse::<ContentStatus>(), Ok(ContentStatus::Unknown));
    }

    #[test]
    fn test_deserialize_listing_entry() {
        let cp: ContentPath = serde_json::from_value(serde_json::json!({
            "path": "/content/dam/fr-FR/a.jpg",
            "status": "published",
            "locale": null
        }))
        .expect("should deserialize");
        assert_eq!(cp.status, ContentStatus::Published);

        let cp: ContentPath =
            serde_json::from_value(serde_json::json!({ "path": "/x" })).expect("deserialize");
        assert_eq!(cp.status, ContentStatus::Unknown);
    }

    #[test]
    fn test_serialize_status() {
        let cp = ContentPath::new("/x", ContentStatus::Modified, None);
        let v = serde_json::to_value(&cp).expect("serialize");
        assert_eq!(v["status"], "MODIFIED");
    }
}
