//! Value types shared by the index and the repair rules.

pub mod content_path;
pub mod locale;
pub mod suggestion;

pub use content_path::{ContentPath, ContentStatus};
pub use locale::{Locale, LocaleType};
pub use suggestion::{Suggestion, SuggestionType};
