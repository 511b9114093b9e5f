//! Locale tokens found in content paths.
//!
//! Two encodings are recognized as a whole path segment:
//!
//! - five-letter locales, `xx-YY` or `xx_YY` (language + country)
//! - two-letter country folders, `YY`

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Source text of the five-letter locale pattern.
pub const FIVE_LETTER_PATTERN: &str = r"^[A-Za-z]{2}[-_][A-Za-z]{2}$";

/// Source text of the two-letter country pattern.
pub const TWO_LETTER_PATTERN: &str = r"^[A-Za-z]{2}$";

#[allow(clippy::expect_used)]
static FIVE_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIVE_LETTER_PATTERN).expect("five-letter pattern compiles"));

#[allow(clippy::expect_used)]
static TWO_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TWO_LETTER_PATTERN).expect("two-letter pattern compiles"));

/// How a locale token was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocaleType {
    /// `xx-YY` / `xx_YY`.
    FiveLetterLocale,
    /// `YY`.
    TwoLetterCountry,
}

/// A parsed locale token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locale {
    code: String,
    #[serde(rename = "type")]
    locale_type: LocaleType,
    language: Option<String>,
    country: String,
}

impl Locale {
    /// Parse a locale token. Surrounding whitespace is ignored; anything that
    /// is empty or matches neither pattern yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        if FIVE_LETTER_RE.is_match(code) {
            let (language, country) = code.split_once(['-', '_'])?;
            return Some(Self {
                code: code.to_owned(),
                locale_type: LocaleType::FiveLetterLocale,
                language: Some(language.to_ascii_lowercase()),
                country: country.to_ascii_uppercase(),
            });
        }

        if TWO_LETTER_RE.is_match(code) {
            return Some(Self {
                code: code.to_owned(),
                locale_type: LocaleType::TwoLetterCountry,
                language: None,
                country: code.to_ascii_uppercase(),
            });
        }

        None
    }

    /// First path segment that parses as a locale.
    pub fn from_path(path: &str) -> Option<Self> {
        path.split('/').find_map(Self::from_code)
    }

    /// The token as it appeared in the source, trimmed.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub const fn locale_type(&self) -> LocaleType {
        self.locale_type
    }

    /// Lower-case language, present only for five-letter locales.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Upper-case country.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn is_valid(&self) -> bool {
        !self.code.is_empty()
    }

    /// True when both locales name the same language.
    pub fn same_language(&self, other: &Self) -> bool {
        matches!((self.language(), other.language()), (Some(a), Some(b)) if a == b)
    }

    /// Replace the first path segment equal to this locale's code with
    /// `new_code`. The path is returned unchanged when the code does not
    /// occur as a segment.
    pub fn replace_in_path(&self, path: &str, new_code: &str) -> String {
        if !self.is_valid() {
            return path.to_owned();
        }

        let mut replaced = false;
        let segments: Vec<&str> = path
            .split('/')
            .map(|segment| {
                if !replaced && segment == self.code {
                    replaced = true;
                    new_code
                } else {
                    segment
                }
            })
            .collect();

        if replaced {
            segments.join("/")
        } else {
            path.to_owned()
        }
    }

    /// Prefix of `path` up to and including this locale's segment, e.g.
    /// `"/content/dam/en-US"` for `"/content/dam/en-US/a.jpg"`.
    pub fn root_in_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        let mut offset = 0;
        for segment in path.split('/') {
            let end = offset + segment.len();
            if segment == self.code {
                return Some(&path[..end]);
            }
            offset = end + 1;
        }
        None
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
