use crate::error::AppResult;
use regex::Regex;

/// A path literal or wildcard pattern.
///
/// `*` matches any run of characters and the pattern must cover the whole
/// path, so `/account/*` matches `/account/settings` but not `/account`.
/// Anything else is handed to the regex engine as-is, which lets
/// configuration use regex syntax directly (e.g. `/docs/(intro|faq)`).
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    pub fn new(pattern: &str) -> AppResult<Self> {
        let regex = Regex::new(&format!("^{}$", pattern.replace('*', ".*")))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// A pattern matching exactly `path`, with every character taken literally.
    pub fn literal(path: &str) -> AppResult<Self> {
        let regex = Regex::new(&format!("^{}$", regex::escape(path)))?;
        Ok(Self {
            source: path.to_string(),
            regex,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
