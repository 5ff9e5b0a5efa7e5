//! Opaque API token
//!
//! The token is only ever read back to build the `Authorization` header;
//! `Debug` and `Display` never show it.

use std::fmt;

/// Todoist API token supplied by the user for one run
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a token, trimming surrounding whitespace
    ///
    /// Returns `None` when nothing but whitespace was given.
    ///
    /// # Examples
    ///
    /// ```
    /// use todoist_log::credential::ApiToken;
    ///
    /// let token = ApiToken::new(" 0123abcd \n").unwrap();
    /// assert_eq!(token.expose(), "0123abcd");
    /// assert!(ApiToken::new("   ").is_none());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"<redacted>").finish()
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
