use serde::Serialize;
use std::fmt::Display;

/// A pre-rendered HTML fragment returned by the search or cart-rendering endpoint.
///
/// The cart never looks inside it; it only replaces one display region's content
/// with another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Markup {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl From<&str> for Markup {
    fn from(html: &str) -> Self {
        Self(html.to_string())
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
