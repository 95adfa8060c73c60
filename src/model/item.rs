use crate::cart_actor::CartError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Characters reserved by the checkout path encoding.
const RESERVED: [char; 2] = [',', '/'];

/// Type-safe identifier for catalog items.
///
/// Opaque to the cart, but it ends up inside a URL path segment, so it can
/// never be empty or contain the `,` and `/` delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Validates and wraps a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, CartError> {
        let raw = raw.into();
        if raw.is_empty() || raw.contains(RESERVED) {
            return Err(CartError::InvalidItemId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl TryFrom<String> for ItemId {
    type Error = CartError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl TryFrom<&str> for ItemId {
    type Error = CartError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl FromStr for ItemId {
    type Err = CartError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
