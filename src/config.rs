//! Storefront cart configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_BASE_URL` | `http://127.0.0.1:5000` |
//! | `STOREFRONT_SEARCH_PATH` | `/search` |
//! | `STOREFRONT_RENDER_CART_PATH` | `/render_cart` |
//! | `STOREFRONT_CHECKOUT_PATH` | `/order` |
//! | `STOREFRONT_REQUEST_TIMEOUT_SECS` | `10` |
//! | `CART_MAILBOX_SIZE` | `32` |
//! | `CART_NEW_ENTRY_POLICY` | `assume-in-stock` |
//! | `VIEW_RESPONSE_ORDERING` | `latest-request` |

use crate::cart_actor::DEFAULT_MAILBOX_SIZE;
use crate::model::NewEntryPolicy;
use crate::view_sync::ResponseOrdering;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Everything a storefront session needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub base_url: String,
    pub search_path: String,
    pub render_cart_path: String,
    pub checkout_path: String,
    pub request_timeout: Duration,
    pub mailbox_size: usize,
    pub new_entry_policy: NewEntryPolicy,
    pub response_ordering: ResponseOrdering,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            search_path: "/search".to_string(),
            render_cart_path: "/render_cart".to_string(),
            checkout_path: "/order".to_string(),
            request_timeout: Duration::from_secs(10),
            mailbox_size: DEFAULT_MAILBOX_SIZE,
            new_entry_policy: NewEntryPolicy::default(),
            response_ordering: ResponseOrdering::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let base_url = get_or("STOREFRONT_BASE_URL", &defaults.base_url).trim().to_string();
        Url::parse(&base_url).map_err(|e| invalid("STOREFRONT_BASE_URL", e))?;

        let request_timeout = parse_or(
            &lookup,
            "STOREFRONT_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )
        .map(Duration::from_secs)?;

        let mailbox_size = parse_or(&lookup, "CART_MAILBOX_SIZE", defaults.mailbox_size)?;
        if mailbox_size == 0 {
            return Err(invalid("CART_MAILBOX_SIZE", "must be greater than zero"));
        }

        let path_or = |key: &str, default: &str| {
            let path = get_or(key, default).trim().to_string();
            if path.starts_with('/') {
                Ok(path)
            } else {
                Err(invalid(key, format!("path '{path}' must start with '/'")))
            }
        };

        Ok(Self {
            base_url,
            search_path: path_or("STOREFRONT_SEARCH_PATH", &defaults.search_path)?,
            render_cart_path: path_or("STOREFRONT_RENDER_CART_PATH", &defaults.render_cart_path)?,
            checkout_path: path_or("STOREFRONT_CHECKOUT_PATH", &defaults.checkout_path)?,
            request_timeout,
            mailbox_size,
            new_entry_policy: parse_or(&lookup, "CART_NEW_ENTRY_POLICY", defaults.new_entry_policy)?,
            response_ordering: parse_or(
                &lookup,
                "VIEW_RESPONSE_ORDERING",
                defaults.response_ordering,
            )?,
        })
    }
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parses `key` if set, otherwise falls back to `default`.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| invalid(key, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_source_gives_defaults() {
        let config = StorefrontConfig::from_source(source(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = StorefrontConfig::from_source(source(&[
            ("STOREFRONT_BASE_URL", "https://shop.example.com"),
            ("STOREFRONT_CHECKOUT_PATH", "/checkout"),
            ("STOREFRONT_REQUEST_TIMEOUT_SECS", "3"),
            ("CART_MAILBOX_SIZE", "4"),
            ("CART_NEW_ENTRY_POLICY", "require-stock"),
            ("VIEW_RESPONSE_ORDERING", "last-arrival"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.checkout_path, "/checkout");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.mailbox_size, 4);
        assert_eq!(config.new_entry_policy, NewEntryPolicy::RequireStock);
        assert_eq!(config.response_ordering, ResponseOrdering::LastArrival);
    }

    #[test]
    fn paths_are_trimmed_and_must_be_absolute() {
        let config =
            StorefrontConfig::from_source(source(&[("STOREFRONT_CHECKOUT_PATH", " /checkout ")]))
                .unwrap();
        assert_eq!(config.checkout_path, "/checkout");

        for key in [
            "STOREFRONT_SEARCH_PATH",
            "STOREFRONT_RENDER_CART_PATH",
            "STOREFRONT_CHECKOUT_PATH",
        ] {
            let err = StorefrontConfig::from_source(source(&[(key, "order ")])).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidEnvVar(k, _) if k == key),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn zero_mailbox_is_rejected() {
        let err =
            StorefrontConfig::from_source(source(&[("CART_MAILBOX_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CART_MAILBOX_SIZE"));
    }

    #[test]
    fn bad_values_are_rejected() {
        for (key, value) in [
            ("STOREFRONT_BASE_URL", "::nope"),
            ("STOREFRONT_REQUEST_TIMEOUT_SECS", "soon"),
            ("CART_NEW_ENTRY_POLICY", "maybe"),
            ("VIEW_RESPONSE_ORDERING", "random"),
        ] {
            let err = StorefrontConfig::from_source(source(&[(key, value)])).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidEnvVar(k, _) if k == key),
                "{key}: {err}"
            );
        }
    }
}
