//! Mailgun credentials and endpoint configuration
//!
//! Configuration can be built explicitly or loaded with figment from
//! multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MAILGUN_` prefix, taken
//!    verbatim as strings)
//! 2. A TOML file passed to [`MailgunConfig::load_from`]
//! 3. Hardcoded defaults (EU API base)
//!
//! # Example Configuration
//!
//! ```toml
//! # mailgun.toml
//! domain = "mg.example.com"
//! api_key = "key-0123456789"
//! api_base = "https://api.eu.mailgun.net/v3"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use mailgun_send::config::MailgunConfig;
//!
//! # fn example() -> Result<(), mailgun_send::email::EmailError> {
//! // MAILGUN_DOMAIN / MAILGUN_API_KEY
//! let config = MailgunConfig::from_env()?;
//!
//! // Or explicitly
//! let config = MailgunConfig::new("mg.example.com", "key-0123456789");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::email::EmailError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MAILGUN_";

/// Mailgun US region API base
pub const API_BASE_US: &str = "https://api.mailgun.net/v3";

/// Mailgun EU region API base
pub const API_BASE_EU: &str = "https://api.eu.mailgun.net/v3";

/// Configuration keys, each read from `MAILGUN_<KEY>`
const ENV_KEYS: [&str; 3] = ["domain", "api_key", "api_base"];

fn default_api_base() -> String {
    API_BASE_EU.to_string()
}

/// `MAILGUN_*` variables as an uninterpreted string layer
///
/// Values are never parsed, so keys like `1234567890` or `true` stay strings
/// and surrounding whitespace is kept. An empty `MAILGUN_API_BASE` is
/// skipped so the default endpoint still applies.
fn env_layer() -> Serialized<BTreeMap<&'static str, String>> {
    let values = ENV_KEYS
        .into_iter()
        .filter_map(|key| {
            let name = format!("{ENV_PREFIX}{}", key.to_uppercase());
            std::env::var(name).ok().map(|value| (key, value))
        })
        .filter(|(key, value)| *key != "api_base" || !value.is_empty())
        .collect();

    Serialized::defaults(values)
}

/// Mailgun configuration
///
/// `domain` and `api_key` are required; [`validate`](Self::validate) rejects
/// either being empty. The API base is fixed for the lifetime of any sender
/// built from this configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailgunConfig {
    /// Sending domain registered with Mailgun
    #[serde(default)]
    pub domain: String,

    /// Private API key
    #[serde(default)]
    pub api_key: String,

    /// Regional API base (default: EU)
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            api_key: String::new(),
            api_base: default_api_base(),
        }
    }
}

impl fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("domain", &self.domain)
            .field("api_key", &"[redacted]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl MailgunConfig {
    /// Create a configuration for the EU region
    #[must_use]
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
            api_base: default_api_base(),
        }
    }

    /// Use a different API base (for example [`API_BASE_US`])
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Load from `MAILGUN_DOMAIN`, `MAILGUN_API_KEY` and the optional
    /// `MAILGUN_API_BASE`
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Config` if either required value is missing or
    /// empty. Any other value, including one made only of whitespace, is
    /// accepted as given.
    pub fn from_env() -> Result<Self, EmailError> {
        Self::from_figment(&Figment::new().merge(env_layer()))
    }

    /// Load from a TOML file, overridden by `MAILGUN_` environment variables
    ///
    /// A missing file is not an error; the environment alone may be enough.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Config` if the file is malformed or the merged
    /// result fails validation
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, EmailError> {
        let figment = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(env_layer());

        Self::from_figment(&figment)
    }

    /// Extract and validate from an arbitrary figment
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Config` on extraction or validation failure
    pub fn from_figment(figment: &Figment) -> Result<Self, EmailError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both credentials are present
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Config` naming the missing value(s)
    pub fn validate(&self) -> Result<(), EmailError> {
        let missing: Vec<&str> = [
            ("MAILGUN_DOMAIN", self.domain.is_empty()),
            ("MAILGUN_API_KEY", self.api_key.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(EmailError::config(format!(
            "Mailgun API key and domain not configured (missing {})",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = MailgunConfig::default();
        assert!(config.domain.is_empty());
        assert!(config.api_key.is_empty());
        assert_eq!(config.api_base, API_BASE_EU);
    }

    #[test]
    fn test_validate_accepts_both_credentials() {
        let config = MailgunConfig::new("example.com", "k1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let err = MailgunConfig::new("example.com", "").validate().unwrap_err();
        assert!(matches!(err, EmailError::Config(ref msg) if msg.contains("MAILGUN_API_KEY")));
        assert!(!err.to_string().contains("MAILGUN_DOMAIN"));
    }

    #[test]
    fn test_validate_rejects_missing_domain_and_key() {
        let err = MailgunConfig::default().validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MAILGUN_DOMAIN"));
        assert!(msg.contains("MAILGUN_API_KEY"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = MailgunConfig::new("example.com", "super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("example.com"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_with_api_base() {
        let config = MailgunConfig::new("example.com", "k1").with_api_base(API_BASE_US);
        assert_eq!(config.api_base, API_BASE_US);
    }

    #[test]
    fn test_from_figment_serialized() {
        let figment = Figment::from(Serialized::defaults(MailgunConfig::new("example.com", "k1")));
        let config = MailgunConfig::from_figment(&figment).unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.api_key, "k1");
    }

    #[test]
    fn test_from_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "example.com");
            jail.set_env("MAILGUN_API_KEY", "k1");

            let config = MailgunConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.domain, "example.com");
            assert_eq!(config.api_key, "k1");
            assert_eq!(config.api_base, API_BASE_EU);
            Ok(())
        });
    }

    #[test]
    fn test_from_env_missing_api_key() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "example.com");

            let result = MailgunConfig::from_env();
            assert!(matches!(result, Err(EmailError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_from_env_empty_domain() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "");
            jail.set_env("MAILGUN_API_KEY", "k1");

            let result = MailgunConfig::from_env();
            assert!(matches!(result, Err(EmailError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "mailgun.toml",
                r#"
                domain = "file.example.com"
                api_key = "file-key"
                api_base = "https://api.mailgun.net/v3"
                "#,
            )?;
            jail.set_env("MAILGUN_API_KEY", "env-key");

            let config = MailgunConfig::load_from("mailgun.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.domain, "file.example.com");
            assert_eq!(config.api_key, "env-key");
            assert_eq!(config.api_base, API_BASE_US);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_missing_file_uses_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "example.com");
            jail.set_env("MAILGUN_API_KEY", "k1");

            let config = MailgunConfig::load_from("absent.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.domain, "example.com");
            Ok(())
        });
    }

    #[test]
    fn test_from_env_keeps_numeric_and_literal_keys() {
        for key in ["1234567890", "true", "[abc]", "0x1f", "1.5"] {
            Jail::expect_with(|jail| {
                jail.clear_env();
                jail.set_env("MAILGUN_DOMAIN", "example.com");
                jail.set_env("MAILGUN_API_KEY", key);

                let config = MailgunConfig::from_env().map_err(|e| e.to_string())?;
                assert_eq!(config.api_key, key);
                Ok(())
            });
        }
    }

    #[test]
    fn test_from_env_keeps_numeric_domain() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "12345");
            jail.set_env("MAILGUN_API_KEY", "k1");

            let config = MailgunConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.domain, "12345");
            Ok(())
        });
    }

    #[test]
    fn test_from_env_whitespace_key_is_present() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "example.com");
            jail.set_env("MAILGUN_API_KEY", "   ");

            let config = MailgunConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.api_key, "   ");
            Ok(())
        });
    }

    #[test]
    fn test_from_env_api_base_override() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "example.com");
            jail.set_env("MAILGUN_API_KEY", "k1");
            jail.set_env("MAILGUN_API_BASE", API_BASE_US);

            let config = MailgunConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.api_base, API_BASE_US);
            Ok(())
        });
    }

    #[test]
    fn test_from_env_empty_api_base_uses_default() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MAILGUN_DOMAIN", "example.com");
            jail.set_env("MAILGUN_API_KEY", "k1");
            jail.set_env("MAILGUN_API_BASE", "");

            let config = MailgunConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.api_base, API_BASE_EU);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_numeric_env_key_overrides_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "mailgun.toml",
                r#"
                domain = "file.example.com"
                api_key = "file-key"
                "#,
            )?;
            jail.set_env("MAILGUN_API_KEY", "1234567890");

            let config = MailgunConfig::load_from("mailgun.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.domain, "file.example.com");
            assert_eq!(config.api_key, "1234567890");
            Ok(())
        });
    }
}
