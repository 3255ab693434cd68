//! # Runner Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CART_PRICING_ATTRIBUTE_KEY=utm_source                              │
//! │     CART_PRICING_DEFAULT_CHANNEL=direct                                │
//! │     CART_PRICING_SKIP_UNCHANGED=true                                   │
//! │     CART_PRICING_PRETTY=true                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/cart-pricing/pricing.toml (Linux)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     utm_source, direct, no suppression, compact output                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [attribution]
//! attribute_key = "utm_source"
//! default_channel = "direct"
//!
//! [output]
//! skip_unchanged = false
//! pretty = false
//! ```

use std::path::{Path, PathBuf};

use cart_pricing_core::channel::DIRECT;
use cart_pricing_core::validation::{validate_attribute_key, validate_channel_name};
use cart_pricing_core::{Channel, PricingOptions, DEFAULT_ATTRIBUTE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pricing.toml";

// =============================================================================
// Attribution Settings
// =============================================================================

/// Where the channel comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionSettings {
    /// Cart attribute holding the traffic source.
    #[serde(default = "default_attribute_key")]
    pub attribute_key: String,

    /// Channel for carts without attribution.
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

fn default_attribute_key() -> String {
    DEFAULT_ATTRIBUTE_KEY.to_string()
}

fn default_channel() -> String {
    DIRECT.to_string()
}

impl Default for AttributionSettings {
    fn default() -> Self {
        AttributionSettings {
            attribute_key: default_attribute_key(),
            default_channel: default_channel(),
        }
    }
}

// =============================================================================
// Output Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Leave out lines already at their resolved price.
    #[serde(default)]
    pub skip_unchanged: bool,

    /// Pretty-print the result document.
    #[serde(default)]
    pub pretty: bool,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub attribution: AttributionSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl PricingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                // Explicit paths must exist
                return Err(ConfigError::Read {
                    path,
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_attribute_key(&self.attribution.attribute_key)?;
        validate_channel_name(&self.attribution.default_channel)?;
        Ok(())
    }

    /// Options for the pricing function.
    pub fn pricing_options(&self) -> PricingOptions {
        PricingOptions {
            attribute_key: self.attribution.attribute_key.clone(),
            default_channel: Channel::parse(&self.attribution.default_channel),
            skip_unchanged: self.output.skip_unchanged,
        }
    }

    /// Applies `CART_PRICING_*` environment overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("CART_PRICING_ATTRIBUTE_KEY") {
            debug!(attribute_key = %key, "Overriding attribute key from environment");
            self.attribution.attribute_key = key;
        }

        if let Some(channel) = var("CART_PRICING_DEFAULT_CHANNEL") {
            debug!(%channel, "Overriding default channel from environment");
            self.attribution.default_channel = channel.trim().to_lowercase();
        }

        if let Some(flag) = var("CART_PRICING_SKIP_UNCHANGED") {
            match parse_flag(&flag) {
                Some(skip) => self.output.skip_unchanged = skip,
                None => warn!(value = %flag, "Ignoring CART_PRICING_SKIP_UNCHANGED"),
            }
        }

        if let Some(flag) = var("CART_PRICING_PRETTY") {
            match parse_flag(&flag) {
                Some(pretty) => self.output.pretty = pretty,
                None => warn!(value = %flag, "Ignoring CART_PRICING_PRETTY"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cart-pricing", "cart-pricing")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert_eq!(config.attribution.attribute_key, "utm_source");
        assert_eq!(config.attribution.default_channel, "direct");
        assert!(!config.output.skip_unchanged);
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing_options(), PricingOptions::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[attribution]\ndefault_channel = \"google\"\n\n[output]\nskip_unchanged = true"
        )
        .unwrap();

        let config = PricingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.attribution.attribute_key, "utm_source");
        assert_eq!(config.attribution.default_channel, "google");
        assert!(config.output.skip_unchanged);
        assert!(!config.output.pretty);

        let options = config.pricing_options();
        assert_eq!(options.default_channel, Channel::parse("google"));
        assert!(options.skip_unchanged);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nskip_unchanged = \"sometimes\"").unwrap();

        assert!(matches!(
            PricingConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = PricingConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_overrides() {
        let env = vars(&[
            ("CART_PRICING_ATTRIBUTE_KEY", "_source"),
            ("CART_PRICING_DEFAULT_CHANNEL", " Idealo "),
            ("CART_PRICING_SKIP_UNCHANGED", "yes"),
            ("CART_PRICING_PRETTY", "maybe"),
        ]);

        let mut config = PricingConfig::default();
        config.apply_overrides(|name| env.get(name).cloned());

        assert_eq!(config.attribution.attribute_key, "_source");
        assert_eq!(config.attribution.default_channel, "idealo");
        assert!(config.output.skip_unchanged);
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PricingConfig::default();

        config.attribution.attribute_key = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.attribution.attribute_key = "utm_source".to_string();
        config.attribution.default_channel = "Google Shopping".to_string();
        assert!(config.validate().is_err());

        config.attribution.default_channel = "google-shopping".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&PricingConfig::default()).unwrap();
        assert!(toml_str.contains("[attribution]"));
        assert!(toml_str.contains("[output]"));

        let parsed: PricingConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, PricingConfig::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("sometimes"), None);
    }
}
