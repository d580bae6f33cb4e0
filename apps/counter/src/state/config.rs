//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COMPTOIR_CATALOG_SOURCE=http                                       │
//! │     COMPTOIR_CATALOG_URL=http://192.168.1.10:8080/api                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/comptoir-pos/comptoir.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file catalog at data/catalog.json, 3 s lookup timeout              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Comptoir El Djazair"
//! currency_symbol = "DA"
//! currency_decimals = 2
//! symbol_after = true
//! tax_rate_bps = 1900
//!
//! [catalog]
//! source = "file"            # file | http
//! path = "data/catalog.json"
//! base_url = "http://localhost:8080/api"
//! lookup_timeout_ms = 3000
//!
//! [clients]
//! path = "data/clients.json"
//! ```
//!
//! Read-only after startup, so no lock.

use std::path::{Path, PathBuf};
use std::time::Duration;

use comptoir_core::validation::validate_tax_rate_bps;
use comptoir_core::{Money, TaxRate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

// =============================================================================
// Store Settings
// =============================================================================

/// Store identity and money display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Shown on the ticket header
    pub name: String,

    pub currency_symbol: String,

    /// Decimal places shown (0 to 2)
    pub currency_decimals: u8,

    /// "1 250.00 DA" when true, "DA1 250.00" when false
    pub symbol_after: bool,

    /// Flat tax included in prices, in basis points
    pub tax_rate_bps: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Comptoir".to_string(),
            currency_symbol: "DA".to_string(),
            currency_decimals: 2,
            symbol_after: true,
            tax_rate_bps: 0,
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where products come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// JSON file loaded into memory
    #[default]
    File,

    /// HTTP data-access layer
    Http,
}

impl std::str::FromStr for CatalogSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(CatalogSource::File),
            "http" => Ok(CatalogSource::Http),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown catalog source: '{}'. Valid options: file, http",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub source: CatalogSource,

    /// Used when `source = "file"`
    pub path: PathBuf,

    /// Used when `source = "http"`
    pub base_url: Option<String>,

    /// Bound on an exact barcode lookup
    pub lookup_timeout_ms: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            source: CatalogSource::File,
            path: PathBuf::from("data/catalog.json"),
            base_url: None,
            lookup_timeout_ms: 3000,
        }
    }
}

impl CatalogSettings {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// JSON client list; only Divers is available without it
    pub path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            path: Some(PathBuf::from("data/clients.json")),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub clients: ClientSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist)
    /// 3. `COMPTOIR_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        validate_tax_rate_bps(self.store.tax_rate_bps)
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        if self.store.currency_decimals > 2 {
            return Err(AppError::InvalidConfig(
                "currency_decimals must be 0, 1 or 2".into(),
            ));
        }

        if self.catalog.lookup_timeout_ms == 0 {
            return Err(AppError::InvalidConfig(
                "lookup_timeout_ms must be greater than 0".into(),
            ));
        }

        if self.catalog.source == CatalogSource::Http {
            match self.catalog.base_url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => {
                    return Err(AppError::InvalidConfig(format!(
                        "Catalog URL must start with http:// or https://, got: {}",
                        url
                    )))
                }
                None => {
                    return Err(AppError::InvalidConfig(
                        "catalog.base_url is required when source = \"http\"".into(),
                    ))
                }
            }
        }

        Ok(())
    }

    /// Applies `COMPTOIR_*` overrides read through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("COMPTOIR_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(bps) = var("COMPTOIR_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(bps) => self.store.tax_rate_bps = bps,
                Err(_) => warn!(value = %bps, "Ignoring invalid COMPTOIR_TAX_RATE_BPS"),
            }
        }

        if let Some(source) = var("COMPTOIR_CATALOG_SOURCE") {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding catalog source from environment");
                    self.catalog.source = parsed;
                }
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(path) = var("COMPTOIR_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(path);
        }

        if let Some(url) = var("COMPTOIR_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = Some(url);
        }

        if let Some(ms) = var("COMPTOIR_LOOKUP_TIMEOUT_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.catalog.lookup_timeout_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring invalid COMPTOIR_LOOKUP_TIMEOUT_MS"),
            }
        }

        if let Some(path) = var("COMPTOIR_CLIENTS_PATH") {
            self.clients.path = Some(PathBuf::from(path));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "comptoir", "comptoir-pos")
            .map(|dirs| dirs.config_dir().join("comptoir.toml"))
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.store.tax_rate_bps)
    }

    /// Formats an amount for display, e.g. `203 300.00 DA`.
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.store.currency_decimals.min(2));
        let scale = 10_i64.pow(2 - decimals);
        let minor = amount.minor();
        // half away from zero when dropping decimals
        let shown = (minor.abs() + scale / 2) / scale;

        let divisor = 10_i64.pow(decimals);
        let whole = group_thousands(shown / divisor);
        let number = if decimals > 0 {
            format!(
                "{}.{:0width$}",
                whole,
                shown % divisor,
                width = decimals as usize
            )
        } else {
            whole
        };

        let sign = if minor < 0 && shown != 0 { "-" } else { "" };
        let symbol = &self.store.currency_symbol;
        if self.store.symbol_after {
            format!("{}{} {}", sign, number, symbol)
        } else {
            format!("{}{}{}", sign, symbol, number)
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.lookup_timeout(), Duration::from_secs(3));
        assert!(config.tax_rate().is_zero());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [store]
            name = "Comptoir Oran"
            tax_rate_bps = 1900

            [catalog]
            source = "http"
            base_url = "http://10.0.0.5:8080/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Comptoir Oran");
        assert_eq!(config.store.currency_symbol, "DA");
        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert_eq!(config.catalog.lookup_timeout_ms, 3000);
        assert_eq!(config.clients.path, Some(PathBuf::from("data/clients.json")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml("[store\nname ="),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.catalog.source = CatalogSource::Http;
        assert!(config.validate().is_err());

        config.catalog.base_url = Some("ftp://catalog".to_string());
        assert!(config.validate().is_err());

        config.catalog.base_url = Some("https://catalog.local".to_string());
        assert!(config.validate().is_ok());

        config.store.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        config.store.tax_rate_bps = 1900;
        config.catalog.lookup_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("COMPTOIR_CATALOG_SOURCE", "http"),
            ("COMPTOIR_CATALOG_URL", "http://localhost:9000"),
            ("COMPTOIR_LOOKUP_TIMEOUT_MS", "1500"),
            ("COMPTOIR_TAX_RATE_BPS", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert_eq!(config.catalog.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.catalog.lookup_timeout_ms, 1500);
        assert_eq!(config.store.tax_rate_bps, 0);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = AppConfig::load(Some(PathBuf::from("/nonexistent/comptoir.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_major(203_300)), "203 300.00 DA");
        assert_eq!(config.format_currency(Money::from_minor(1)), "0.01 DA");
        assert_eq!(config.format_currency(Money::zero()), "0.00 DA");
        assert_eq!(config.format_currency(Money::from_minor(-150_050)), "-1 500.50 DA");
    }

    #[test]
    fn test_format_currency_symbol_before_no_decimals() {
        let mut config = AppConfig::default();
        config.store.symbol_after = false;
        config.store.currency_symbol = "€".to_string();
        config.store.currency_decimals = 0;

        assert_eq!(config.format_currency(Money::from_minor(1_234_550)), "€12 346");
        assert_eq!(config.format_currency(Money::from_minor(1_234_549)), "€12 345");
        assert_eq!(config.format_currency(Money::from_minor(-49)), "€0");
    }
}
