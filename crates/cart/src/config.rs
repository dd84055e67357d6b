//! Green Basket configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `GREENBASKET_CURRENCY_SYMBOL` - Symbol prefixed to money amounts (default: ₹)
//! - `GREENBASKET_QUANTITY_STEP` - Quantity added or removed per tap (default: 0.5)
//! - `GREENBASKET_CATALOG_PATH` - YAML catalog file (default: built-in catalog)
//! - `GREENBASKET_LOG_FORMAT` - `text` or `json` (default: text)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::error::CatalogError;

const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
const DEFAULT_QUANTITY_STEP: &str = "0.5";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct GreenbasketConfig {
    /// Currency symbol used when formatting money.
    pub currency_symbol: String,
    /// Quantity change for one tap of a plus/minus button.
    pub quantity_step: Decimal,
    /// Optional catalog file replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for GreenbasketConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            quantity_step: Decimal::new(5, 1),
            catalog_path: None,
            log_format: LogFormat::Text,
        }
    }
}

impl GreenbasketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let currency_symbol = get_or_default("GREENBASKET_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL);

        let quantity_step = parse_quantity_step(&get_or_default(
            "GREENBASKET_QUANTITY_STEP",
            DEFAULT_QUANTITY_STEP,
        ))?;

        let catalog_path = lookup("GREENBASKET_CATALOG_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_format = get_or_default("GREENBASKET_LOG_FORMAT", "text")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("GREENBASKET_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            currency_symbol,
            quantity_step,
            catalog_path,
            log_format,
        })
    }

    /// Load the configured catalog, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or fails validation.
    pub fn load_catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        Ok(Arc::new(catalog))
    }
}

fn parse_quantity_step(value: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("GREENBASKET_QUANTITY_STEP".to_string(), reason)
    };
    let step = Decimal::from_str(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if step <= Decimal::ZERO {
        return Err(invalid(format!("must be positive (got {step})")));
    }
    Ok(step)
}
