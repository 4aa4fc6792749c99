//! Engine configuration.
//!
//! Checkout policy (free-shipping threshold, flat shipping rate, tax
//! rate) and the search result cap are injected through [`StoreConfig`]
//! rather than hardcoded at their use sites. Defaults reproduce the
//! shipped storefront behavior exactly.
//!
//! # Environment Variables (all optional)
//!
//! - `BOUTIQUE_CURRENCY` - ISO 4217 display currency (default: USD)
//! - `BOUTIQUE_FREE_SHIPPING_THRESHOLD` - subtotal above which shipping
//!   is free (default: 100)
//! - `BOUTIQUE_FLAT_SHIPPING_RATE` - shipping charged below the
//!   threshold (default: 10)
//! - `BOUTIQUE_TAX_RATE` - tax as a decimal fraction (default: 0.10)
//! - `BOUTIQUE_SEARCH_MAX_RESULTS` - global search result cap (default: 8)

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use boutique_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout pricing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Subtotal strictly above this ships free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping charged at or below the threshold.
    pub flat_shipping_rate: Decimal,
    /// Tax as a decimal fraction of the subtotal.
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::ONE_HUNDRED,
            flat_shipping_rate: Decimal::TEN,
            tax_rate: Decimal::new(10, 2),
        }
    }
}

/// Global search configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of results returned by a search.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 8 }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Display currency for formatted prices.
    pub currency: CurrencyCode,
    /// Checkout pricing policy.
    pub pricing: PricingConfig,
    /// Global search configuration.
    pub search: SearchConfig,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    /// Every variable is optional; anything unset keeps its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a set variable fails to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            free_shipping_threshold: parse_env(
                "BOUTIQUE_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            flat_shipping_rate: parse_env(
                "BOUTIQUE_FLAT_SHIPPING_RATE",
                defaults.flat_shipping_rate,
            )?,
            tax_rate: parse_env("BOUTIQUE_TAX_RATE", defaults.tax_rate)?,
        };

        let search = SearchConfig {
            max_results: parse_env(
                "BOUTIQUE_SEARCH_MAX_RESULTS",
                SearchConfig::default().max_results,
            )?,
        };

        let currency = match std::env::var("BOUTIQUE_CURRENCY") {
            Ok(code) => parse_currency(&code)?,
            Err(_) => CurrencyCode::default(),
        };

        Ok(Self {
            currency,
            pricing,
            search,
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(value) => parse_value(key, &value),
        Err(_) => Ok(default),
    }
}

/// Parse a raw variable value, attributing failures to `key`.
fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

fn parse_currency(code: &str) -> Result<CurrencyCode, ConfigError> {
    match code {
        "USD" => Ok(CurrencyCode::USD),
        "EUR" => Ok(CurrencyCode::EUR),
        "GBP" => Ok(CurrencyCode::GBP),
        "CAD" => Ok(CurrencyCode::CAD),
        "AUD" => Ok(CurrencyCode::AUD),
        other => Err(ConfigError::InvalidEnvVar(
            "BOUTIQUE_CURRENCY".to_owned(),
            format!("unsupported currency: {other}"),
        )),
    }
}
