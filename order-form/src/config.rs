//! Configuration for the order-form binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Default location of the band catalog
pub const DEFAULT_CATALOG_PATH: &str = "order-form/catalog/bands.json";

/// Default order-processing endpoint
pub const DEFAULT_SUBMIT_ENDPOINT: &str = "/api/purchaseTickets";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the band catalog JSON file
    pub catalog_path: String,
    /// Endpoint orders are submitted to
    pub submit_endpoint: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// - `ORDER_FORM_CATALOG` (default `order-form/catalog/bands.json`)
    /// - `ORDER_FORM_SUBMIT_ENDPOINT` (default `/api/purchaseTickets`)
    /// - `RUST_LOG` (default `order_form=info,box_office_runtime=debug`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup("ORDER_FORM_CATALOG").unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string()),
            submit_endpoint: lookup("ORDER_FORM_SUBMIT_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SUBMIT_ENDPOINT.to_string()),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "order_form=info,box_office_runtime=debug".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
