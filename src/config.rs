//! Configuration for Diiwaan
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

use crate::locale::Locale;
use crate::types::{DiiwaanError, Result};

/// Diiwaan - registry gateway for the national biographical archive
#[derive(Parser, Debug, Clone)]
#[command(name = "diiwaan")]
#[command(about = "Registry gateway for the Diiwaan national biographical archive")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Hosted record store base URL, e.g. https://xyz.supabase.co
    /// Required unless dev mode is enabled.
    #[arg(long, env = "STORE_URL")]
    pub store_url: Option<String>,

    /// API key for the hosted record store
    #[arg(long, env = "STORE_API_KEY")]
    pub store_api_key: Option<String>,

    /// Static bearer key guarding the admin mutation routes
    #[arg(long, env = "ADMIN_API_KEY")]
    pub admin_api_key: Option<String>,

    /// Locale the archive is resolved for until a request asks otherwise
    #[arg(long, env = "DEFAULT_LOCALE", default_value = "en")]
    pub default_locale: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout for store calls in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    /// Enable development mode (in-memory store, admin routes open)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,
}

impl Args {
    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if !self.dev_mode {
            if self.store_url.as_deref().unwrap_or("").is_empty() {
                return Err(DiiwaanError::Config(
                    "STORE_URL is required outside dev mode".into(),
                ));
            }
            if self.store_api_key.as_deref().unwrap_or("").is_empty() {
                return Err(DiiwaanError::Config(
                    "STORE_API_KEY is required outside dev mode".into(),
                ));
            }
            if self.admin_api_key.as_deref().unwrap_or("").is_empty() {
                return Err(DiiwaanError::Config(
                    "ADMIN_API_KEY is required outside dev mode".into(),
                ));
            }
        }
        Ok(())
    }

    /// The configured default locale
    pub fn locale(&self) -> Locale {
        Locale::parse(&self.default_locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["diiwaan", "--dev-mode"])
    }

    #[test]
    fn test_dev_mode_needs_no_store_credentials() {
        assert!(base_args().validate().is_ok());
    }

    #[test]
    fn test_production_requires_store_and_admin_keys() {
        let args = Args::parse_from(["diiwaan"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from([
            "diiwaan",
            "--store-url",
            "https://store.example",
            "--store-api-key",
            "key",
            "--admin-api-key",
            "admin",
        ]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_default_locale_parses() {
        let args = Args::parse_from(["diiwaan", "--dev-mode", "--default-locale", "so"]);
        assert_eq!(args.locale(), Locale::So);
    }
}
