//! Application configuration management.

use serde::Deserialize;

use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Settlement configuration.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Input configuration.
    #[serde(default)]
    pub input: InputConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Currency every balance is expressed in when the ledger does not name one.
    #[serde(default = "default_currency")]
    pub currency: CurrencyCode,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn default_currency() -> CurrencyCode {
    CurrencyCode::from("USD")
}

/// Input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path of the ledger document to settle.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> String {
    "ledger.json".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DIVVY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
