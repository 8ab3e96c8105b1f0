//! Divvy batch settlement runner.
//!
//! Reads a ledger document and prints its settlement plan as JSON.
//!
//! Usage: settle [LEDGER_PATH]

use anyhow::Context;
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use divvy_core::{Expense, FxRate, SettlementPlan, settle};
use divvy_shared::types::CurrencyCode;
use divvy_shared::{AppConfig, AppError, AppResult};

/// Filter used when `RUST_LOG` is unset. Covers this binary and the engine.
const DEFAULT_LOG_FILTER: &str = "settle=info,divvy=info";

/// Ledger document accepted on disk.
#[derive(Debug, Deserialize)]
struct LedgerDocument {
    /// Overrides the configured settlement currency.
    settlement_currency: Option<CurrencyCode>,
    expenses: Vec<Expense>,
    #[serde(default)]
    rates: Vec<FxRate>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(config.log.json);

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.input.ledger_path.clone());
    info!(%path, "Reading ledger");

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read ledger {path}"))?;
    let document: LedgerDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse ledger {path}"))?;

    let plan = plan_ledger(&document, &config.settlement.currency)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

/// Settles a document, falling back to `default_currency` when it names none.
///
/// Failures are logged with their error code before being returned.
fn plan_ledger(document: &LedgerDocument, default_currency: &CurrencyCode) -> AppResult<SettlementPlan> {
    let currency = document
        .settlement_currency
        .as_ref()
        .unwrap_or(default_currency);
    info!(
        %currency,
        expenses = document.expenses.len(),
        rates = document.rates.len(),
        "Settling ledger"
    );

    let plan = settle(&document.expenses, currency, &document.rates).map_err(|err| {
        let code = err.error_code();
        let retryable = err.is_retryable();
        let app_err = AppError::from(err);
        error!(
            code,
            kind = app_err.error_code(),
            retryable,
            caller_fixable = app_err.is_caller_fixable(),
            "Settlement failed: {app_err}"
        );
        app_err
    })?;

    info!(
        participants = plan.balances.len(),
        transfers = plan.transfers.len(),
        "Settlement planned"
    );
    Ok(plan)
}

/// Installs the global subscriber. Logs go to stderr so stdout stays JSON.
fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
