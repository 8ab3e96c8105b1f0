//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod resolver;

#[cfg(test)]
mod props;

pub use conversion::{apportion, convert_to_minor};
pub use error::RateError;
pub use exchange::FxRate;
pub use resolver::resolve_rate;
