//! Portfolio domain - holdings and their valuation.

mod holding;
mod portfolio;

pub use holding::Holding;
pub use portfolio::{InvestmentLine, PerformanceSnapshot, Portfolio};
