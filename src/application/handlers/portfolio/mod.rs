//! Portfolio application handlers.
//!
//! Allocation planning, performance simulation and rebalancing.

mod plan_allocation;
mod rebalance_portfolio;
mod simulate_performance;

pub use plan_allocation::{PlanAllocationHandler, PlanAllocationQuery};
pub use rebalance_portfolio::{RebalancePortfolioHandler, RebalancePortfolioQuery};
pub use simulate_performance::{SimulatePerformanceHandler, SimulatePerformanceQuery};
