//! RebalancePortfolio - Query handler computing moves toward a target mix.

use crate::domain::advisory::{PerformanceSimulator, RebalanceAction, TargetAllocation};
use crate::domain::foundation::{DomainError, ValidationError};

#[derive(Debug, Clone)]
pub struct RebalancePortfolioQuery {
    pub current: Vec<TargetAllocation>,
    pub target: Vec<TargetAllocation>,
}

#[derive(Debug, Default)]
pub struct RebalancePortfolioHandler;

impl RebalancePortfolioHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: RebalancePortfolioQuery) -> Result<Vec<RebalanceAction>, DomainError> {
        for allocation in query.current.iter().chain(query.target.iter()) {
            if !allocation.allocation.is_finite()
                || !(0.0..=100.0).contains(&allocation.allocation)
            {
                return Err(ValidationError::out_of_range(
                    "allocation",
                    0.0,
                    100.0,
                    allocation.allocation,
                )
                .into());
            }
        }

        Ok(PerformanceSimulator::rebalance(&query.current, &query.target))
    }
}
