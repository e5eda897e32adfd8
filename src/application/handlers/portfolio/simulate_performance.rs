//! SimulatePerformance - Query handler running the portfolio random walk.

use std::sync::Arc;

use crate::domain::advisory::{
    PerformanceInput, PerformanceSimulation, PerformanceSimulator, RandomSource, SeededRandom,
    TargetAllocation, DEFAULT_SIMULATION_MONTHS,
};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ProjectRepository;

#[derive(Debug, Clone)]
pub struct SimulatePerformanceQuery {
    pub user_id: UserId,
    pub total_investment: f64,
    pub allocations: Vec<TargetAllocation>,
    pub months: Option<u32>,
    /// Fixes the random walk; fresh entropy when absent.
    pub seed: Option<u64>,
}

pub struct SimulatePerformanceHandler {
    projects: Arc<dyn ProjectRepository>,
    default_months: u32,
}

impl SimulatePerformanceHandler {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self {
            projects,
            default_months: DEFAULT_SIMULATION_MONTHS,
        }
    }

    pub fn with_default_months(mut self, months: u32) -> Self {
        self.default_months = months;
        self
    }

    pub async fn handle(
        &self,
        query: SimulatePerformanceQuery,
    ) -> Result<PerformanceSimulation, DomainError> {
        let mut rng = match query.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        self.run(query, &mut rng).await
    }

    /// Same as `handle` with a caller-supplied random source.
    pub async fn run(
        &self,
        query: SimulatePerformanceQuery,
        rng: &mut dyn RandomSource,
    ) -> Result<PerformanceSimulation, DomainError> {
        let projects = self.projects.list().await?;
        let months = query.months.unwrap_or(self.default_months);
        let input = PerformanceInput {
            total_investment: query.total_investment,
            allocations: query.allocations,
        };

        let simulation = PerformanceSimulator::simulate(&input, &projects, months, rng)?;
        tracing::debug!(
            user_id = %query.user_id,
            months,
            final_value = simulation.final_value,
            "Performance simulated"
        );
        Ok(simulation)
    }
}
