//! Investment Simulator - Monthly compounding projection of one investment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, UserId};
use crate::domain::project::Project;

pub const DEFAULT_SIMULATION_MONTHS: u32 = 36;

/// Longest projection accepted, in months (50 years).
pub const MAX_SIMULATION_MONTHS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Investment amount {amount:.2} is below the minimum of {minimum:.2}")]
    InsufficientAmount { amount: f64, minimum: f64 },

    #[error("Investment amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("Duration must be between 1 and {max} months, got {months}")]
    DurationOutOfRange { months: u32, max: u32 },
}

impl From<SimulationError> for DomainError {
    fn from(err: SimulationError) -> Self {
        match &err {
            SimulationError::InsufficientAmount { minimum, .. } => {
                DomainError::new(ErrorCode::InsufficientAmount, err.to_string())
                    .with_detail("minimum", format!("{:.2}", minimum))
            }
            SimulationError::InvalidAmount(_) => DomainError::validation("amount", err.to_string()),
            SimulationError::DurationOutOfRange { .. } => {
                DomainError::validation("duration", err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub month: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub amount: f64,
    /// Months simulated.
    pub duration: u32,
    pub monthly_projections: Vec<MonthlyProjection>,
    pub final_value: f64,
    pub total_return: f64,
    pub total_return_percentage: f64,
}

/// Investment projection functions.
pub struct InvestmentSimulator;

impl InvestmentSimulator {
    /// Projects `amount` invested in `project` over `duration_months`.
    ///
    /// # Algorithm
    /// rate = expected_return / 100 / 12
    /// value[0] = amount, value[m] = value[m-1] * (1 + rate)
    ///
    /// # Errors
    /// `DurationOutOfRange` outside `1..=MAX_SIMULATION_MONTHS`;
    /// `InsufficientAmount` when `amount` is below the project minimum.
    pub fn simulate(
        user_id: &UserId,
        project: &Project,
        amount: f64,
        duration_months: u32,
    ) -> Result<SimulationResult, SimulationError> {
        if !(1..=MAX_SIMULATION_MONTHS).contains(&duration_months) {
            return Err(SimulationError::DurationOutOfRange {
                months: duration_months,
                max: MAX_SIMULATION_MONTHS,
            });
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(SimulationError::InvalidAmount(amount));
        }
        let minimum = project.investment_metrics.min_investment_amount;
        if amount < minimum {
            return Err(SimulationError::InsufficientAmount { amount, minimum });
        }

        let monthly_rate = Self::monthly_rate(project.financials.expected_return);
        let mut monthly_projections = Vec::with_capacity(duration_months as usize + 1);
        let mut value = amount;
        monthly_projections.push(MonthlyProjection { month: 0, value });
        for month in 1..=duration_months {
            value *= 1.0 + monthly_rate;
            monthly_projections.push(MonthlyProjection { month, value });
        }

        let total_return = value - amount;
        Ok(SimulationResult {
            user_id: user_id.clone(),
            project_id: project.id,
            amount,
            duration: duration_months,
            monthly_projections,
            final_value: value,
            total_return,
            total_return_percentage: total_return / amount * 100.0,
        })
    }

    /// Monthly rate for an annual percentage return.
    pub fn monthly_rate(expected_return_percent: f64) -> f64 {
        expected_return_percent / 100.0 / 12.0
    }
}
