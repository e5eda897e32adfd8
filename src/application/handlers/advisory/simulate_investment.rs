//! SimulateInvestment - Command handler projecting an investment and
//! recording it as a simulated holding.

use std::sync::Arc;

use crate::application::handlers::mirror::mirror_event;
use crate::domain::advisory::{
    InvestmentSimulated, InvestmentSimulator, SimulationResult, DEFAULT_SIMULATION_MONTHS,
};
use crate::domain::foundation::{CommandMetadata, DomainError, EventId, ProjectId, Timestamp, UserId};
use crate::domain::portfolio::{InvestmentLine, Portfolio};
use crate::ports::{EventPublisher, ProjectRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct SimulateInvestmentCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub amount: f64,
    /// Months to project; the handler default applies when absent.
    pub duration_months: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SimulateInvestmentResult {
    pub simulation: SimulationResult,
    pub portfolio: Portfolio,
    pub mirror_error: Option<String>,
}

pub struct SimulateInvestmentHandler {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    publisher: Arc<dyn EventPublisher>,
    default_months: u32,
}

impl SimulateInvestmentHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            projects,
            publisher,
            default_months: DEFAULT_SIMULATION_MONTHS,
        }
    }

    pub fn with_default_months(mut self, months: u32) -> Self {
        self.default_months = months;
        self
    }

    pub async fn handle(
        &self,
        cmd: SimulateInvestmentCommand,
        metadata: CommandMetadata,
    ) -> Result<SimulateInvestmentResult, DomainError> {
        let investor = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&cmd.user_id))?;
        let project = self
            .projects
            .find_by_id(&cmd.project_id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(cmd.project_id))?;

        let months = cmd.duration_months.unwrap_or(self.default_months);
        let simulation = InvestmentSimulator::simulate(&cmd.user_id, &project, cmd.amount, months)?;

        // An unpriceable token still gets a simulated holding at par.
        let unit_price = match project.unit_price() {
            Ok(price) => price,
            Err(err) => {
                tracing::warn!(
                    project_id = %project.id,
                    error = %err,
                    "Token price unavailable, recording holding at unit price 1.0"
                );
                1.0
            }
        };

        let now = Timestamp::now();
        let portfolio = investor
            .portfolio
            .with_investment(InvestmentLine {
                project_id: project.id,
                category: project.category,
                amount: cmd.amount,
                unit_price,
                simulated: true,
            })?
            .revalued(now);

        let investor = investor.with_portfolio(portfolio.clone(), now);
        self.users.save(&investor).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            project_id = %project.id,
            amount = cmd.amount,
            months,
            final_value = simulation.final_value,
            "Investment simulated"
        );

        let event = InvestmentSimulated {
            event_id: EventId::new(),
            user_id: cmd.user_id.clone(),
            result: simulation.clone(),
            simulated_at: now,
        };
        let mirror_error = mirror_event(self.publisher.as_ref(), &event, &metadata).await;

        Ok(SimulateInvestmentResult {
            simulation,
            portfolio,
            mirror_error,
        })
    }
}
