//! InvestInProject - Command handler settling a real token purchase.
//!
//! Units move from the treasury to the investor's ledger account and the
//! portfolio records a non-simulated holding.

use std::sync::Arc;

use super::get_token_balance::balance_key;
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, ProjectId, Timestamp, UserId,
};
use crate::domain::portfolio::{InvestmentLine, Portfolio};
use crate::ports::{
    KeyValueStore, LedgerGateway, ProjectRepository, TransferReceipt, TransferRequest,
    UserRepository,
};

#[derive(Debug, Clone)]
pub struct InvestInProjectCommand {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub amount: f64,
    /// Ledger account receiving the tokens.
    pub account_id: String,
}

#[derive(Debug, Clone)]
pub struct InvestInProjectResult {
    pub transfer: TransferReceipt,
    pub units: f64,
    pub portfolio: Portfolio,
}

pub struct InvestInProjectHandler {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    ledger: Arc<dyn LedgerGateway>,
    cache: Arc<dyn KeyValueStore>,
    treasury_account: String,
}

impl InvestInProjectHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        ledger: Arc<dyn LedgerGateway>,
        cache: Arc<dyn KeyValueStore>,
        treasury_account: impl Into<String>,
    ) -> Self {
        Self {
            users,
            projects,
            ledger,
            cache,
            treasury_account: treasury_account.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: InvestInProjectCommand,
        metadata: CommandMetadata,
    ) -> Result<InvestInProjectResult, DomainError> {
        if cmd.account_id.trim().is_empty() {
            return Err(DomainError::validation("account_id", "Account id is required"));
        }

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

        let minimum = project.investment_metrics.min_investment_amount;
        if !cmd.amount.is_finite() || cmd.amount < minimum || cmd.amount <= 0.0 {
            return Err(DomainError::new(
                ErrorCode::InsufficientAmount,
                format!("Minimum investment amount is {:.2}", minimum),
            )
            .with_detail("minimum", format!("{:.2}", minimum)));
        }

        let token_id = project.ledger_token_id.clone().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ComputationPrecondition,
                "Project has not been tokenized yet",
            )
        })?;
        let decimals = project.tokenomics.as_ref().map(|t| t.decimals).unwrap_or(0);
        let unit_price = project.unit_price()?;
        let units = cmd.amount / unit_price;
        let smallest_units = (units * 10f64.powi(i32::from(decimals))).floor();
        if smallest_units < 1.0 || smallest_units > u64::MAX as f64 {
            return Err(DomainError::validation(
                "amount",
                "Amount does not buy a transferable number of units",
            ));
        }

        let transfer = self
            .ledger
            .transfer(&TransferRequest {
                token_id: token_id.clone(),
                from_account: self.treasury_account.clone(),
                to_account: cmd.account_id.clone(),
                amount: smallest_units as u64,
            })
            .await?;

        let now = Timestamp::now();
        let portfolio = investor
            .portfolio
            .with_investment(InvestmentLine {
                project_id: project.id,
                category: project.category,
                amount: cmd.amount,
                unit_price,
                simulated: false,
            })?
            .revalued(now);
        let investor = investor.with_portfolio(portfolio.clone(), now);
        self.users.save(&investor).await?;

        for account in [&cmd.account_id, &self.treasury_account] {
            let key = balance_key(account, &token_id);
            if let Err(e) = self.cache.evict(&key).await {
                tracing::warn!(%key, "Balance cache eviction failed: {}", e);
            }
        }

        tracing::info!(
            user_id = %cmd.user_id,
            project_id = %project.id,
            transaction_id = %transfer.transaction_id,
            correlation_id = %metadata.correlation_id(),
            units,
            "Investment settled"
        );

        Ok(InvestInProjectResult {
            transfer,
            units,
            portfolio,
        })
    }
}
