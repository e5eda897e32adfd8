//! GetTokenBalance - Query handler for a cached project token balance.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::ports::{get_typed, set_typed, KeyValueStore, LedgerGateway, ProjectRepository, TokenBalance};

/// Default lifetime of a cached balance.
pub const DEFAULT_BALANCE_TTL: Duration = Duration::from_secs(600);

/// Cache key for an account's balance of a token.
pub fn balance_key(account_id: &str, token_id: &str) -> String {
    format!("balance:{}:{}", account_id, token_id)
}

#[derive(Debug, Clone)]
pub struct GetTokenBalanceQuery {
    pub project_id: ProjectId,
    pub account_id: String,
}

pub struct GetTokenBalanceHandler {
    projects: Arc<dyn ProjectRepository>,
    ledger: Arc<dyn LedgerGateway>,
    cache: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl GetTokenBalanceHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        ledger: Arc<dyn LedgerGateway>,
        cache: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            projects,
            ledger,
            cache,
            ttl: DEFAULT_BALANCE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn handle(&self, query: GetTokenBalanceQuery) -> Result<TokenBalance, DomainError> {
        if query.account_id.trim().is_empty() {
            return Err(DomainError::validation("account_id", "Account id is required"));
        }

        let project = self
            .projects
            .find_by_id(&query.project_id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(query.project_id))?;
        let token_id = project.ledger_token_id.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ComputationPrecondition,
                "Project has not been tokenized yet",
            )
        })?;

        let key = balance_key(&query.account_id, &token_id);
        match get_typed::<TokenBalance>(self.cache.as_ref(), &key).await {
            Ok(Some(balance)) => return Ok(balance),
            Ok(None) => {}
            Err(e) => tracing::warn!(%key, "Balance cache read failed: {}", e),
        }

        let balance = self.ledger.get_balance(&query.account_id, &token_id).await?;
        if let Err(e) = set_typed(self.cache.as_ref(), &key, &balance, Some(self.ttl)).await {
            tracing::warn!(%key, "Balance cache write failed: {}", e);
        }
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::InMemoryLedger;
    use crate::adapters::storage::{InMemoryKeyValueStore, InMemoryProjectRepository};
    use crate::application::handlers::mirror::test_support::{project, tokenized};
    use crate::domain::project::{Project, RiskLevel};
    use crate::ports::{TokenDefinition, TransferRequest};

    async fn minted() -> (Project, Arc<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::new());
        let receipt = ledger
            .create_token(&TokenDefinition {
                name: "Solar".to_string(),
                symbol: "SOL".to_string(),
                decimals: 2,
                initial_supply: 10_000,
                treasury_account: "treasury".to_string(),
                memo: None,
            })
            .await
            .unwrap();
        let mut p = tokenized(project("Solar", "solar", RiskLevel::Low));
        p.ledger_token_id = Some(receipt.token_id);
        (p, ledger)
    }

    fn handler(p: Project, ledger: Arc<InMemoryLedger>, cache: Arc<InMemoryKeyValueStore>) -> GetTokenBalanceHandler {
        GetTokenBalanceHandler::new(
            Arc::new(InMemoryProjectRepository::with_projects(vec![p])),
            ledger,
            cache,
        )
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let (p, ledger) = minted().await;
        let id = p.id;
        let token_id = p.ledger_token_id.clone().unwrap();
        let cache = Arc::new(InMemoryKeyValueStore::new());
        let handler = handler(p, ledger.clone(), cache.clone());
        let query = GetTokenBalanceQuery {
            project_id: id,
            account_id: "treasury".to_string(),
        };

        let first = handler.handle(query.clone()).await.unwrap();
        assert_eq!(first.balance, 10_000);

        ledger
            .transfer(&TransferRequest {
                token_id,
                from_account: "treasury".to_string(),
                to_account: "alice".to_string(),
                amount: 500,
            })
            .await
            .unwrap();

        let second = handler.handle(query).await.unwrap();
        assert_eq!(second.balance, 10_000);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn untokenized_project_is_a_precondition_failure() {
        let p = project("Road", "road", RiskLevel::High);
        let id = p.id;
        let handler = handler(
            p,
            Arc::new(InMemoryLedger::new()),
            Arc::new(InMemoryKeyValueStore::new()),
        );

        let err = handler
            .handle(GetTokenBalanceQuery {
                project_id: id,
                account_id: "alice".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ComputationPrecondition);
    }
}
