//! CreateProjectToken - Command handler minting a project's ledger token.

use std::sync::Arc;

use crate::application::handlers::mirror::mirror_event;
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventId, ProjectId, Timestamp,
};
use crate::domain::project::{Project, ProjectTokenCreated};
use crate::ports::{EventPublisher, LedgerGateway, ProjectRepository, TokenDefinition};

#[derive(Debug, Clone)]
pub struct CreateProjectTokenCommand {
    pub project_id: ProjectId,
}

#[derive(Debug, Clone)]
pub struct CreateProjectTokenResult {
    pub project: Project,
    pub token_id: String,
    pub transaction_id: String,
    pub mirror_error: Option<String>,
}

pub struct CreateProjectTokenHandler {
    projects: Arc<dyn ProjectRepository>,
    ledger: Arc<dyn LedgerGateway>,
    publisher: Arc<dyn EventPublisher>,
    treasury_account: String,
}

impl CreateProjectTokenHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        ledger: Arc<dyn LedgerGateway>,
        publisher: Arc<dyn EventPublisher>,
        treasury_account: impl Into<String>,
    ) -> Self {
        Self {
            projects,
            ledger,
            publisher,
            treasury_account: treasury_account.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProjectTokenCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateProjectTokenResult, DomainError> {
        let project = self
            .projects
            .find_by_id(&cmd.project_id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(cmd.project_id))?;

        if let Some(existing) = &project.ledger_token_id {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Project already has token {}", existing),
            )
            .with_detail("token_id", existing.clone()));
        }

        let tokenomics = project.tokenomics.as_ref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ComputationPrecondition,
                "Project has no tokenomics configured",
            )
        })?;
        tokenomics.validate_allocations()?;
        tokenomics.price_per_token()?;

        let initial_supply = 10u64
            .checked_pow(u32::from(tokenomics.decimals))
            .and_then(|scale| tokenomics.total_supply.checked_mul(scale))
            .ok_or_else(|| {
                DomainError::validation("total_supply", "Supply overflows at the given decimals")
            })?;

        let definition = TokenDefinition {
            name: project.name.clone(),
            symbol: tokenomics.symbol.clone(),
            decimals: tokenomics.decimals,
            initial_supply,
            treasury_account: self.treasury_account.clone(),
            memo: Some(format!("project:{}", project.id)),
        };
        let receipt = self.ledger.create_token(&definition).await?;

        let total_supply = tokenomics.total_supply;
        let symbol = tokenomics.symbol.clone();
        let mut project = project;
        project.ledger_token_id = Some(receipt.token_id.clone());
        self.projects.save(&project).await?;

        tracing::info!(
            project_id = %project.id,
            token_id = %receipt.token_id,
            %symbol,
            "Project token created"
        );

        let event = ProjectTokenCreated {
            event_id: EventId::new(),
            project_id: project.id,
            token_id: receipt.token_id.clone(),
            symbol,
            total_supply,
            created_at: Timestamp::now(),
        };
        let mirror_error = mirror_event(self.publisher.as_ref(), &event, &metadata).await;

        Ok(CreateProjectTokenResult {
            project,
            token_id: receipt.token_id,
            transaction_id: receipt.transaction_id,
            mirror_error,
        })
    }
}
