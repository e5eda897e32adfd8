//! RegisterInvestor - Command handler creating the investor record.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::Investor;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct RegisterInvestorCommand {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

pub struct RegisterInvestorHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterInvestorHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: RegisterInvestorCommand,
        metadata: CommandMetadata,
    ) -> Result<Investor, DomainError> {
        if self.users.find_by_id(&cmd.user_id).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Investor already registered",
            ));
        }

        let investor = Investor::register(cmd.user_id, cmd.email, cmd.display_name, Timestamp::now())?;
        self.users.save(&investor).await?;

        tracing::info!(
            user_id = %investor.id,
            correlation_id = %metadata.correlation_id(),
            "Investor registered"
        );
        Ok(investor)
    }
}
