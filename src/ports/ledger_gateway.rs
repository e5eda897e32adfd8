//! LedgerGateway port - Token and message operations on the consensus ledger.
//!
//! The wire protocol belongs to the adapter. The port only fixes the four
//! operations the application needs and the receipts they return.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Parameters for minting a fungible token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDefinition {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Supply in the smallest unit.
    pub initial_supply: u64,
    pub treasury_account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReceipt {
    pub token_id: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    pub topic_id: String,
    pub sequence_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub token_id: String,
    pub from_account: String,
    pub to_account: String,
    /// Amount in the smallest unit.
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transaction_id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub account_id: String,
    pub token_id: String,
    pub balance: u64,
    pub decimals: u8,
}

/// Port for the consensus/ledger service.
///
/// # Contract
///
/// - Failures are reported as `ErrorCode::LedgerError`
/// - `submit_message` returns only after the ledger has ordered the message
/// - `get_balance` for an account that never held the token returns 0
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn create_token(&self, definition: &TokenDefinition) -> Result<TokenReceipt, DomainError>;

    async fn submit_message(
        &self,
        topic_id: &str,
        message: &[u8],
    ) -> Result<MessageReceipt, DomainError>;

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, DomainError>;

    async fn get_balance(
        &self,
        account_id: &str,
        token_id: &str,
    ) -> Result<TokenBalance, DomainError>;
}
