//! In-memory ledger for tests and local development.
//!
//! Mints tokens into the treasury account, tracks balances per account and
//! records every topic message so tests can assert on what was mirrored.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{
    LedgerGateway, MessageReceipt, TokenBalance, TokenReceipt, TokenDefinition, TransferReceipt,
    TransferRequest,
};

#[derive(Debug, Clone)]
struct TokenState {
    decimals: u8,
    balances: HashMap<String, u64>,
}

#[derive(Debug, Default)]
struct LedgerState {
    next_entity: u64,
    next_transaction: u64,
    tokens: HashMap<String, TokenState>,
    topics: HashMap<String, Vec<Vec<u8>>>,
}

impl LedgerState {
    fn next_token_id(&mut self) -> String {
        self.next_entity += 1;
        format!("0.0.{}", 9000 + self.next_entity)
    }

    fn next_transaction_id(&mut self) -> String {
        self.next_transaction += 1;
        format!("tx-{}", self.next_transaction)
    }
}

/// In-memory ledger.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
    reject_messages: Arc<AtomicBool>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `submit_message` fail (or succeed again).
    pub fn set_reject_messages(&self, reject: bool) {
        self.reject_messages.store(reject, Ordering::SeqCst);
    }

    /// Messages submitted to a topic, oldest first.
    pub async fn messages(&self, topic_id: &str) -> Vec<Vec<u8>> {
        self.state
            .read()
            .await
            .topics
            .get(topic_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn token_count(&self) -> usize {
        self.state.read().await.tokens.len()
    }
}

fn ledger_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::LedgerError, message)
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn create_token(&self, definition: &TokenDefinition) -> Result<TokenReceipt, DomainError> {
        if definition.symbol.trim().is_empty() {
            return Err(ledger_error("Token symbol is required"));
        }

        let mut state = self.state.write().await;
        let token_id = state.next_token_id();
        let transaction_id = state.next_transaction_id();
        let mut balances = HashMap::new();
        balances.insert(definition.treasury_account.clone(), definition.initial_supply);
        state.tokens.insert(
            token_id.clone(),
            TokenState {
                decimals: definition.decimals,
                balances,
            },
        );

        Ok(TokenReceipt {
            token_id,
            transaction_id,
        })
    }

    async fn submit_message(
        &self,
        topic_id: &str,
        message: &[u8],
    ) -> Result<MessageReceipt, DomainError> {
        if self.reject_messages.load(Ordering::SeqCst) {
            return Err(ledger_error(format!(
                "Topic {} rejected the message",
                topic_id
            )));
        }

        let mut state = self.state.write().await;
        let messages = state.topics.entry(topic_id.to_string()).or_default();
        messages.push(message.to_vec());

        Ok(MessageReceipt {
            topic_id: topic_id.to_string(),
            sequence_number: messages.len() as u64,
        })
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, DomainError> {
        let mut state = self.state.write().await;
        let token = state
            .tokens
            .get_mut(&request.token_id)
            .ok_or_else(|| ledger_error(format!("Unknown token {}", request.token_id)))?;

        let available = token
            .balances
            .get(&request.from_account)
            .copied()
            .unwrap_or(0);
        if available < request.amount {
            return Err(ledger_error(format!(
                "Insufficient token balance: {} < {}",
                available, request.amount
            )));
        }

        token
            .balances
            .insert(request.from_account.clone(), available - request.amount);
        *token
            .balances
            .entry(request.to_account.clone())
            .or_insert(0) += request.amount;

        Ok(TransferReceipt {
            transaction_id: state.next_transaction_id(),
            status: "SUCCESS".to_string(),
        })
    }

    async fn get_balance(
        &self,
        account_id: &str,
        token_id: &str,
    ) -> Result<TokenBalance, DomainError> {
        let state = self.state.read().await;
        let token = state
            .tokens
            .get(token_id)
            .ok_or_else(|| ledger_error(format!("Unknown token {}", token_id)))?;

        Ok(TokenBalance {
            account_id: account_id.to_string(),
            token_id: token_id.to_string(),
            balance: token.balances.get(account_id).copied().unwrap_or(0),
            decimals: token.decimals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(supply: u64) -> TokenDefinition {
        TokenDefinition {
            name: "Water Works".to_string(),
            symbol: "H2O".to_string(),
            decimals: 2,
            initial_supply: supply,
            treasury_account: "treasury".to_string(),
            memo: None,
        }
    }

    #[tokio::test]
    async fn minted_supply_sits_in_treasury() {
        let ledger = InMemoryLedger::new();
        let receipt = ledger.create_token(&definition(1000)).await.unwrap();
        let balance = ledger
            .get_balance("treasury", &receipt.token_id)
            .await
            .unwrap();
        assert_eq!(balance.balance, 1000);
        assert_eq!(ledger.token_count().await, 1);
    }

    #[tokio::test]
    async fn transfer_moves_balance() {
        let ledger = InMemoryLedger::new();
        let token = ledger.create_token(&definition(1000)).await.unwrap().token_id;
        ledger
            .transfer(&TransferRequest {
                token_id: token.clone(),
                from_account: "treasury".to_string(),
                to_account: "alice".to_string(),
                amount: 300,
            })
            .await
            .unwrap();

        assert_eq!(ledger.get_balance("alice", &token).await.unwrap().balance, 300);
        assert_eq!(ledger.get_balance("treasury", &token).await.unwrap().balance, 700);
        assert_eq!(ledger.get_balance("bob", &token).await.unwrap().balance, 0);
    }

    #[tokio::test]
    async fn overdraft_is_rejected() {
        let ledger = InMemoryLedger::new();
        let token = ledger.create_token(&definition(10)).await.unwrap().token_id;
        let err = ledger
            .transfer(&TransferRequest {
                token_id: token,
                from_account: "treasury".to_string(),
                to_account: "alice".to_string(),
                amount: 11,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LedgerError);
    }

    #[tokio::test]
    async fn messages_are_sequenced_per_topic() {
        let ledger = InMemoryLedger::new();
        let first = ledger.submit_message("a", b"1").await.unwrap();
        let second = ledger.submit_message("a", b"2").await.unwrap();
        let other = ledger.submit_message("b", b"3").await.unwrap();
        assert_eq!(first.sequence_number, 1);
        assert_eq!(second.sequence_number, 2);
        assert_eq!(other.sequence_number, 1);
        assert_eq!(ledger.messages("a").await, vec![b"1".to_vec(), b"2".to_vec()]);
    }

    #[tokio::test]
    async fn rejecting_mode_fails_messages() {
        let ledger = InMemoryLedger::new();
        ledger.set_reject_messages(true);
        assert!(ledger.submit_message("a", b"1").await.is_err());
        ledger.set_reject_messages(false);
        assert!(ledger.submit_message("a", b"1").await.is_ok());
    }
}
