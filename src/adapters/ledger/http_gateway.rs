//! HTTP Ledger Gateway - `LedgerGateway` over the consensus service's REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpLedgerConfig::new("https://ledger.example.com", "0.0.1001", api_key)
//!     .with_timeout(Duration::from_secs(10))
//!     .with_max_retries(3);
//!
//! let gateway = HttpLedgerGateway::new(config)?;
//! ```
//!
//! # Authentication
//!
//! Every request carries the operator id, the API key as a bearer token and
//! an `x-ledger-signature` header: `t=<unix secs>,v1=<hex HMAC-SHA256>` over
//! `"<t>.<body>"`, keyed with the API key.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{
    LedgerGateway, MessageReceipt, TokenBalance, TokenReceipt, TokenDefinition, TransferReceipt,
    TransferRequest,
};

type HmacSha256 = Hmac<Sha256>;

/// Configuration for the HTTP ledger gateway.
#[derive(Debug, Clone)]
pub struct HttpLedgerConfig {
    /// Base URL of the REST gateway.
    pub base_url: String,
    /// Operator account that pays for transactions.
    pub operator_id: String,
    api_key: Secret<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each attempt.
    pub backoff: Duration,
}

impl HttpLedgerConfig {
    pub fn new(
        base_url: impl Into<String>,
        operator_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            operator_id: operator_id.into(),
            api_key: Secret::new(api_key.into()),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff: Duration::from_millis(500),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the initial retry delay.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Failure of a single attempt.
#[derive(Debug)]
enum AttemptError {
    /// Worth retrying: timeouts, connection failures, 429 and 5xx.
    Transient(String),
    /// Final: the ledger rejected the request.
    Rejected(String),
}

impl AttemptError {
    fn into_domain(self, operation: &str) -> DomainError {
        let message = match self {
            AttemptError::Transient(m) | AttemptError::Rejected(m) => m,
        };
        DomainError::new(
            ErrorCode::LedgerError,
            format!("Ledger {} failed: {}", operation, message),
        )
        .with_detail("operation", operation)
    }
}

#[derive(Serialize)]
struct SubmitMessageBody<'a> {
    message: &'a str,
}

/// Ledger gateway speaking JSON over HTTPS.
pub struct HttpLedgerGateway {
    config: HttpLedgerConfig,
    client: Client,
}

impl HttpLedgerGateway {
    pub fn new(config: HttpLedgerConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.config.base_url, path)
    }

    /// Signature header value for a body sent at `timestamp`.
    fn sign(&self, timestamp: i64, body: &[u8]) -> Result<String, AttemptError> {
        let mut mac = HmacSha256::new_from_slice(self.config.api_key().as_bytes())
            .map_err(|e| AttemptError::Rejected(format!("Invalid signing key: {}", e)))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        Ok(format!(
            "t={},v1={}",
            timestamp,
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    async fn attempt(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Response, AttemptError> {
        let body = body.unwrap_or_default().to_vec();
        let signature = self.sign(Timestamp::now().as_unix_secs(), &body)?;

        let response = self
            .client
            .request(method, self.url(path))
            .bearer_auth(self.config.api_key())
            .header("x-operator-id", &self.config.operator_id)
            .header("x-ledger-signature", signature)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AttemptError::Transient(format!(
                        "timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    AttemptError::Transient(format!("connection failed: {}", e))
                } else {
                    AttemptError::Rejected(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Err(AttemptError::Transient(format!("status {}: {}", status, error_body)))
        } else {
            Err(AttemptError::Rejected(format!("status {}: {}", status, error_body)))
        }
    }

    /// Sends a request, retrying transient failures with exponential backoff.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, DomainError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(method.clone(), path, body.as_deref()).await {
                Ok(response) => {
                    return response.json::<T>().await.map_err(|e| {
                        DomainError::new(
                            ErrorCode::LedgerError,
                            format!("Ledger {} returned an unreadable body: {}", operation, e),
                        )
                    });
                }
                Err(AttemptError::Transient(message)) if retry_count < self.config.max_retries => {
                    tracing::warn!(
                        operation,
                        retry_count,
                        error = %message,
                        "Transient ledger failure, retrying"
                    );
                    sleep(self.config.backoff * (1 << retry_count)).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err.into_domain(operation)),
            }
        }
    }

    fn encode<T: Serialize>(operation: &str, value: &T) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(value).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to encode ledger {} request: {}", operation, e),
            )
        })
    }
}

#[async_trait]
impl LedgerGateway for HttpLedgerGateway {
    async fn create_token(&self, definition: &TokenDefinition) -> Result<TokenReceipt, DomainError> {
        let body = Self::encode("create_token", definition)?;
        self.call("create_token", Method::POST, "/tokens", Some(body))
            .await
    }

    async fn submit_message(
        &self,
        topic_id: &str,
        message: &[u8],
    ) -> Result<MessageReceipt, DomainError> {
        let text = String::from_utf8_lossy(message);
        let body = Self::encode("submit_message", &SubmitMessageBody { message: &text })?;
        self.call(
            "submit_message",
            Method::POST,
            &format!("/topics/{}/messages", topic_id),
            Some(body),
        )
        .await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, DomainError> {
        let body = Self::encode("transfer", request)?;
        self.call(
            "transfer",
            Method::POST,
            &format!("/tokens/{}/transfers", request.token_id),
            Some(body),
        )
        .await
    }

    async fn get_balance(
        &self,
        account_id: &str,
        token_id: &str,
    ) -> Result<TokenBalance, DomainError> {
        self.call(
            "get_balance",
            Method::GET,
            &format!("/accounts/{}/tokens/{}/balance", account_id, token_id),
            None,
        )
        .await
    }
}

impl std::fmt::Debug for HttpLedgerGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLedgerGateway")
            .field("base_url", &self.config.base_url)
            .field("operator_id", &self.config.operator_id)
            .finish_non_exhaustive()
    }
}
