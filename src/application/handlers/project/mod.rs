//! Project token handlers.
//!
//! Minting, balance lookups and settled purchases on the ledger.

mod create_project_token;
mod get_token_balance;
mod invest_in_project;

pub use create_project_token::{
    CreateProjectTokenCommand, CreateProjectTokenHandler, CreateProjectTokenResult,
};
pub use get_token_balance::{
    balance_key, GetTokenBalanceHandler, GetTokenBalanceQuery, DEFAULT_BALANCE_TTL,
};
pub use invest_in_project::{InvestInProjectCommand, InvestInProjectHandler, InvestInProjectResult};
