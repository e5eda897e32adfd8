//! HTTP adapter for project endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BalanceParams, BalanceResponse, InvestRequest, InvestResponse, SuitabilityResponse,
    TokenCreatedResponse,
};
pub use handlers::ProjectHandlers;
pub use routes::project_routes;
