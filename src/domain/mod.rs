//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `project` - Infrastructure projects, risk assessment and tokenomics
//! - `user` - Investors and their risk profiles
//! - `portfolio` - Holdings and portfolio valuation
//! - `advisory` - Pure services for suitability, recommendations and simulation

pub mod advisory;
pub mod foundation;
pub mod portfolio;
pub mod project;
pub mod user;
