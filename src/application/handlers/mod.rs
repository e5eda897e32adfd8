//! Application handlers.
//!
//! Command and query handlers that load inputs through ports, run the pure
//! advisory services and persist or mirror the results.

pub mod advisory;
pub mod investor;
pub(crate) mod mirror;
pub mod portfolio;
pub mod project;
