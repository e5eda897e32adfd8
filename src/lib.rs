//! Infravest - Micro-investment backend for tokenized infrastructure projects
//!
//! This crate scores investor risk, matches investors to projects, generates
//! ranked recommendations, simulates investments and portfolio performance,
//! and mirrors every state change to a distributed ledger.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
