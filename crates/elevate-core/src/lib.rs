//! Ambient building blocks shared by Elevate services.
//!
//! Configuration loading, the common error body, health probes, request-id
//! middleware, tracing setup and serde helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
