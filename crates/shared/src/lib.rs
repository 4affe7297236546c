//! Shared types, errors, and configuration for Stratum.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list queries
//! - Application-wide error types
//! - Configuration management
//! - Telemetry (tracing) initialization

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::EngineConfig;
pub use error::{AppError, AppResult, ErrorKind};
