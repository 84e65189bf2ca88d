//! Shared types, errors, and configuration for the attachee tracker.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Caller capability checked before any core call
//! - Application-wide error types
//! - Configuration management
//! - Tracing bootstrap

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use auth::Capability;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
