//! Core business logic for attachee placement tracking.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached through the [`attachee::AttacheeStore`] trait, implemented
//! by the db crate.
//!
//! # Modules
//!
//! - `fiscal` - July-June fiscal calendar, range resolution, period selection
//! - `status` - Placement lifecycle and reconciliation
//! - `aggregation` - Grouped counts, capacity warnings, quarterly breakdowns
//! - `attachee` - Record types and the store seam
//! - `clock` - Source of "today"

pub mod aggregation;
pub mod attachee;
pub mod clock;
pub mod fiscal;
pub mod status;
