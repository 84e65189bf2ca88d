//! Placement lifecycle.
//!
//! Status follows the end date: a placement is `Completed` once its end date
//! is on or before the reconciliation date. Reconciliation is a
//! [`CompletionPredicate`] handed to the store's conditional batch update, so
//! it only ever moves records from `Active` to `Completed`.

mod service;
mod types;


pub use service::StatusService;
pub use types::{AttacheeStatus, CompletionPredicate, UnknownStatus};
