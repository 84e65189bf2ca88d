//! Attachee records, departments, and the record store seam.

mod error;
mod filter;
mod store;
mod types;

pub use error::StoreError;
pub use filter::CompletedFilter;
pub use store::AttacheeStore;
pub use types::{Attachee, CreateAttacheeInput, Department};
