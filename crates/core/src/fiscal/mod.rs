//! Fiscal year and quarter management for the July-June calendar.
//!
//! - `calendar` - date to fiscal-year/quarter conversions and label checks
//! - `resolver` - `(fiscal year, quarter selector)` to date range
//! - `selection` - request-level selection with current-year fallback

pub mod calendar;
pub mod error;
pub mod resolver;
pub mod selection;
pub mod types;


pub use calendar::FiscalCalendar;
pub use error::FiscalError;
pub use resolver::{QuarterSelector, RangeResolver};
pub use selection::PeriodSelection;
pub use types::{DateRange, FiscalYear, Quarter};
