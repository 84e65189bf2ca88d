//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod attachee;
pub mod department;

pub use attachee::AttacheeRepository;
pub use department::DepartmentRepository;
