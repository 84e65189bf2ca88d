//! `SeaORM` entity definitions.

pub mod attachees;
pub mod departments;
pub mod sea_orm_active_enums;
