//! String-backed enums stored in the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attachee lifecycle status column; stored values are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AttacheeStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Completed")]
    Completed,
}
