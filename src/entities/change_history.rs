//! Change history entity - Append-only audit trail of profile-field edits.
//!
//! Entries are only ever inserted, never updated or removed. Reads return
//! most-recent-first (date desc, id desc), which realizes the prepend
//! ordering callers see.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Change history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_history")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this entry is scoped to
    pub employee_id: i64,
    /// Wall-clock date of the edit that produced this entry
    pub date: Date,
    /// Which field changed (e.g. `"hourly_rate"`)
    pub change_type: String,
    /// Human-readable description of the old -> new transition
    pub description: String,
}

/// Defines relationships between ChangeHistory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
