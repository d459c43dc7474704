//! Leave usage entity - Running count of leave days used per employee.
//!
//! One row per employee, created lazily on the first leave mutation. The
//! annual quota is read from `employee::Model::total_annual_leave_days`,
//! never duplicated here. `days_used` is kept in step with attendance
//! transitions by `core::leave` and is never allowed below zero.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Leave usage database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_usage")]
pub struct Model {
    /// Unique identifier for the usage row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this counter belongs to (one row per employee)
    pub employee_id: i64,
    /// Leave days used so far this year; never negative
    pub days_used: i32,
}

/// Defines relationships between LeaveUsage and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each usage counter belongs to one employee
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
