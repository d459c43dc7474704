//! Attendance day entity - One record per employee per calendar day.
//!
//! A day is either a worked day (`normal_hours`/`overtime_hours`) or a leave
//! day. Invariant: `is_leave` implies `normal_hours == 8.0` and
//! `overtime_hours == 0.0`; every write path in `core::attendance` and
//! `core::leave` canonicalizes to this shape, and the aggregator re-applies
//! it defensively at read time. At most one row exists per
//! (`employee_id`, `date`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance day database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_days")]
pub struct Model {
    /// Unique identifier for the attendance record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this day belongs to
    pub employee_id: i64,
    /// Calendar day the record tracks
    pub date: Date,
    /// Normal hours worked (canonically 8.0 on leave days)
    pub normal_hours: f64,
    /// Overtime hours worked (canonically 0.0 on leave days)
    pub overtime_hours: f64,
    /// Whether this day is a leave day
    pub is_leave: bool,
    /// Optional leave-type label (e.g. "annual", "sick")
    pub leave_type: Option<String>,
}

/// Defines relationships between AttendanceDay and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attendance day belongs to one employee
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
