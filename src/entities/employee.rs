//! Employee entity - Represents a member of staff on the payroll.
//!
//! Each employee carries a compensation model (`hourly` or `monthly`), the
//! rates that model needs, an annual leave-day quota, and optional contact
//! fields. The fixed monthly salary is nullable at the storage level; the
//! compensation calculator asserts its presence for monthly employees.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the employee
    pub name: String,
    /// How this employee is paid: per hour worked or a fixed monthly amount
    pub compensation_model: CompensationModel,
    /// Pay per normal hour (used by the `hourly` model)
    pub hourly_rate: f64,
    /// Pay per overtime hour (additive under both models)
    pub overtime_rate: f64,
    /// Fixed monthly salary; required when `compensation_model` is `monthly`
    pub fixed_monthly_salary: Option<f64>,
    /// Annual leave-day quota
    pub total_annual_leave_days: i32,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Optional contact e-mail address
    pub email: Option<String>,
    /// Soft delete flag - if true, employee is hidden but data is preserved
    pub is_deleted: bool,
}

/// Compensation model stored as a string-backed enum (`"hourly"` / `"monthly"`).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum CompensationModel {
    /// Paid per hour worked; leave days count as 8 paid normal hours
    #[sea_orm(string_value = "hourly")]
    Hourly,
    /// Paid a fixed monthly amount that already covers leave days
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many attendance days
    #[sea_orm(has_many = "super::attendance_day::Entity")]
    AttendanceDays,
    /// One employee has many bank-salary entries
    #[sea_orm(has_many = "super::bank_salary::Entity")]
    BankSalaries,
    /// One employee has many payment records
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    /// One employee has many change-history entries
    #[sea_orm(has_many = "super::change_history::Entity")]
    ChangeHistory,
}

impl Related<super::attendance_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceDays.def()
    }
}

impl Related<super::bank_salary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankSalaries.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::change_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
