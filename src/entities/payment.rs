//! Payment entity - A cash and/or bank disbursement made to an employee.
//!
//! Update/delete identity is the tuple (`employee_id`, `month`, `year`,
//! `payment_date`); callers wanting to adjust an existing disbursement on
//! the same date go through the tuple-keyed upsert rather than inserting a
//! duplicate. Distinct-date records within a month are expected and summed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this payment belongs to
    pub employee_id: i64,
    /// Calendar month (1-12) the payment counts toward
    pub month: i32,
    /// Calendar year the payment counts toward
    pub year: i32,
    /// Date the disbursement was made
    pub payment_date: Date,
    /// Amount paid in cash; never negative
    pub cash_amount: f64,
    /// Amount paid by bank transfer; never negative
    pub bank_amount: f64,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one employee
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
