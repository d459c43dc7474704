//! Bank salary entity - A bank-designated salary amount for one month.
//!
//! Multiple entries may exist for the same (`employee_id`, `month`, `year`);
//! they are never merged or deduplicated. The monthly bank-salary target is
//! the sum over all matching rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bank salary database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_salaries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this entry belongs to
    pub employee_id: i64,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Bank-designated amount; always positive
    pub amount: f64,
}

/// Defines relationships between BankSalary and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each bank-salary entry belongs to one employee
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
