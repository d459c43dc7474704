//! Employee business logic - Handles all employee-related operations.
//!
//! Provides functions for creating, retrieving, updating, and soft-deleting
//! employees. Profile updates diff the audited fields (rates, fixed salary,
//! leave quota) and write change-history entries for every value that
//! actually changed. All functions are async and return Result types for
//! error handling.

use crate::{
    core::history,
    entities::{CompensationModel, Employee, employee},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Arguments for creating a new employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Display name; must be non-empty
    pub name: String,
    /// Compensation model
    pub compensation_model: CompensationModel,
    /// Pay per normal hour
    pub hourly_rate: f64,
    /// Pay per overtime hour
    pub overtime_rate: f64,
    /// Fixed monthly salary; required when the model is `monthly`
    pub fixed_monthly_salary: Option<f64>,
    /// Annual leave-day quota
    pub total_annual_leave_days: i32,
    /// Optional contact phone
    pub phone: Option<String>,
    /// Optional contact e-mail
    pub email: Option<String>,
}

/// Partial update of an employee profile. `None` fields are left unchanged;
/// the double-`Option` fields distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New compensation model
    pub compensation_model: Option<CompensationModel>,
    /// New hourly rate
    pub hourly_rate: Option<f64>,
    /// New overtime rate
    pub overtime_rate: Option<f64>,
    /// New fixed monthly salary (`Some(None)` clears it)
    pub fixed_monthly_salary: Option<Option<f64>>,
    /// New annual leave-day quota
    pub total_annual_leave_days: Option<i32>,
    /// New contact phone (`Some(None)` clears it)
    pub phone: Option<Option<String>>,
    /// New contact e-mail (`Some(None)` clears it)
    pub email: Option<Option<String>>,
}

fn validate_rate(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn validate_profile(
    name: &str,
    model: CompensationModel,
    hourly_rate: f64,
    overtime_rate: f64,
    fixed_monthly_salary: Option<f64>,
    total_annual_leave_days: i32,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Employee name cannot be empty".to_string(),
        });
    }

    validate_rate(hourly_rate)?;
    validate_rate(overtime_rate)?;

    if let Some(fixed) = fixed_monthly_salary {
        validate_rate(fixed)?;
    }

    if model == CompensationModel::Monthly && fixed_monthly_salary.is_none() {
        return Err(Error::Validation {
            message: "Monthly employees require a fixed monthly salary".to_string(),
        });
    }

    if total_annual_leave_days < 0 {
        return Err(Error::Validation {
            message: format!("Annual leave quota cannot be negative: {total_annual_leave_days}"),
        });
    }

    Ok(())
}

/// Creates a new employee with the specified parameters, performing input validation.
///
/// Validates that the name is not empty, the rates are non-negative finite
/// numbers, and that monthly employees carry a fixed monthly salary.
pub async fn create_employee(
    db: &DatabaseConnection,
    new: NewEmployee,
) -> Result<employee::Model> {
    validate_profile(
        &new.name,
        new.compensation_model,
        new.hourly_rate,
        new.overtime_rate,
        new.fixed_monthly_salary,
        new.total_annual_leave_days,
    )?;

    let employee = employee::ActiveModel {
        name: Set(new.name.trim().to_string()),
        compensation_model: Set(new.compensation_model),
        hourly_rate: Set(new.hourly_rate),
        overtime_rate: Set(new.overtime_rate),
        fixed_monthly_salary: Set(new.fixed_monthly_salary),
        total_annual_leave_days: Set(new.total_annual_leave_days),
        phone: Set(new.phone),
        email: Set(new.email),
        is_deleted: Set(false),
        ..Default::default()
    };

    let result = employee.insert(db).await?;
    Ok(result)
}

/// Retrieves all active (non-deleted) employees, ordered alphabetically by name.
pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .filter(employee::Column::IsDeleted.eq(false))
        .order_by_asc(employee::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific employee by their unique ID, returning None if not found or deleted.
pub async fn get_employee(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .filter(employee::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by display name, ignoring soft-deleted rows.
pub async fn get_employee_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::Name.eq(name))
        .filter(employee::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Resolves an active employee or fails with `EmployeeNotFound`.
/// Shared by every mutation path that needs the employee row first.
pub(crate) async fn require_employee<C>(db: &C, employee_id: i64) -> Result<employee::Model>
where
    C: ConnectionTrait,
{
    Employee::find_by_id(employee_id)
        .filter(employee::Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })
}

/// Updates an employee profile and records change-history entries for every
/// audited field whose value actually changed.
///
/// Audited fields: hourly rate, overtime rate, fixed monthly salary, annual
/// leave quota. Unchanged fields produce no history entries. The row update
/// and the history inserts share one database transaction.
pub async fn update_profile(
    db: &DatabaseConnection,
    employee_id: i64,
    update: ProfileUpdate,
) -> Result<employee::Model> {
    let txn = db.begin().await?;

    let old = require_employee(&txn, employee_id).await?;

    let name = update.name.unwrap_or_else(|| old.name.clone());
    let model = update.compensation_model.unwrap_or(old.compensation_model);
    let hourly_rate = update.hourly_rate.unwrap_or(old.hourly_rate);
    let overtime_rate = update.overtime_rate.unwrap_or(old.overtime_rate);
    let fixed_monthly_salary = update
        .fixed_monthly_salary
        .unwrap_or(old.fixed_monthly_salary);
    let total_annual_leave_days = update
        .total_annual_leave_days
        .unwrap_or(old.total_annual_leave_days);

    validate_profile(
        &name,
        model,
        hourly_rate,
        overtime_rate,
        fixed_monthly_salary,
        total_annual_leave_days,
    )?;

    let mut active: employee::ActiveModel = old.clone().into();
    active.name = Set(name.trim().to_string());
    active.compensation_model = Set(model);
    active.hourly_rate = Set(hourly_rate);
    active.overtime_rate = Set(overtime_rate);
    active.fixed_monthly_salary = Set(fixed_monthly_salary);
    active.total_annual_leave_days = Set(total_annual_leave_days);
    if let Some(phone) = update.phone {
        active.phone = Set(phone);
    }
    if let Some(email) = update.email {
        active.email = Set(email);
    }

    let updated = active.update(&txn).await?;

    let today = Utc::now().date_naive();
    history::record_profile_changes(&txn, &old, &updated, today).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Soft-deletes an employee. The row is hidden from listings and mutation
/// paths; its attendance, leave, payment, and bank-salary records stay in
/// the store but no longer surface anywhere.
pub async fn soft_delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    let employee = require_employee(db, employee_id).await?;

    let mut active: employee::ActiveModel = employee.into();
    active.is_deleted = Set(true);
    active.update(db).await?;

    Ok(())
}
