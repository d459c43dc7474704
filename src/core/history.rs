//! Change history business logic - Append-only audit trail for profile edits.
//!
//! Whenever an employee profile update changes one of the audited fields
//! (hourly rate, overtime rate, fixed monthly salary, annual leave quota),
//! one entry per changed field is recorded with a human-readable old -> new
//! description. Entries are never rewritten or removed; reads return them
//! most-recent-first.

use crate::{
    entities::{ChangeHistory, change_history, employee},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Change type recorded when the hourly rate changes.
pub const CHANGE_HOURLY_RATE: &str = "hourly_rate";
/// Change type recorded when the overtime rate changes.
pub const CHANGE_OVERTIME_RATE: &str = "overtime_rate";
/// Change type recorded when the fixed monthly salary changes.
pub const CHANGE_FIXED_SALARY: &str = "fixed_monthly_salary";
/// Change type recorded when the annual leave quota changes.
pub const CHANGE_LEAVE_QUOTA: &str = "annual_leave_quota";

fn format_optional_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| format!("{v}"))
}

/// Inserts one audit entry for an employee.
pub(crate) async fn append_entry<C>(
    db: &C,
    employee_id: i64,
    date: NaiveDate,
    change_type: &str,
    description: String,
) -> Result<change_history::Model>
where
    C: ConnectionTrait,
{
    let entry = change_history::ActiveModel {
        employee_id: Set(employee_id),
        date: Set(date),
        change_type: Set(change_type.to_string()),
        description: Set(description),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Diffs the audited profile fields of `old` vs `new` and appends one entry
/// per field whose value changed. Unchanged fields produce nothing.
/// Returns the number of entries written.
pub(crate) async fn record_profile_changes<C>(
    db: &C,
    old: &employee::Model,
    new: &employee::Model,
    date: NaiveDate,
) -> Result<usize>
where
    C: ConnectionTrait,
{
    let mut written = 0;

    if old.hourly_rate != new.hourly_rate {
        append_entry(
            db,
            new.id,
            date,
            CHANGE_HOURLY_RATE,
            format!(
                "Hourly rate changed from {} to {}",
                old.hourly_rate, new.hourly_rate
            ),
        )
        .await?;
        written += 1;
    }

    if old.overtime_rate != new.overtime_rate {
        append_entry(
            db,
            new.id,
            date,
            CHANGE_OVERTIME_RATE,
            format!(
                "Overtime rate changed from {} to {}",
                old.overtime_rate, new.overtime_rate
            ),
        )
        .await?;
        written += 1;
    }

    if old.fixed_monthly_salary != new.fixed_monthly_salary {
        append_entry(
            db,
            new.id,
            date,
            CHANGE_FIXED_SALARY,
            format!(
                "Fixed monthly salary changed from {} to {}",
                format_optional_amount(old.fixed_monthly_salary),
                format_optional_amount(new.fixed_monthly_salary)
            ),
        )
        .await?;
        written += 1;
    }

    if old.total_annual_leave_days != new.total_annual_leave_days {
        append_entry(
            db,
            new.id,
            date,
            CHANGE_LEAVE_QUOTA,
            format!(
                "Annual leave quota changed from {} to {}",
                old.total_annual_leave_days, new.total_annual_leave_days
            ),
        )
        .await?;
        written += 1;
    }

    Ok(written)
}

/// Retrieves the change history for an employee, most recent first
/// (date descending, insertion order descending within a day).
pub async fn list_history(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Vec<change_history::Model>> {
    ChangeHistory::find()
        .filter(change_history::Column::EmployeeId.eq(employee_id))
        .order_by_desc(change_history::Column::Date)
        .order_by_desc(change_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
