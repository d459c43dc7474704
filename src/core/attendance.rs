//! Attendance business logic - Daily records and monthly aggregation.
//!
//! This module owns every write path for attendance days (individual entry,
//! bulk days for one employee, bulk employees for one date) and the monthly
//! read-reduce that turns those records into normal hours, overtime hours,
//! and a leave-day count. Leave days are canonicalized to 8 normal hours and
//! 0 overtime hours on every write path, regardless of caller-supplied
//! values; the aggregator re-applies the same rule defensively at read time
//! so stale rows can never skew a payroll figure. Writes that flip a day
//! into or out of leave keep the employee's usage counter in step within
//! one database transaction.

use crate::{
    core::{ItemOutcome, ItemStatus, employee::require_employee, leave},
    entities::{AttendanceDay, attendance_day},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::warn;

/// Canonical normal hours credited for a leave day.
pub const LEAVE_DAY_HOURS: f64 = 8.0;

/// Caller-supplied values for one attendance day.
#[derive(Debug, Clone)]
pub struct DayInput {
    /// Calendar day being recorded
    pub date: NaiveDate,
    /// Normal hours worked; ignored (forced to 8.0) when `is_leave` is set
    pub normal_hours: f64,
    /// Overtime hours worked; ignored (forced to 0.0) when `is_leave` is set
    pub overtime_hours: f64,
    /// Whether the day is a leave day
    pub is_leave: bool,
    /// Optional leave-type label; only stored on leave days
    pub leave_type: Option<String>,
}

/// One employee's hours for a shared date, used by the bulk-per-date surface.
#[derive(Debug, Clone)]
pub struct EmployeeHours {
    /// Employee the row targets
    pub employee_id: i64,
    /// Normal hours worked
    pub normal_hours: f64,
    /// Overtime hours worked
    pub overtime_hours: f64,
    /// Whether the day is a leave day
    pub is_leave: bool,
    /// Optional leave-type label
    pub leave_type: Option<String>,
}

/// Per-date outcome entry returned by [`bulk_upsert_days`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOutcome {
    /// Date the item targeted
    pub date: NaiveDate,
    /// What happened to this item
    pub status: ItemStatus,
}

/// Reduction of one employee's attendance records for a calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAttendance {
    /// Sum of normal hours over non-leave days
    pub normal_hours: f64,
    /// Sum of overtime hours over non-leave days
    pub overtime_hours: f64,
    /// Count of leave days; each is worth [`LEAVE_DAY_HOURS`] paid normal hours
    pub leave_days: u32,
}

fn validate_hours(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// First day of the month and first day of the following month, for
/// half-open date-range filters. Fails with `Validation` on a month
/// outside 1-12.
pub(crate) fn month_bounds(month: i32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = u32::try_from(month)
        .ok()
        .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
        .ok_or_else(|| Error::Validation {
            message: format!("Invalid month {month}/{year}"),
        })?;

    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        u32::try_from(month + 1)
            .ok()
            .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
    }
    .ok_or_else(|| Error::Validation {
        message: format!("Invalid month {month}/{year}"),
    })?;

    Ok((start, end))
}

/// Finds the single attendance row for (employee, date), if any.
pub(crate) async fn find_day<C>(
    db: &C,
    employee_id: i64,
    date: NaiveDate,
) -> Result<Option<attendance_day::Model>>
where
    C: ConnectionTrait,
{
    AttendanceDay::find()
        .filter(attendance_day::Column::EmployeeId.eq(employee_id))
        .filter(attendance_day::Column::Date.eq(date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Writes one attendance day, updating the existing row for (employee, date)
/// or inserting a new one. Canonicalizes leave days to 8.0/0.0 and strips
/// the leave-type label from worked days.
pub(crate) async fn write_day<C>(
    db: &C,
    employee_id: i64,
    existing: Option<attendance_day::Model>,
    input: &DayInput,
) -> Result<attendance_day::Model>
where
    C: ConnectionTrait,
{
    let (normal_hours, overtime_hours) = if input.is_leave {
        (LEAVE_DAY_HOURS, 0.0)
    } else {
        (input.normal_hours, input.overtime_hours)
    };
    let leave_type = if input.is_leave {
        input.leave_type.clone()
    } else {
        None
    };

    match existing {
        Some(model) => {
            let mut active: attendance_day::ActiveModel = model.into();
            active.normal_hours = Set(normal_hours);
            active.overtime_hours = Set(overtime_hours);
            active.is_leave = Set(input.is_leave);
            active.leave_type = Set(leave_type);
            active.update(db).await.map_err(Into::into)
        }
        None => {
            let day = attendance_day::ActiveModel {
                employee_id: Set(employee_id),
                date: Set(input.date),
                normal_hours: Set(normal_hours),
                overtime_hours: Set(overtime_hours),
                is_leave: Set(input.is_leave),
                leave_type: Set(leave_type),
                ..Default::default()
            };
            day.insert(db).await.map_err(Into::into)
        }
    }
}

/// Creates or updates the attendance record for one (employee, date).
///
/// Validates the hour values, canonicalizes leave days, and keeps the
/// employee's leave-usage counter in step when the day transitions into or
/// out of leave. The row write and the counter adjustment share one
/// database transaction.
pub async fn upsert_day(
    db: &DatabaseConnection,
    employee_id: i64,
    input: DayInput,
) -> Result<attendance_day::Model> {
    validate_hours(input.normal_hours)?;
    validate_hours(input.overtime_hours)?;

    let txn = db.begin().await?;

    let employee = require_employee(&txn, employee_id).await?;
    let existing = find_day(&txn, employee_id, input.date).await?;
    let was_leave = existing.as_ref().is_some_and(|d| d.is_leave);

    if !was_leave && input.is_leave {
        leave::adjust_usage(&txn, &employee, 1).await?;
    } else if was_leave && !input.is_leave {
        leave::adjust_usage(&txn, &employee, -1).await?;
    }

    let model = write_day(&txn, employee_id, existing, &input).await?;

    txn.commit().await?;
    Ok(model)
}

/// Deletes the attendance record for one (employee, date), decrementing the
/// leave-usage counter (floored at zero) when the deleted day was leave.
pub async fn delete_day(db: &DatabaseConnection, employee_id: i64, date: NaiveDate) -> Result<()> {
    let txn = db.begin().await?;

    let employee = require_employee(&txn, employee_id).await?;
    let day = find_day(&txn, employee_id, date)
        .await?
        .ok_or(Error::EntryNotFound {
            entity: "attendance day",
            key: format!("employee {employee_id} on {date}"),
        })?;

    if day.is_leave {
        leave::adjust_usage(&txn, &employee, -1).await?;
    }

    day.delete(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// Bulk-day entry: records several days for one employee, best effort.
/// Each day is an independent write; a failure is reported in that day's
/// outcome and does not stop the rest.
pub async fn bulk_upsert_days(
    db: &DatabaseConnection,
    employee_id: i64,
    days: Vec<DayInput>,
) -> Vec<DayOutcome> {
    let mut outcomes = Vec::with_capacity(days.len());

    for input in days {
        let date = input.date;
        let status = match upsert_day(db, employee_id, input).await {
            Ok(_) => ItemStatus::Applied,
            Err(e) => ItemStatus::Failed(e.to_string()),
        };
        outcomes.push(DayOutcome { date, status });
    }

    outcomes
}

/// Bulk-employee entry: records one date for several employees, best effort.
pub async fn bulk_record_date(
    db: &DatabaseConnection,
    date: NaiveDate,
    rows: Vec<EmployeeHours>,
) -> Vec<ItemOutcome> {
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        let input = DayInput {
            date,
            normal_hours: row.normal_hours,
            overtime_hours: row.overtime_hours,
            is_leave: row.is_leave,
            leave_type: row.leave_type,
        };
        let status = match upsert_day(db, row.employee_id, input).await {
            Ok(_) => ItemStatus::Applied,
            Err(e) => ItemStatus::Failed(e.to_string()),
        };
        outcomes.push(ItemOutcome {
            employee_id: row.employee_id,
            status,
        });
    }

    outcomes
}

/// Lists an employee's attendance records for one calendar month,
/// ordered by date.
pub async fn list_month(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
) -> Result<Vec<attendance_day::Model>> {
    let (start, end) = month_bounds(month, year)?;

    AttendanceDay::find()
        .filter(attendance_day::Column::EmployeeId.eq(employee_id))
        .filter(attendance_day::Column::Date.gte(start))
        .filter(attendance_day::Column::Date.lt(end))
        .order_by_asc(attendance_day::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Reduces an employee's attendance records for one month into normal hours,
/// overtime hours, and a leave-day count. Pure read-reduce: no writes.
///
/// A leave row always contributes exactly one leave day and zero hours to
/// the sums, whatever hours it has stored; a row whose stored values drifted
/// from the canonical 8.0/0.0 is normalized here and logged, never failed.
pub async fn aggregate_month(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
) -> Result<MonthlyAttendance> {
    let days = list_month(db, employee_id, month, year).await?;

    let mut aggregate = MonthlyAttendance {
        normal_hours: 0.0,
        overtime_hours: 0.0,
        leave_days: 0,
    };

    for day in days {
        if day.is_leave {
            if day.normal_hours != LEAVE_DAY_HOURS || day.overtime_hours != 0.0 {
                warn!(
                    employee_id,
                    date = %day.date,
                    normal_hours = day.normal_hours,
                    overtime_hours = day.overtime_hours,
                    "Leave day with non-canonical stored hours; counting as 8.0/0.0"
                );
            }
            aggregate.leave_days += 1;
        } else {
            aggregate.normal_hours += day.normal_hours;
            aggregate.overtime_hours += day.overtime_hours;
        }
    }

    Ok(aggregate)
}
