//! Leave ledger business logic - Usage counting and leave-day mutations.
//!
//! Tracks each employee's used leave days against the annual quota stored on
//! the employee row. Toggling a day as leave forces that day's attendance to
//! the canonical 8-hour leave entry and moves the counter by one; the
//! reverse transition and leave-day deletion move it back, floored at zero.
//! The counter can also be corrected directly or bulk-reset at the start of
//! a leave year. Every mutation that touches both an attendance row and the
//! counter does so inside one database transaction.

use crate::{
    core::{
        ItemOutcome, ItemStatus,
        attendance::{self, DayInput},
        employee::require_employee,
        history,
    },
    entities::{Employee, LeaveUsage, employee, leave_usage},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// Summary of an annual leave reset.
#[derive(Debug, Clone)]
pub struct ResetSummary {
    /// Number of employees whose counters were reset
    pub employees_reset: usize,
    /// Quota now in force for all of them
    pub new_quota: i32,
}

/// Finds the usage row for an employee, creating a zeroed one if absent.
pub(crate) async fn get_or_create_usage<C>(db: &C, employee_id: i64) -> Result<leave_usage::Model>
where
    C: ConnectionTrait,
{
    let existing = LeaveUsage::find()
        .filter(leave_usage::Column::EmployeeId.eq(employee_id))
        .one(db)
        .await?;

    if let Some(row) = existing {
        return Ok(row);
    }

    let row = leave_usage::ActiveModel {
        employee_id: Set(employee_id),
        days_used: Set(0),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Moves the usage counter by `delta`, flooring at zero on decrements and
/// failing with `Validation` when an increment would exceed the quota.
pub(crate) async fn adjust_usage<C>(
    db: &C,
    employee: &employee::Model,
    delta: i32,
) -> Result<leave_usage::Model>
where
    C: ConnectionTrait,
{
    let usage = get_or_create_usage(db, employee.id).await?;
    let new_used = (usage.days_used + delta).max(0);

    if delta > 0 && new_used > employee.total_annual_leave_days {
        return Err(Error::Validation {
            message: format!(
                "Leave quota exceeded for employee {}: {} of {} days",
                employee.id, new_used, employee.total_annual_leave_days
            ),
        });
    }

    let mut active: leave_usage::ActiveModel = usage.into();
    active.days_used = Set(new_used);
    active.update(db).await.map_err(Into::into)
}

/// Days of leave used so far by an employee; zero when no counter exists yet.
pub async fn get_usage(db: &DatabaseConnection, employee_id: i64) -> Result<i32> {
    let row = LeaveUsage::find()
        .filter(leave_usage::Column::EmployeeId.eq(employee_id))
        .one(db)
        .await?;

    Ok(row.map_or(0, |r| r.days_used))
}

/// Leave days an employee still has available: `max(0, quota - used)`.
pub async fn remaining_days(db: &DatabaseConnection, employee_id: i64) -> Result<i32> {
    let employee = require_employee(db, employee_id).await?;
    let used = get_usage(db, employee_id).await?;

    Ok((employee.total_annual_leave_days - used).max(0))
}

/// Toggles one day between leave and an empty worked day.
///
/// A day that is absent or not currently leave becomes a canonical leave day
/// (8.0/0.0) and the counter goes up by one; a day that is currently leave
/// reverts to a zero-hour non-leave day and the counter goes down by one,
/// floored at zero. Applying the toggle twice restores the original state.
pub async fn toggle_leave(
    db: &DatabaseConnection,
    employee_id: i64,
    date: NaiveDate,
) -> Result<crate::entities::attendance_day::Model> {
    let txn = db.begin().await?;

    let employee = require_employee(&txn, employee_id).await?;
    let existing = attendance::find_day(&txn, employee_id, date).await?;
    let currently_leave = existing.as_ref().is_some_and(|d| d.is_leave);

    let input = if currently_leave {
        adjust_usage(&txn, &employee, -1).await?;
        DayInput {
            date,
            normal_hours: 0.0,
            overtime_hours: 0.0,
            is_leave: false,
            leave_type: None,
        }
    } else {
        adjust_usage(&txn, &employee, 1).await?;
        DayInput {
            date,
            normal_hours: 0.0,
            overtime_hours: 0.0,
            is_leave: true,
            leave_type: None,
        }
    };

    let model = attendance::write_day(&txn, employee_id, existing, &input).await?;

    txn.commit().await?;
    Ok(model)
}

/// Marks one date as leave for every given employee, best effort.
///
/// An employee already on leave that day is skipped with no increment, so
/// re-running the bulk add changes nothing. An increment that would exceed
/// an employee's quota fails that item and leaves the day unchanged; other
/// employees are unaffected.
pub async fn bulk_add_leave(
    db: &DatabaseConnection,
    date: NaiveDate,
    employee_ids: &[i64],
) -> Vec<ItemOutcome> {
    let mut outcomes = Vec::with_capacity(employee_ids.len());

    for &employee_id in employee_ids {
        let status = match set_leave(db, employee_id, date).await {
            Ok(true) => ItemStatus::Applied,
            Ok(false) => ItemStatus::Skipped,
            Err(e) => ItemStatus::Failed(e.to_string()),
        };
        outcomes.push(ItemOutcome {
            employee_id,
            status,
        });
    }

    outcomes
}

/// Sets one day to leave unless it already is. Returns whether a write
/// happened.
async fn set_leave(db: &DatabaseConnection, employee_id: i64, date: NaiveDate) -> Result<bool> {
    let txn = db.begin().await?;

    let employee = require_employee(&txn, employee_id).await?;
    let existing = attendance::find_day(&txn, employee_id, date).await?;

    if existing.as_ref().is_some_and(|d| d.is_leave) {
        return Ok(false);
    }

    adjust_usage(&txn, &employee, 1).await?;
    attendance::write_day(
        &txn,
        employee_id,
        existing,
        &DayInput {
            date,
            normal_hours: 0.0,
            overtime_hours: 0.0,
            is_leave: true,
            leave_type: None,
        },
    )
    .await?;

    txn.commit().await?;
    Ok(true)
}

/// Directly corrects an employee's used-days counter.
///
/// Fails with `Validation` when the new value is negative or exceeds the
/// employee's annual quota.
pub async fn set_used_days(
    db: &DatabaseConnection,
    employee_id: i64,
    new_used_days: i32,
) -> Result<leave_usage::Model> {
    let employee = require_employee(db, employee_id).await?;

    if new_used_days < 0 || new_used_days > employee.total_annual_leave_days {
        return Err(Error::Validation {
            message: format!(
                "Used days {} outside 0..={} for employee {}",
                new_used_days, employee.total_annual_leave_days, employee.id
            ),
        });
    }

    let usage = get_or_create_usage(db, employee_id).await?;
    let mut active: leave_usage::ActiveModel = usage.into();
    active.days_used = Set(new_used_days);
    active.update(db).await.map_err(Into::into)
}

/// Annual reset: zeroes every active employee's used-days counter and sets
/// one shared annual quota on all of them.
///
/// Destructive and not retryable from the caller's perspective; the
/// surrounding application is expected to confirmation-gate it. Quota
/// changes made here are recorded in change history like any other quota
/// edit. Each employee is reset in its own transaction; a failure part-way
/// leaves earlier employees reset.
pub async fn reset_all(db: &DatabaseConnection, new_annual_quota: i32) -> Result<ResetSummary> {
    if new_annual_quota < 0 {
        return Err(Error::Validation {
            message: format!("Annual leave quota cannot be negative: {new_annual_quota}"),
        });
    }

    let employees = Employee::find()
        .filter(employee::Column::IsDeleted.eq(false))
        .all(db)
        .await?;

    let today = Utc::now().date_naive();
    let mut reset = 0;

    for emp in employees {
        let txn = db.begin().await?;

        let usage = get_or_create_usage(&txn, emp.id).await?;
        let mut usage_active: leave_usage::ActiveModel = usage.into();
        usage_active.days_used = Set(0);
        usage_active.update(&txn).await?;

        if emp.total_annual_leave_days != new_annual_quota {
            history::append_entry(
                &txn,
                emp.id,
                today,
                history::CHANGE_LEAVE_QUOTA,
                format!(
                    "Annual leave quota changed from {} to {}",
                    emp.total_annual_leave_days, new_annual_quota
                ),
            )
            .await?;

            let mut emp_active: employee::ActiveModel = emp.into();
            emp_active.total_annual_leave_days = Set(new_annual_quota);
            emp_active.update(&txn).await?;
        }

        txn.commit().await?;
        reset += 1;
    }

    info!(employees = reset, new_annual_quota, "Annual leave reset");

    Ok(ResetSummary {
        employees_reset: reset,
        new_quota: new_annual_quota,
    })
}

/// Removes the attendance record for one (employee, date), decrementing the
/// usage counter only when that day was marked leave. Deleting a day that
/// was already reverted to non-leave never moves the counter.
pub async fn delete_leave_day(
    db: &DatabaseConnection,
    employee_id: i64,
    date: NaiveDate,
) -> Result<()> {
    attendance::delete_day(db, employee_id, date).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::attendance::LEAVE_DAY_HOURS;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_toggle_leave_on_and_off() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        // On: canonical leave day, counter at 1
        let day = toggle_leave(&db, employee.id, date).await?;
        assert!(day.is_leave);
        assert_eq!(day.normal_hours, LEAVE_DAY_HOURS);
        assert_eq!(day.overtime_hours, 0.0);
        assert_eq!(get_usage(&db, employee.id).await?, 1);

        // Off: zeroed worked day, counter back at 0
        let day = toggle_leave(&db, employee.id, date).await?;
        assert!(!day.is_leave);
        assert_eq!(day.normal_hours, 0.0);
        assert_eq!(get_usage(&db, employee.id).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_worked_day() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        record_work_day(&db, employee.id, "2025-03-10", 6.0, 2.0).await?;
        let used_before = get_usage(&db, employee.id).await?;

        toggle_leave(&db, employee.id, date).await?;
        toggle_leave(&db, employee.id, date).await?;

        // Counter restored; the day is non-leave again (hours are zeroed by
        // the revert - the toggle's off state is the empty worked day)
        assert_eq!(get_usage(&db, employee.id).await?, used_before);
        let days = attendance::list_month(&db, employee.id, 3, 2025).await?;
        assert_eq!(days.len(), 1);
        assert!(!days[0].is_leave);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_respects_quota() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_custom_employee(&db, "Tight", 1).await?;

        toggle_leave(
            &db,
            employee.id,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        )
        .await?;

        // Quota of 1 is exhausted; a second leave day fails validation
        let result = toggle_leave(
            &db,
            employee.id,
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // The failed toggle wrote nothing
        assert_eq!(get_usage(&db, employee.id).await?, 1);
        let days = attendance::list_month(&db, employee.id, 3, 2025).await?;
        assert_eq!(days.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_add_leave_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        let on_leave = create_test_employee(&db, "Already").await?;
        let fresh = create_test_employee(&db, "Fresh").await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        toggle_leave(&db, on_leave.id, date).await?;

        let outcomes = bulk_add_leave(&db, date, &[on_leave.id, fresh.id, 999]).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, ItemStatus::Skipped);
        assert_eq!(outcomes[1].status, ItemStatus::Applied);
        assert!(matches!(outcomes[2].status, ItemStatus::Failed(_)));

        // No double increment for the skipped employee
        assert_eq!(get_usage(&db, on_leave.id).await?, 1);
        assert_eq!(get_usage(&db, fresh.id).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_add_leave_quota_exceeded_fails_item() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_custom_employee(&db, "Exhausted", 20).await?;
        set_used_days(&db, employee.id, 20).await?;

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let outcomes = bulk_add_leave(&db, date, &[employee.id]).await;

        assert!(matches!(outcomes[0].status, ItemStatus::Failed(_)));
        assert_eq!(get_usage(&db, employee.id).await?, 20);
        // The day was left unchanged
        let days = attendance::list_month(&db, employee.id, 3, 2025).await?;
        assert!(days.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_set_used_days_bounds() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        // Quota is 20
        set_used_days(&db, employee.id, 20).await?;
        assert_eq!(get_usage(&db, employee.id).await?, 20);
        assert_eq!(remaining_days(&db, employee.id).await?, 0);

        let result = set_used_days(&db, employee.id, 21).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = set_used_days(&db, employee.id, -1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_all_zeroes_and_requotas() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_employee(&db, "A").await?;
        let b = create_test_employee(&db, "B").await?;
        set_used_days(&db, a.id, 5).await?;
        set_used_days(&db, b.id, 12).await?;

        let summary = reset_all(&db, 25).await?;
        assert_eq!(summary.employees_reset, 2);
        assert_eq!(summary.new_quota, 25);

        assert_eq!(get_usage(&db, a.id).await?, 0);
        assert_eq!(get_usage(&db, b.id).await?, 0);
        assert_eq!(remaining_days(&db, a.id).await?, 25);

        // The quota change is audited
        let entries = crate::core::history::list_history(&db, a.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change_type, history::CHANGE_LEAVE_QUOTA);

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_all_same_quota_no_history() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        set_used_days(&db, employee.id, 3).await?;

        // Quota already 20: counter resets, no audit entry
        reset_all(&db, 20).await?;
        assert_eq!(get_usage(&db, employee.id).await?, 0);
        let entries = crate::core::history::list_history(&db, employee.id).await?;
        assert!(entries.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_leave_day_floors_at_zero() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        // A worked day, never leave
        record_work_day(&db, employee.id, "2025-03-10", 8.0, 0.0).await?;
        delete_leave_day(&db, employee.id, date).await?;

        assert_eq!(get_usage(&db, employee.id).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_remaining_days_never_negative() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        set_used_days(&db, employee.id, 20).await?;
        // Shrink the quota below the used count via a profile edit
        crate::core::employee::update_profile(
            &db,
            employee.id,
            crate::core::employee::ProfileUpdate {
                total_annual_leave_days: Some(10),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(remaining_days(&db, employee.id).await?, 0);

        Ok(())
    }
}
