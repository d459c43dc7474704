//! Payroll snapshot business logic - Balance reconciliation per month.
//!
//! Combines the attendance aggregate, the compensation calculator, and the
//! bank/payment sums into one derived monthly picture. The snapshot is
//! recomputed from the authoritative records on every call and never
//! persisted, so it can never drift from its inputs. The two balance
//! formulas are definitional: no rounding, no clamping, and negative
//! balances (overpayment) are a valid, displayable state.

use crate::{
    core::{attendance, employee::require_employee, funding, salary},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Derived monthly payroll picture for one employee. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollSnapshot {
    /// Employee this snapshot describes
    pub employee_id: i64,
    /// Calendar month (1-12)
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Normal hours worked over non-leave days
    pub normal_hours: f64,
    /// Overtime hours worked
    pub overtime_hours: f64,
    /// Leave days taken
    pub leave_days: u32,
    /// Total earned salary for the month, unrounded
    pub total_salary: f64,
    /// Bank-salary target: sum of all bank-salary entries for the month
    pub bank_target: f64,
    /// Cash already disbursed
    pub cash_paid: f64,
    /// Bank transfers already disbursed
    pub bank_paid: f64,
    /// `total_salary - cash_paid - bank_paid`; negative means overpaid
    pub remaining_salary_balance: f64,
    /// `bank_target - bank_paid`; negative means overpaid by bank
    pub remaining_bank_balance: f64,
}

/// Builds the payroll snapshot for one employee and month.
///
/// Reads the attendance, bank-salary, and payment records as they are right
/// now and derives everything else; calling it again after any edit to those
/// records reflects the edit with no residual state.
pub async fn build_snapshot(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
) -> Result<PayrollSnapshot> {
    let employee = require_employee(db, employee_id).await?;

    let aggregate = attendance::aggregate_month(db, employee_id, month, year).await?;
    let total_salary = salary::compute_salary(&employee, &aggregate)?;
    let bank_target = funding::bank_target(db, employee_id, month, year).await?;
    let totals = funding::payment_totals(db, employee_id, month, year).await?;

    Ok(PayrollSnapshot {
        employee_id,
        month,
        year,
        normal_hours: aggregate.normal_hours,
        overtime_hours: aggregate.overtime_hours,
        leave_days: aggregate.leave_days,
        total_salary,
        bank_target,
        cash_paid: totals.cash,
        bank_paid: totals.bank,
        remaining_salary_balance: total_salary - totals.cash - totals.bank,
        remaining_bank_balance: bank_target - totals.bank,
    })
}

/// Formats a snapshot into a human-readable summary string, useful for
/// logging or terminal display. Rounding happens here and only here.
#[must_use]
pub fn format_snapshot_summary(snapshot: &PayrollSnapshot) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Payroll {:02}/{} - employee {}\n",
        snapshot.month, snapshot.year, snapshot.employee_id
    );

    // write! is infallible when writing to String, so unwrap is safe
    writeln!(
        summary,
        "  Hours: {:.2} normal | {:.2} overtime | {} leave days",
        snapshot.normal_hours, snapshot.overtime_hours, snapshot.leave_days
    )
    .unwrap();
    writeln!(
        summary,
        "  Salary: {:.2} earned | {:.2} bank target",
        snapshot.total_salary, snapshot.bank_target
    )
    .unwrap();
    writeln!(
        summary,
        "  Paid: {:.2} cash | {:.2} bank",
        snapshot.cash_paid, snapshot.bank_paid
    )
    .unwrap();
    write!(
        summary,
        "  Outstanding: {:.2} salary | {:.2} bank",
        snapshot.remaining_salary_balance, snapshot.remaining_bank_balance
    )
    .unwrap();

    summary
}
