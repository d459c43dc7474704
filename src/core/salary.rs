//! Compensation calculator - Turns a monthly attendance aggregate into pay.
//!
//! Pure arithmetic, no I/O and no rounding: balances derived downstream must
//! reproduce exactly against the salary figure, so rounding belongs to the
//! presentation layer, never here. Calling this twice with identical inputs
//! yields bit-identical output.

use crate::{
    core::attendance::{LEAVE_DAY_HOURS, MonthlyAttendance},
    entities::{CompensationModel, employee},
    errors::{Error, Result},
};

/// Computes the total earned salary for one month.
///
/// Hourly employees are paid for worked normal hours plus 8 hours per leave
/// day, with overtime on top. Monthly employees receive their fixed salary
/// (leave days add nothing - the fixed amount already covers them) plus the
/// same overtime treatment.
///
/// # Errors
/// `Validation` when the employee is on the monthly model but carries no
/// fixed monthly salary - a data-integrity precondition this function
/// asserts rather than silently defaulting.
pub fn compute_salary(employee: &employee::Model, attendance: &MonthlyAttendance) -> Result<f64> {
    let overtime_pay = attendance.overtime_hours * employee.overtime_rate;

    match employee.compensation_model {
        CompensationModel::Hourly => {
            let paid_hours =
                attendance.normal_hours + f64::from(attendance.leave_days) * LEAVE_DAY_HOURS;
            Ok(paid_hours * employee.hourly_rate + overtime_pay)
        }
        CompensationModel::Monthly => {
            let fixed = employee
                .fixed_monthly_salary
                .ok_or_else(|| Error::Validation {
                    message: format!(
                        "Employee {} is monthly but has no fixed monthly salary",
                        employee.id
                    ),
                })?;
            Ok(fixed + overtime_pay)
        }
    }
}
