//! Bank-salary and payment business logic - The money-in side of payroll.
//!
//! Bank-salary entries declare what should reach an employee by bank
//! transfer in a month; payment records track what was actually disbursed in
//! cash and by bank. Both are one-to-many per (employee, month, year):
//! multiple rows are expected and always summed, never merged or
//! overwritten. The sums are order-independent and idempotent - re-running
//! them after any edit or delete reflects the current record set with no
//! residual state.

use crate::{
    core::{ItemOutcome, ItemStatus, employee::require_employee},
    entities::{BankSalary, Payment, bank_salary, payment},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Monthly cash and bank disbursement sums for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaymentTotals {
    /// Sum of cash amounts
    pub cash: f64,
    /// Sum of bank-transfer amounts
    pub bank: f64,
}

/// One employee's amount for the bulk bank-salary surface.
#[derive(Debug, Clone, Copy)]
pub struct BankSalaryInput {
    /// Employee the entry targets
    pub employee_id: i64,
    /// Bank-designated amount
    pub amount: f64,
}

/// One employee's amounts for the bulk payment surface.
#[derive(Debug, Clone, Copy)]
pub struct PaymentInput {
    /// Employee the payment targets
    pub employee_id: i64,
    /// Cash portion
    pub cash_amount: f64,
    /// Bank-transfer portion
    pub bank_amount: f64,
}

fn validate_positive(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn validate_non_negative(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Records a bank-designated salary amount for one employee and month.
/// Entries are additive: recording twice yields two rows, both summed into
/// the monthly target.
pub async fn create_bank_salary(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
    amount: f64,
) -> Result<bank_salary::Model> {
    crate::core::attendance::month_bounds(month, year)?;
    validate_positive(amount)?;
    require_employee(db, employee_id).await?;

    let entry = bank_salary::ActiveModel {
        employee_id: Set(employee_id),
        month: Set(month),
        year: Set(year),
        amount: Set(amount),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Changes the amount of an existing bank-salary entry.
pub async fn update_bank_salary(
    db: &DatabaseConnection,
    id: i64,
    amount: f64,
) -> Result<bank_salary::Model> {
    validate_positive(amount)?;

    let entry = BankSalary::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::EntryNotFound {
            entity: "bank salary entry",
            key: id.to_string(),
        })?;

    let mut active: bank_salary::ActiveModel = entry.into();
    active.amount = Set(amount);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a bank-salary entry by ID.
pub async fn delete_bank_salary(db: &DatabaseConnection, id: i64) -> Result<()> {
    let entry = BankSalary::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::EntryNotFound {
            entity: "bank salary entry",
            key: id.to_string(),
        })?;

    entry.delete(db).await?;
    Ok(())
}

/// Records bank-salary entries for several employees in one month, best
/// effort with per-item outcomes.
pub async fn bulk_create_bank_salaries(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    rows: Vec<BankSalaryInput>,
) -> Vec<ItemOutcome> {
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        let status = match create_bank_salary(db, row.employee_id, month, year, row.amount).await {
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

/// Lists bank-salary entries for a month, optionally scoped to one employee.
pub async fn list_bank_salaries(
    db: &DatabaseConnection,
    employee_id: Option<i64>,
    month: i32,
    year: i32,
) -> Result<Vec<bank_salary::Model>> {
    let mut query = BankSalary::find()
        .filter(bank_salary::Column::Month.eq(month))
        .filter(bank_salary::Column::Year.eq(year));

    if let Some(id) = employee_id {
        query = query.filter(bank_salary::Column::EmployeeId.eq(id));
    }

    query
        .order_by_asc(bank_salary::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The monthly bank-salary target: the sum over all matching entries.
/// Zero when none exist - absence is not an error.
pub async fn bank_target(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
) -> Result<f64> {
    let entries = list_bank_salaries(db, Some(employee_id), month, year).await?;

    Ok(entries.iter().map(|e| e.amount).sum())
}

/// Records a disbursement, keyed by (employee, month, year, payment date).
///
/// If a record with that exact tuple already exists its amounts are
/// replaced; otherwise a new record is inserted. Distinct payment dates
/// within the same month accumulate as separate records.
pub async fn record_payment(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
    payment_date: NaiveDate,
    cash_amount: f64,
    bank_amount: f64,
) -> Result<payment::Model> {
    crate::core::attendance::month_bounds(month, year)?;
    validate_non_negative(cash_amount)?;
    validate_non_negative(bank_amount)?;
    require_employee(db, employee_id).await?;

    let existing = find_payment(db, employee_id, month, year, payment_date).await?;

    match existing {
        Some(model) => {
            let mut active: payment::ActiveModel = model.into();
            active.cash_amount = Set(cash_amount);
            active.bank_amount = Set(bank_amount);
            active.update(db).await.map_err(Into::into)
        }
        None => {
            let record = payment::ActiveModel {
                employee_id: Set(employee_id),
                month: Set(month),
                year: Set(year),
                payment_date: Set(payment_date),
                cash_amount: Set(cash_amount),
                bank_amount: Set(bank_amount),
                ..Default::default()
            };
            record.insert(db).await.map_err(Into::into)
        }
    }
}

async fn find_payment(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
    payment_date: NaiveDate,
) -> Result<Option<payment::Model>> {
    Payment::find()
        .filter(payment::Column::EmployeeId.eq(employee_id))
        .filter(payment::Column::Month.eq(month))
        .filter(payment::Column::Year.eq(year))
        .filter(payment::Column::PaymentDate.eq(payment_date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes the payment record identified by its tuple key.
pub async fn delete_payment(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
    payment_date: NaiveDate,
) -> Result<()> {
    let record = find_payment(db, employee_id, month, year, payment_date)
        .await?
        .ok_or(Error::EntryNotFound {
            entity: "payment",
            key: format!("employee {employee_id} on {payment_date} ({month}/{year})"),
        })?;

    record.delete(db).await?;
    Ok(())
}

/// Records payments for several employees on one date, best effort with
/// per-item outcomes.
pub async fn bulk_record_payments(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
    payment_date: NaiveDate,
    rows: Vec<PaymentInput>,
) -> Vec<ItemOutcome> {
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        let status = match record_payment(
            db,
            row.employee_id,
            month,
            year,
            payment_date,
            row.cash_amount,
            row.bank_amount,
        )
        .await
        {
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

/// Lists payment records for a month, optionally scoped to one employee,
/// ordered by payment date.
pub async fn list_payments(
    db: &DatabaseConnection,
    employee_id: Option<i64>,
    month: i32,
    year: i32,
) -> Result<Vec<payment::Model>> {
    let mut query = Payment::find()
        .filter(payment::Column::Month.eq(month))
        .filter(payment::Column::Year.eq(year));

    if let Some(id) = employee_id {
        query = query.filter(payment::Column::EmployeeId.eq(id));
    }

    query
        .order_by_asc(payment::Column::PaymentDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Monthly disbursement sums for one employee.
pub async fn payment_totals(
    db: &DatabaseConnection,
    employee_id: i64,
    month: i32,
    year: i32,
) -> Result<PaymentTotals> {
    let records = list_payments(db, Some(employee_id), month, year).await?;

    Ok(records
        .iter()
        .fold(PaymentTotals::default(), |acc, r| PaymentTotals {
            cash: acc.cash + r.cash_amount,
            bank: acc.bank + r.bank_amount,
        }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_bank_salary_validation() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        for bad in [0.0, -100.0, f64::NAN] {
            let result = create_bank_salary(&db, employee.id, 3, 2025, bad).await;
            assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));
        }

        let result = create_bank_salary(&db, employee.id, 13, 2025, 500.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = create_bank_salary(&db, 999, 3, 2025, 500.0).await;
        assert!(matches!(result.unwrap_err(), Error::EmployeeNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_bank_target_sums_multiple_entries() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        // Two entries for March 2025: 500 and 300 - additive, never merged
        create_bank_salary(&db, employee.id, 3, 2025, 500.0).await?;
        create_bank_salary(&db, employee.id, 3, 2025, 300.0).await?;
        // Noise in another month
        create_bank_salary(&db, employee.id, 4, 2025, 999.0).await?;

        assert_eq!(bank_target(&db, employee.id, 3, 2025).await?, 800.0);
        assert_eq!(
            list_bank_salaries(&db, Some(employee.id), 3, 2025)
                .await?
                .len(),
            2
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_bank_target_zero_when_absent() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        assert_eq!(bank_target(&db, employee.id, 3, 2025).await?, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_bank_salary() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        let entry = create_bank_salary(&db, employee.id, 3, 2025, 500.0).await?;

        let updated = update_bank_salary(&db, entry.id, 650.0).await?;
        assert_eq!(updated.amount, 650.0);
        assert_eq!(bank_target(&db, employee.id, 3, 2025).await?, 650.0);

        delete_bank_salary(&db, entry.id).await?;
        assert_eq!(bank_target(&db, employee.id, 3, 2025).await?, 0.0);

        // Targeted operations on a missing id surface NotFound
        let result = delete_bank_salary(&db, entry.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::EntryNotFound {
                entity: "bank salary entry",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_create_bank_salaries_partial() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        let outcomes = bulk_create_bank_salaries(
            &db,
            3,
            2025,
            vec![
                BankSalaryInput {
                    employee_id: employee.id,
                    amount: 500.0,
                },
                BankSalaryInput {
                    employee_id: 999,
                    amount: 500.0,
                },
            ],
        )
        .await;

        assert_eq!(outcomes[0].status, ItemStatus::Applied);
        assert!(matches!(outcomes[1].status, ItemStatus::Failed(_)));
        assert_eq!(bank_target(&db, employee.id, 3, 2025).await?, 500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_upserts_by_tuple() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

        let first = record_payment(&db, employee.id, 3, 2025, date, 100.0, 200.0).await?;
        // Same tuple: amounts replaced, no second row
        let second = record_payment(&db, employee.id, 3, 2025, date, 150.0, 250.0).await?;
        assert_eq!(first.id, second.id);

        let totals = payment_totals(&db, employee.id, 3, 2025).await?;
        assert_eq!(totals.cash, 150.0);
        assert_eq!(totals.bank, 250.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_totals_sum_distinct_dates() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;

        record_payment(
            &db,
            employee.id,
            3,
            2025,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            100.0,
            0.0,
        )
        .await?;
        record_payment(
            &db,
            employee.id,
            3,
            2025,
            NaiveDate::from_ymd_opt(2025, 3, 25).unwrap(),
            50.0,
            300.0,
        )
        .await?;

        let totals = payment_totals(&db, employee.id, 3, 2025).await?;
        assert_eq!(totals.cash, 150.0);
        assert_eq!(totals.bank, 300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_validation_allows_zero() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

        // Zero amounts are legal for payments (unlike bank-salary entries)
        let record = record_payment(&db, employee.id, 3, 2025, date, 0.0, 0.0).await?;
        assert_eq!(record.cash_amount, 0.0);

        let result = record_payment(&db, employee.id, 3, 2025, date, -1.0, 0.0).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_payment_by_tuple() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

        record_payment(&db, employee.id, 3, 2025, date, 100.0, 200.0).await?;
        delete_payment(&db, employee.id, 3, 2025, date).await?;

        let totals = payment_totals(&db, employee.id, 3, 2025).await?;
        assert_eq!(totals, PaymentTotals::default());

        let result = delete_payment(&db, employee.id, 3, 2025, date).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::EntryNotFound {
                entity: "payment",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_record_payments_partial() -> Result<()> {
        let (db, employee) = setup_with_employee().await?;
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

        let outcomes = bulk_record_payments(
            &db,
            3,
            2025,
            date,
            vec![
                PaymentInput {
                    employee_id: employee.id,
                    cash_amount: 100.0,
                    bank_amount: 0.0,
                },
                PaymentInput {
                    employee_id: 999,
                    cash_amount: 100.0,
                    bank_amount: 0.0,
                },
            ],
        )
        .await;

        assert_eq!(outcomes[0].status, ItemStatus::Applied);
        assert!(matches!(outcomes[1].status, ItemStatus::Failed(_)));

        Ok(())
    }
}
