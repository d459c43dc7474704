//! Shared test utilities for Paybook.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{attendance, employee},
    entities::{self, CompensationModel},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test employee with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Employee name
///
/// # Defaults
/// * `compensation_model`: hourly
/// * `hourly_rate`: 10.0
/// * `overtime_rate`: 15.0
/// * `total_annual_leave_days`: 20
pub async fn create_test_employee(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        employee::NewEmployee {
            name: name.to_string(),
            compensation_model: CompensationModel::Hourly,
            hourly_rate: 10.0,
            overtime_rate: 15.0,
            fixed_monthly_salary: None,
            total_annual_leave_days: 20,
            phone: None,
            email: None,
        },
    )
    .await
}

/// Creates a monthly-salaried test employee with overtime rate 12.0.
pub async fn create_monthly_employee(
    db: &DatabaseConnection,
    name: &str,
    fixed_monthly_salary: f64,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        employee::NewEmployee {
            name: name.to_string(),
            compensation_model: CompensationModel::Monthly,
            hourly_rate: 0.0,
            overtime_rate: 12.0,
            fixed_monthly_salary: Some(fixed_monthly_salary),
            total_annual_leave_days: 20,
            phone: None,
            email: None,
        },
    )
    .await
}

/// Creates an hourly test employee with a custom annual leave quota.
/// Use this when a test needs to exercise quota boundaries.
pub async fn create_custom_employee(
    db: &DatabaseConnection,
    name: &str,
    total_annual_leave_days: i32,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        employee::NewEmployee {
            name: name.to_string(),
            compensation_model: CompensationModel::Hourly,
            hourly_rate: 10.0,
            overtime_rate: 15.0,
            fixed_monthly_salary: None,
            total_annual_leave_days,
            phone: None,
            email: None,
        },
    )
    .await
}

/// Records a worked (non-leave) attendance day from a `YYYY-MM-DD` date string.
///
/// # Panics
/// Panics on a malformed date string; test fixtures use literals.
pub async fn record_work_day(
    db: &DatabaseConnection,
    employee_id: i64,
    date: &str,
    normal_hours: f64,
    overtime_hours: f64,
) -> Result<entities::attendance_day::Model> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date");

    attendance::upsert_day(
        db,
        employee_id,
        attendance::DayInput {
            date,
            normal_hours,
            overtime_hours,
            is_leave: false,
            leave_type: None,
        },
    )
    .await
}

/// Sets up a fresh database together with one default hourly employee.
/// Covers the most common test preamble in one call.
pub async fn setup_with_employee() -> Result<(DatabaseConnection, entities::employee::Model)> {
    let db = setup_test_db().await?;
    let employee = create_test_employee(&db, "Ayse").await?;
    Ok((db, employee))
}
