//! Database configuration module for `Paybook`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements
//! from the entity models, ensuring that the database schema matches the Rust struct
//! definitions without requiring manual SQL.

use crate::entities::{AttendanceDay, BankSalary, ChangeHistory, Employee, LeaveUsage, Payment};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/paybook.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment
/// variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database
/// access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity
/// definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. It creates tables for employees, attendance days, leave usage,
/// bank salaries, payments, and change history.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let employee_table = schema.create_table_from_entity(Employee);
    let attendance_table = schema.create_table_from_entity(AttendanceDay);
    let leave_usage_table = schema.create_table_from_entity(LeaveUsage);
    let bank_salary_table = schema.create_table_from_entity(BankSalary);
    let payment_table = schema.create_table_from_entity(Payment);
    let change_history_table = schema.create_table_from_entity(ChangeHistory);

    db.execute(builder.build(&employee_table)).await?;
    db.execute(builder.build(&attendance_table)).await?;
    db.execute(builder.build(&leave_usage_table)).await?;
    db.execute(builder.build(&bank_salary_table)).await?;
    db.execute(builder.build(&payment_table)).await?;
    db.execute(builder.build(&change_history_table)).await?;

    Ok(())
}
