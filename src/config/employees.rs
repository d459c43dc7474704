//! Employee roster loading from config.toml
//!
//! This module provides functionality to load an initial employee roster
//! from a TOML configuration file. The employees defined in config.toml are
//! used to seed the database on first run; names that already exist in the
//! store are skipped so re-running the seed is harmless.

use crate::{
    core::employee::{NewEmployee, create_employee, get_employee_by_name},
    entities::CompensationModel,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of employees to seed
    pub employees: Vec<EmployeeConfig>,
}

/// Configuration for a single employee
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeConfig {
    /// Display name of the employee
    pub name: String,
    /// Compensation model: `"hourly"` or `"monthly"`
    pub compensation_model: CompensationModel,
    /// Pay per normal hour
    pub hourly_rate: f64,
    /// Pay per overtime hour
    pub overtime_rate: f64,
    /// Fixed monthly salary; required for the `monthly` model
    pub fixed_monthly_salary: Option<f64>,
    /// Annual leave-day quota
    pub annual_leave_days: i32,
}

/// Loads the employee roster from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the employee roster from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds the database with the configured roster, skipping names that
/// already exist. Returns the number of employees created.
pub async fn seed_initial_employees(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut created = 0;

    for entry in &config.employees {
        if get_employee_by_name(db, &entry.name).await?.is_some() {
            continue;
        }

        create_employee(
            db,
            NewEmployee {
                name: entry.name.clone(),
                compensation_model: entry.compensation_model,
                hourly_rate: entry.hourly_rate,
                overtime_rate: entry.overtime_rate,
                fixed_monthly_salary: entry.fixed_monthly_salary,
                total_annual_leave_days: entry.annual_leave_days,
                phone: None,
                email: None,
            },
        )
        .await?;
        info!(name = %entry.name, "Seeded employee from config");
        created += 1;
    }

    Ok(created)
}
