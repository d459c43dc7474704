//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance_day;
pub mod bank_salary;
pub mod change_history;
pub mod employee;
pub mod leave_usage;
pub mod payment;

// Re-export specific types to avoid conflicts
pub use attendance_day::{
    Column as AttendanceDayColumn, Entity as AttendanceDay, Model as AttendanceDayModel,
};
pub use bank_salary::{Column as BankSalaryColumn, Entity as BankSalary, Model as BankSalaryModel};
pub use change_history::{
    Column as ChangeHistoryColumn, Entity as ChangeHistory, Model as ChangeHistoryModel,
};
pub use employee::{
    Column as EmployeeColumn, CompensationModel, Entity as Employee, Model as EmployeeModel,
};
pub use leave_usage::{Column as LeaveUsageColumn, Entity as LeaveUsage, Model as LeaveUsageModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
