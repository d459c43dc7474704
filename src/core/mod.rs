//! Core business logic - framework-agnostic payroll engine operations.
//!
//! Each module covers one concern: attendance recording and aggregation,
//! the leave ledger, the compensation calculator, bank-salary and payment
//! aggregation, change history, and the derived payroll snapshot. All
//! functions take a database connection and perform a single
//! read/compute/write pass; there is no engine-side locking, caching, or
//! retrying.

pub mod attendance;
pub mod employee;
pub mod funding;
pub mod history;
pub mod leave;
pub mod payroll;
pub mod salary;

/// Outcome of one item within a bulk operation.
///
/// Bulk operations are best-effort sequences of independent per-employee
/// writes: one item failing never rolls back the others, so callers get a
/// per-item report instead of an all-or-nothing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// The write was applied
    Applied,
    /// The item was already in the requested state; nothing was written
    Skipped,
    /// The write failed; the item was left unchanged
    Failed(String),
}

/// Per-employee outcome entry returned by bulk operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Employee the item targeted
    pub employee_id: i64,
    /// What happened to this item
    pub status: ItemStatus,
}
