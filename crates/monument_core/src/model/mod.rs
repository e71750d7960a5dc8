//! Domain model for monuments, their coordinates and condition reports.
//!
//! # Responsibility
//! - Define the records core business logic reads and writes.
//! - Own the JSON projection shape returned to API callers.
//!
//! # Invariants
//! - A persisted monument always carries all four coordinate records.
//! - A report always carries its owning monument, fully hydrated.

pub mod condition;
pub mod coordinates;
pub mod monument;
pub mod report;
