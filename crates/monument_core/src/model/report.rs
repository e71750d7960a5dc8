//! Condition reports filed against monuments.
//!
//! # Invariants
//! - `is_resolved` only ever moves from `false` to `true`.
//! - `monument_id == monument.id` for every value read from storage.

use crate::model::monument::{Monument, MonumentId};
use serde::Serialize;

pub type ReportId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: ReportId,
    pub monument_id: MonumentId,
    /// Free text supplied by the reporter.
    pub condition: String,
    pub is_resolved: bool,
    pub monument: Monument,
}
