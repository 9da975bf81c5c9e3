//! Draw records

use serde::{Deserialize, Serialize};

use crate::grade::PrizeGrade;

/// A completed draw, uniquely numbered and timestamped
///
/// Immutable once created, except for the one-shot claim flip performed
/// by the store. Field names on the wire match the persisted blob
/// (`isClaimed`, `drawNumber`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    /// Opaque unique token
    pub id: String,
    /// Final grade after quota reconciliation
    pub grade: PrizeGrade,
    /// Creation instant, epoch milliseconds
    pub timestamp: i64,
    /// Whether the prize has been handed out
    pub is_claimed: bool,
    /// Human-facing number, `#YYYYMMDD-NNN`, per-day sequence from 001
    pub draw_number: String,
}
