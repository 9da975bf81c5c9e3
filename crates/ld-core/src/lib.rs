//! # ld-core — Shared types for the lucky-draw engine
//!
//! Value types used across the workspace:
//! - [`PrizeGrade`] — prize tier outcome of a draw
//! - [`DailyQuota`] — remaining prize inventory for the active day mode
//! - [`DayMode`] — weekday vs. weekend operation
//! - [`DrawResult`] — an immutable, uniquely numbered draw record
//! - [`LdError`] / [`LdResult`] — the workspace error type

pub mod error;
pub mod grade;
pub mod quota;
pub mod record;

pub use error::*;
pub use grade::*;
pub use quota::*;
pub use record::*;
