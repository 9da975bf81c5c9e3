//! # ld-engine — Draw logic for the lucky-draw game
//!
//! Pure, stateless draw machinery. The store in `ld-state` drives these
//! functions; nothing here touches the wall clock or an ambient RNG —
//! time and randomness are always injected by the caller.
//!
//! ## Architecture
//!
//! ```text
//! ProbabilityTable (weekday / weekend)
//!     │  sample(rng)
//!     v
//! PrizeGrade ──reconcile(quota)──> (final grade, updated quota)
//!     │
//!     v
//! create_record(history, now, rng) ──> DrawResult
//! ```

pub mod ledger;
pub mod record;
pub mod table;

pub use ledger::*;
pub use record::*;
pub use table::*;
