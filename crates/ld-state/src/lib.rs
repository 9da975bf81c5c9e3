//! # ld-state — Stateful layer of the lucky-draw game
//!
//! Owns everything the UI reads and mutates:
//! - [`Settings`] — operator configuration with partial-patch updates
//! - [`CardGame`] — the select → reveal → complete card session
//! - [`GameStore`] — the explicit state container funneling all mutation
//! - [`PersistentStore`] — serialize-on-mutate wrapper over a
//!   [`StateStorage`] gateway
//!
//! Single-writer model: the store is `&mut self` throughout and every
//! operation runs to completion before the next event is processed, so
//! quota check-then-decrement is atomic within one runtime.

pub mod card;
pub mod persist;
pub mod settings;
pub mod store;

pub use card::*;
pub use persist::*;
pub use settings::*;
pub use store::*;
