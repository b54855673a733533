//! # rj-tracker
//!
//! Tracks the one task being worked on right now.
//!
//! [`SessionTracker`] holds at most one active session, a set of paused
//! sessions keyed by task id, and the most recently stopped session. Every
//! transition that ends a span of work (pause, preemption by `start`/`resume`,
//! stop) books that span's wall-clock time into the owning task exactly once.
//!
//! Local bookkeeping is authoritative for timing. The [`TaskStore`] is told
//! about each change afterwards; a failed write is reported in the returned
//! [`Transition`] and never rolls the local state back.
//!
//! [`TaskStore`]: rj_store::TaskStore

mod error;
mod state;
mod tracker;
mod transition;

pub use error::{Lookup, TrackerError};
pub use tracker::SessionTracker;
pub use transition::{PersistenceFailure, Transition};
