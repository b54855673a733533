//! Entity structs for all RoleJuggler domain objects.
//!
//! Tasks, jobs, and notes mirror the task backend's records. Tracked-session
//! types are owned by the session tracker and never persisted as-is.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod insight;
mod job;
mod note;
mod session;
mod task;

pub use insight::{Degraded, InsightPayload, InsightSnapshot};
pub use job::Job;
pub use note::StickyNote;
pub use session::{ActiveSession, LastCompleted, PausedSession, TrackerSnapshot};
pub use task::{Task, WorkSession};
