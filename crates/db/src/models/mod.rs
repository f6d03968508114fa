//! Entity models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus `Deserialize` DTOs for writes.

pub mod course_invite;
pub mod course_state;
pub mod lead;
pub mod progress_event;
pub mod sync_record;
