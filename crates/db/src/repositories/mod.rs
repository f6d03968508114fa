//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod course_invite_repo;
pub mod course_state_repo;
pub mod lead_repo;
pub mod progress_event_repo;
pub mod sync_record_repo;

pub use course_invite_repo::CourseInviteRepo;
pub use course_state_repo::CourseStateRepo;
pub use lead_repo::LeadRepo;
pub use progress_event_repo::ProgressEventRepo;
pub use sync_record_repo::SyncRecordRepo;
