//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Operations that must
//! uphold a cross-row invariant (exactly one current version, one
//! collaborator row per pair) run inside a single transaction.

pub mod collaborator_repo;
pub mod hit_list_repo;
pub mod invitation_repo;
pub mod project_repo;
pub mod session_repo;
pub mod track_repo;
pub mod track_version_repo;
pub mod user_repo;

pub use collaborator_repo::CollaboratorRepo;
pub use hit_list_repo::HitListRepo;
pub use invitation_repo::InvitationRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use track_repo::TrackRepo;
pub use track_version_repo::TrackVersionRepo;
pub use user_repo::UserRepo;
