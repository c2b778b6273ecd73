//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where an endpoint needs related data (uploader username, project
//!   title, ...), an explicit flat read-model struct assembled by a join
//!   query -- never a lazy object graph

pub mod collaborator;
pub mod hit_list;
pub mod invitation;
pub mod project;
pub mod session;
pub mod track;
pub mod track_version;
pub mod user;
