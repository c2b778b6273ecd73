//! HTTP handlers, one module per resource.

pub mod auth;
pub mod collaborator;
pub mod hit_list;
pub mod invitation;
pub mod project;
pub mod track;
pub mod track_version;
