//! Domain types and pure business rules for the DONUT backend.
//!
//! No I/O lives here: the crate defines the error taxonomy, shared ID and
//! timestamp aliases, the role/status enums stored in Postgres, and the
//! audio upload validation rules consulted by the API layer.

pub mod audio;
pub mod error;
pub mod roles;
pub mod types;
