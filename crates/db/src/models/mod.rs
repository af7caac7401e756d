//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Request DTOs expose `normalize()`, which validates and returns a trimmed
//! copy ready for the repository.

pub mod admin_user;
pub mod contact_message;
pub mod content;
pub mod project;
pub mod service;
pub mod settings;
pub mod status;
pub mod team_member;
