//! Domain logic for the site CMS backend.
//!
//! Everything in this crate is pure: no database, no network, no filesystem.
//! Repositories and handlers call into these modules to enforce the rules
//! that must hold regardless of transport.

pub mod analytics;
pub mod contact;
pub mod error;
pub mod images;
pub mod pagination;
pub mod project_images;
pub mod types;
pub mod validation;
