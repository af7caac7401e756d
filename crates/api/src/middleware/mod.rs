//! Request extractors shared by admin handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated admin from a JWT Bearer token.

pub mod auth;
