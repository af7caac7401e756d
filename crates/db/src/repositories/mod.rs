//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! a `&PgPool`. Multi-row writes open their own transaction.

pub mod admin_user_repo;
pub mod contact_message_repo;
pub mod content_repo;
pub mod image_ref_repo;
pub mod password_reset_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod service_repo;
pub mod settings_repo;
pub mod team_member_repo;

pub use admin_user_repo::AdminUserRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use content_repo::ContentRepo;
pub use image_ref_repo::ImageRefRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use service_repo::ServiceRepo;
pub use settings_repo::SettingsRepo;
pub use team_member_repo::TeamMemberRepo;
