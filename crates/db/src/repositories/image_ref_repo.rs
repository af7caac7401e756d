//! Cross-table lookups for stored image references.

use sqlx::PgPool;

/// Answers whether a stored image is still in use anywhere on the site.
pub struct ImageRefRepo;

impl ImageRefRepo {
    /// `true` if any project image, service, team member, hero, or about row
    /// points at `url`.
    pub async fn is_referenced(pool: &PgPool, url: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM project_images WHERE url = $1)
                 OR EXISTS (SELECT 1 FROM services WHERE image_url = $1)
                 OR EXISTS (SELECT 1 FROM team_members WHERE photo_url = $1)
                 OR EXISTS (SELECT 1 FROM hero_content WHERE background_image_url = $1)
                 OR EXISTS (SELECT 1 FROM about_content WHERE image_url = $1)",
        )
        .bind(url)
        .fetch_one(pool)
        .await
    }
}
