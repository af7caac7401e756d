//! Repository for the singleton content tables: `hero_content`,
//! `about_content`, and `contact_info`.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::content::{
    AboutContent, ContactInfo, HeroContent, UpsertAboutContent, UpsertContactInfo,
    UpsertHeroContent,
};

const HERO_COLUMNS: &str = "title, subtitle, background_image_url, cta_label, cta_target, updated_at";
const ABOUT_COLUMNS: &str =
    "title, body, image_url, years_experience, projects_completed, updated_at";
const CONTACT_COLUMNS: &str = "address, phone, email, working_hours, social_links, updated_at";

/// Reads and upserts the site's singleton content rows.
pub struct ContentRepo;

impl ContentRepo {
    /// Current hero content, or empty defaults if never saved.
    pub async fn get_hero(pool: &PgPool) -> Result<HeroContent, sqlx::Error> {
        let query = format!("SELECT {HERO_COLUMNS} FROM hero_content WHERE id = 1");
        Ok(sqlx::query_as::<_, HeroContent>(&query)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default())
    }

    pub async fn upsert_hero(
        pool: &PgPool,
        input: &UpsertHeroContent,
    ) -> Result<HeroContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO hero_content (id, title, subtitle, background_image_url, cta_label, cta_target)
             VALUES (1, $1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                subtitle = EXCLUDED.subtitle,
                background_image_url = EXCLUDED.background_image_url,
                cta_label = EXCLUDED.cta_label,
                cta_target = EXCLUDED.cta_target
             RETURNING {HERO_COLUMNS}"
        );
        sqlx::query_as::<_, HeroContent>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.background_image_url)
            .bind(&input.cta_label)
            .bind(&input.cta_target)
            .fetch_one(pool)
            .await
    }

    /// Current about content, or empty defaults if never saved.
    pub async fn get_about(pool: &PgPool) -> Result<AboutContent, sqlx::Error> {
        let query = format!("SELECT {ABOUT_COLUMNS} FROM about_content WHERE id = 1");
        Ok(sqlx::query_as::<_, AboutContent>(&query)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default())
    }

    pub async fn upsert_about(
        pool: &PgPool,
        input: &UpsertAboutContent,
    ) -> Result<AboutContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO about_content (id, title, body, image_url, years_experience, projects_completed)
             VALUES (1, $1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                body = EXCLUDED.body,
                image_url = EXCLUDED.image_url,
                years_experience = EXCLUDED.years_experience,
                projects_completed = EXCLUDED.projects_completed
             RETURNING {ABOUT_COLUMNS}"
        );
        sqlx::query_as::<_, AboutContent>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.image_url)
            .bind(input.years_experience)
            .bind(input.projects_completed)
            .fetch_one(pool)
            .await
    }

    /// Current contact info, or empty defaults if never saved.
    pub async fn get_contact_info(pool: &PgPool) -> Result<ContactInfo, sqlx::Error> {
        let query = format!("SELECT {CONTACT_COLUMNS} FROM contact_info WHERE id = 1");
        Ok(sqlx::query_as::<_, ContactInfo>(&query)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default())
    }

    pub async fn upsert_contact_info(
        pool: &PgPool,
        input: &UpsertContactInfo,
    ) -> Result<ContactInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_info (id, address, phone, email, working_hours, social_links)
             VALUES (1, $1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                working_hours = EXCLUDED.working_hours,
                social_links = EXCLUDED.social_links
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ContactInfo>(&query)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.working_hours)
            .bind(Json(&input.social_links))
            .fetch_one(pool)
            .await
    }
}
