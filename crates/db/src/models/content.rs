//! Singleton site content: hero, about, and contact info.
//!
//! Each table holds at most one row (`id = 1`). Reads of a table that has
//! never been written return the column defaults.

use serde::{Deserialize, Serialize};
use sitecms_core::error::CoreError;
use sitecms_core::images::validate_reference;
use sitecms_core::types::Timestamp;
use sitecms_core::validation::{optional_text, require_text, validate_email, validate_link};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_target: Option<String>,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertHeroContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_target: Option<String>,
}

impl UpsertHeroContent {
    pub fn normalize(&self) -> Result<UpsertHeroContent, CoreError> {
        let background_image_url = optional_text(self.background_image_url.as_deref());
        if let Some(url) = &background_image_url {
            validate_reference("background_image_url", url)?;
        }
        Ok(UpsertHeroContent {
            title: require_text("title", &self.title)?,
            subtitle: optional_text(self.subtitle.as_deref()),
            background_image_url,
            cta_label: optional_text(self.cta_label.as_deref()),
            cta_target: optional_text(self.cta_target.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct AboutContent {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub years_experience: Option<i32>,
    pub projects_completed: Option<i32>,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertAboutContent {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub years_experience: Option<i32>,
    pub projects_completed: Option<i32>,
}

impl UpsertAboutContent {
    pub fn normalize(&self) -> Result<UpsertAboutContent, CoreError> {
        let image_url = optional_text(self.image_url.as_deref());
        if let Some(url) = &image_url {
            validate_reference("image_url", url)?;
        }
        for (field, value) in [
            ("years_experience", self.years_experience),
            ("projects_completed", self.projects_completed),
        ] {
            if value.is_some_and(|v| v < 0) {
                return Err(CoreError::Validation(format!(
                    "'{field}' must not be negative"
                )));
            }
        }
        Ok(UpsertAboutContent {
            title: require_text("title", &self.title)?,
            body: require_text("body", &self.body)?,
            image_url,
            years_experience: self.years_experience,
            projects_completed: self.projects_completed,
        })
    }
}

/// A social network link shown in the site footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub working_hours: String,
    pub social_links: Json<Vec<SocialLink>>,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub working_hours: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl UpsertContactInfo {
    pub fn normalize(&self) -> Result<UpsertContactInfo, CoreError> {
        let mut social_links = Vec::with_capacity(self.social_links.len());
        for link in &self.social_links {
            let platform = require_text("social_links.platform", &link.platform)?;
            let url = require_text("social_links.url", &link.url)?;
            validate_link("social_links.url", &url)?;
            social_links.push(SocialLink { platform, url });
        }
        Ok(UpsertContactInfo {
            address: require_text("address", &self.address)?,
            phone: require_text("phone", &self.phone)?,
            email: validate_email("email", &self.email)?,
            working_hours: self.working_hours.trim().to_string(),
            social_links,
        })
    }
}
