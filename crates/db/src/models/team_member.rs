//! Team member entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitecms_core::error::CoreError;
use sitecms_core::images::validate_reference;
use sitecms_core::types::{DbId, Timestamp};
use sitecms_core::validation::{optional_text, require_text_max, validate_link};
use sqlx::FromRow;

const MAX_FIELD_CHARS: usize = 150;

/// A row from the `team_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub position: String,
    pub profile_url: Option<String>,
    pub photo_url: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a team member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub position: String,
    pub profile_url: Option<String>,
    pub photo_url: Option<String>,
    pub sort_order: Option<i32>,
}

impl CreateTeamMember {
    pub fn normalize(&self) -> Result<CreateTeamMember, CoreError> {
        let (profile_url, photo_url) =
            normalize_links(self.profile_url.as_deref(), self.photo_url.as_deref())?;
        Ok(CreateTeamMember {
            name: require_text_max("name", &self.name, MAX_FIELD_CHARS)?,
            position: require_text_max("position", &self.position, MAX_FIELD_CHARS)?,
            profile_url,
            photo_url,
            sort_order: self.sort_order,
        })
    }
}

/// DTO for updating a team member. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub position: Option<String>,
    pub profile_url: Option<String>,
    pub photo_url: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateTeamMember {
    pub fn normalize(&self) -> Result<UpdateTeamMember, CoreError> {
        let (profile_url, photo_url) =
            normalize_links(self.profile_url.as_deref(), self.photo_url.as_deref())?;
        Ok(UpdateTeamMember {
            name: self
                .name
                .as_deref()
                .map(|v| require_text_max("name", v, MAX_FIELD_CHARS))
                .transpose()?,
            position: self
                .position
                .as_deref()
                .map(|v| require_text_max("position", v, MAX_FIELD_CHARS))
                .transpose()?,
            profile_url,
            photo_url,
            sort_order: self.sort_order,
        })
    }
}

fn normalize_links(
    profile_url: Option<&str>,
    photo_url: Option<&str>,
) -> Result<(Option<String>, Option<String>), CoreError> {
    let profile_url = optional_text(profile_url);
    if let Some(url) = &profile_url {
        validate_link("profile_url", url)?;
    }
    let photo_url = optional_text(photo_url);
    if let Some(url) = &photo_url {
        validate_reference("photo_url", url)?;
    }
    Ok((profile_url, photo_url))
}
