//! Service entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitecms_core::error::CoreError;
use sitecms_core::images::validate_reference;
use sitecms_core::types::{DbId, Timestamp};
use sitecms_core::validation::{optional_text, require_text_max};
use sqlx::FromRow;

const MAX_NAME_CHARS: usize = 150;

/// A service row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}

impl CreateService {
    pub fn normalize(&self) -> Result<CreateService, CoreError> {
        let image_url = optional_text(self.image_url.as_deref());
        if let Some(url) = &image_url {
            validate_reference("image_url", url)?;
        }
        Ok(CreateService {
            name: require_text_max("name", &self.name, MAX_NAME_CHARS)?,
            description: optional_text(self.description.as_deref()),
            image_url,
            sort_order: self.sort_order,
        })
    }
}

/// DTO for updating an existing service. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateService {
    pub fn normalize(&self) -> Result<UpdateService, CoreError> {
        let name = self
            .name
            .as_deref()
            .map(|n| require_text_max("name", n, MAX_NAME_CHARS))
            .transpose()?;
        let image_url = optional_text(self.image_url.as_deref());
        if let Some(url) = &image_url {
            validate_reference("image_url", url)?;
        }
        Ok(UpdateService {
            name,
            description: optional_text(self.description.as_deref()),
            image_url,
            sort_order: self.sort_order,
        })
    }
}
