use serde::{Deserialize, Serialize};

use super::entity;
use crate::utils::{non_blank, Validate};

/// Editorial as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editorial {
    pub id: String,
    pub name: String,
    /// URL of the editorial's logo
    pub logo: Option<String>,
}

impl From<entity::Model> for Editorial {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo: model.logo,
        }
    }
}

/// Request body for creating an editorial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorialPayload {
    pub name: String,
    /// Older clients send `logo_url`
    #[serde(default, alias = "logo_url")]
    pub logo: Option<String>,
}

impl Validate for EditorialPayload {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorialFilter {
    pub name: Option<String>,
}

impl EditorialFilter {
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
        }
    }
}
