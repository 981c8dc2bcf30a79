use serde::{Deserialize, Serialize};

use super::entity;
use crate::utils::{non_blank, Validate};

/// Book as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    /// Cover image URL
    pub image: Option<String>,
    pub price: Option<f64>,
    /// Editorial publishing this book
    pub editorial_id: Option<String>,
}

impl From<entity::Model> for Book {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            author: model.author,
            description: model.description,
            genre: model.genre,
            image: model.image,
            price: model.price,
            editorial_id: model.editorial_id,
        }
    }
}

/// Request body for creating or replacing a book.
///
/// Updates replace every field: omitted optional fields are stored as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub editorial_id: Option<String>,
}

impl Validate for BookPayload {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Query parameters accepted by the list endpoint. Supplied filters are
/// combined with OR.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BookFilter {
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            description: non_blank(self.description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
