//! Helpers shared by the entity modules.

use bookshelf_http::AppError;
use sea_orm::sea_query::{LikeExpr, SimpleExpr};
use sea_orm::ColumnTrait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

const LIKE_ESCAPE: char = '\\';

/// Rows per multi-row INSERT. Books bind ten values per row, and SQLite caps
/// a statement at 999 parameters on older builds.
pub const BULK_INSERT_ROWS: usize = 64;

/// Generate a fresh, time-ordered primary key.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Case-folded form of `value`, as stored in the `*_folded` search columns.
///
/// Folding happens here rather than through SQL `LOWER`, which on SQLite
/// only folds ASCII.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// `column LIKE '%needle%'` against a folded column, with wildcards in
/// `needle` matched literally.
pub fn contains_folded<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    column.like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE))
}

fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in fold_case(needle).chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Treat blank query parameters as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks a deserialized payload beyond what serde enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Body of a create request: one object or an array of objects.
#[derive(Debug)]
pub enum CreatePayload<T> {
    Single(T),
    Bulk(Vec<T>),
}

impl<T: DeserializeOwned + Validate> CreatePayload<T> {
    /// Dispatch on the JSON shape. Anything but an object or array is rejected.
    pub fn from_json(value: Value, entity: &str) -> Result<Self, AppError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    parse_item(item, entity).map_err(|message| {
                        AppError::bad_request_with(
                            vec![json!({ "index": index, "error": message })],
                            format!("Invalid {entity} at index {index}"),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CreatePayload::Bulk),
            Value::Object(_) => parse_object(value, entity).map(CreatePayload::Single),
            _ => Err(AppError::bad_request(
                "Invalid data format. Request data must be an object or an array.",
            )),
        }
    }
}

/// Parse a single JSON object into a validated payload.
pub fn parse_object<T: DeserializeOwned + Validate>(
    value: Value,
    entity: &str,
) -> Result<T, AppError> {
    if !value.is_object() {
        return Err(AppError::bad_request(format!(
            "Invalid data format. Request data must be a {entity} object."
        )));
    }
    parse_item(value, entity).map_err(|message| {
        AppError::bad_request_with(
            vec![json!({ "error": message })],
            format!("Invalid {entity}"),
        )
    })
}

fn parse_item<T: DeserializeOwned + Validate>(value: Value, entity: &str) -> Result<T, String> {
    if !value.is_object() {
        return Err(format!("expected a {entity} object"));
    }
    let item: T = serde_json::from_value(value).map_err(|e| e.to_string())?;
    item.validate()?;
    Ok(item)
}
