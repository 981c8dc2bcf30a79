//! Data access for editorials

use anyhow::Context;
use bookshelf_http::AppError;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use super::entity;
use super::models::{Editorial, EditorialFilter, EditorialPayload};
use crate::utils::{contains_folded, fold_case, new_id, BULK_INSERT_ROWS};

#[derive(Clone)]
pub struct EditorialRepository {
    db: DatabaseConnection,
}

impl EditorialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List editorials, optionally those whose name contains `filter.name`.
    /// An empty result is an error.
    pub async fn list(&self, filter: EditorialFilter) -> Result<Vec<Editorial>, AppError> {
        let filter = filter.normalized();
        let mut query = entity::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(contains_folded(entity::Column::NameFolded, name));
        }

        let editorials = query
            .order_by_asc(entity::Column::Name)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .context("failed to list editorials")?;

        if editorials.is_empty() {
            return Err(AppError::not_found("Editorials not found"));
        }

        Ok(editorials.into_iter().map(Editorial::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Editorial, AppError> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("failed to load editorial")?
            .map(Editorial::from)
            .ok_or_else(|| AppError::not_found("Editorial not found"))
    }

    pub async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let count = entity::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("failed to check editorial existence")?;

        Ok(count > 0)
    }

    /// Create one editorial unless an existing name already contains the
    /// candidate name, ignoring case.
    ///
    /// The check and the insert are separate round-trips; concurrent
    /// requests for the same name can both succeed.
    pub async fn create(&self, payload: EditorialPayload) -> Result<Editorial, AppError> {
        let existing = entity::Entity::find()
            .filter(contains_folded(entity::Column::NameFolded, &payload.name))
            .one(&self.db)
            .await
            .context("failed to look up editorial by name")?;

        if let Some(existing) = existing {
            tracing::warn!(
                name = %payload.name,
                existing_id = %existing.id,
                "rejected duplicate editorial"
            );
            return Err(AppError::duplicate("The editorial already exists"));
        }

        let model = active_model(new_id(), payload)
            .insert(&self.db)
            .await
            .context("failed to insert editorial")?;

        tracing::info!(id = %model.id, "editorial created");
        Ok(model.into())
    }

    /// Insert all editorials atomically, without duplicate checks.
    pub async fn bulk_create(
        &self,
        payloads: Vec<EditorialPayload>,
    ) -> Result<Vec<Editorial>, AppError> {
        if payloads.is_empty() {
            return Ok(Vec::new());
        }

        let active_models: Vec<entity::ActiveModel> = payloads
            .into_iter()
            .map(|payload| active_model(new_id(), payload))
            .collect();

        // Chunked to stay under the store's bound-parameter limit.
        let txn = self
            .db
            .begin()
            .await
            .context("failed to begin editorial bulk insert")?;
        for chunk in active_models.chunks(BULK_INSERT_ROWS) {
            entity::Entity::insert_many(chunk.iter().cloned())
                .exec_without_returning(&txn)
                .await
                .context("failed to bulk insert editorials")?;
        }
        txn.commit()
            .await
            .context("failed to commit editorial bulk insert")?;

        tracing::info!(count = active_models.len(), "editorials bulk created");
        active_models
            .into_iter()
            .map(|model| {
                entity::Model::try_from(model)
                    .map(Editorial::from)
                    .context("bulk inserted editorial is incomplete")
                    .map_err(AppError::from)
            })
            .collect()
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("failed to delete editorial")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Editorial not found"));
        }

        tracing::info!(id = %id, "editorial deleted");
        Ok(())
    }
}

fn active_model(id: String, payload: EditorialPayload) -> entity::ActiveModel {
    entity::ActiveModel {
        id: Set(id),
        name_folded: Set(fold_case(&payload.name)),
        name: Set(payload.name),
        logo: Set(payload.logo),
    }
}
