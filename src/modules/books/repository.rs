//! Data access for books

use anyhow::Context;
use bookshelf_http::AppError;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use super::entity;
use super::models::{Book, BookFilter, BookPayload};
use crate::modules::editorials::repository::EditorialRepository;
use crate::utils::{contains_folded, fold_case, new_id, BULK_INSERT_ROWS};

#[derive(Clone)]
pub struct BookRepository {
    db: DatabaseConnection,
    editorials: EditorialRepository,
}

impl BookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            editorials: EditorialRepository::new(db.clone()),
            db,
        }
    }

    /// List books whose name contains `filter.name` or whose description
    /// contains `filter.description`, ignoring case. Without filters every
    /// book is returned. An empty result is an error.
    pub async fn list(&self, filter: BookFilter) -> Result<Vec<Book>, AppError> {
        let filter = filter.normalized();
        let mut query = entity::Entity::find();

        if !filter.is_empty() {
            let mut any = Condition::any();
            if let Some(name) = &filter.name {
                any = any.add(contains_folded(entity::Column::NameFolded, name));
            }
            if let Some(description) = &filter.description {
                any = any.add(contains_folded(entity::Column::DescriptionFolded, description));
            }
            query = query.filter(any);
        }

        let books = query
            .order_by_asc(entity::Column::Name)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .context("failed to list books")?;

        if books.is_empty() {
            return Err(AppError::not_found(format!(
                "Books not found for name: {}, description: {}",
                filter.name.as_deref().unwrap_or("none"),
                filter.description.as_deref().unwrap_or("none"),
            )));
        }

        Ok(books.into_iter().map(Book::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Book, AppError> {
        self.find_model(id).await.map(Book::from)
    }

    /// Create one book unless an existing name already contains the
    /// candidate name, ignoring case.
    ///
    /// The check and the insert are separate round-trips; concurrent
    /// requests for the same name can both succeed.
    pub async fn create(&self, payload: BookPayload) -> Result<Book, AppError> {
        let existing = entity::Entity::find()
            .filter(contains_folded(entity::Column::NameFolded, &payload.name))
            .one(&self.db)
            .await
            .context("failed to look up book by name")?;

        if let Some(existing) = existing {
            tracing::warn!(
                name = %payload.name,
                existing_id = %existing.id,
                "rejected duplicate book"
            );
            return Err(AppError::duplicate("The book already exists"));
        }

        self.ensure_editorial(payload.editorial_id.as_deref()).await?;

        let model = active_model(new_id(), payload)
            .insert(&self.db)
            .await
            .context("failed to insert book")?;

        tracing::info!(id = %model.id, "book created");
        Ok(model.into())
    }

    /// Insert all books in one transaction. No duplicate-name or editorial
    /// checks are made on this path.
    pub async fn bulk_create(&self, payloads: Vec<BookPayload>) -> Result<Vec<Book>, AppError> {
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
            .context("failed to begin book bulk insert")?;
        for chunk in active_models.chunks(BULK_INSERT_ROWS) {
            entity::Entity::insert_many(chunk.iter().cloned())
                .exec_without_returning(&txn)
                .await
                .context("failed to bulk insert books")?;
        }
        txn.commit()
            .await
            .context("failed to commit book bulk insert")?;

        tracing::info!(count = active_models.len(), "books bulk created");
        active_models
            .into_iter()
            .map(|model| {
                entity::Model::try_from(model)
                    .map(Book::from)
                    .context("bulk inserted book is incomplete")
                    .map_err(AppError::from)
            })
            .collect()
    }

    /// Replace every field of the book `id` and return that same row.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<Book, AppError> {
        let existing = self.find_model(id).await?;
        self.ensure_editorial(payload.editorial_id.as_deref()).await?;

        // A row deleted since the lookup surfaces as `RecordNotUpdated`.
        let model = active_model(existing.id, payload)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::not_found("Book not found"),
                e => AppError::Internal(anyhow::Error::new(e).context("failed to update book")),
            })?;

        tracing::info!(id = %model.id, "book updated");
        Ok(model.into())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("failed to delete book")?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Book not found"));
        }

        tracing::info!(id = %id, "book deleted");
        Ok(())
    }

    async fn find_model(&self, id: &str) -> Result<entity::Model, AppError> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("failed to load book")?
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    async fn ensure_editorial(&self, editorial_id: Option<&str>) -> Result<(), AppError> {
        if let Some(editorial_id) = editorial_id {
            if !self.editorials.exists(editorial_id).await? {
                return Err(AppError::not_found("Editorial not found"));
            }
        }
        Ok(())
    }
}

fn active_model(id: String, payload: BookPayload) -> entity::ActiveModel {
    entity::ActiveModel {
        id: Set(id),
        name_folded: Set(fold_case(&payload.name)),
        description_folded: Set(payload.description.as_deref().map(fold_case)),
        name: Set(payload.name),
        author: Set(payload.author),
        description: Set(payload.description),
        genre: Set(payload.genre),
        image: Set(payload.image),
        price: Set(payload.price),
        editorial_id: Set(payload.editorial_id),
    }
}
