//! SeaORM entity for the `books` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    /// Not a schema-level foreign key; checked by the repository on single
    /// create and update only
    pub editorial_id: Option<String>,
    /// `name` after `utils::fold_case`; searched instead of `name`
    pub name_folded: String,
    pub description_folded: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::editorials::entity::Entity",
        from = "Column::EditorialId",
        to = "crate::modules::editorials::entity::Column::Id"
    )]
    Editorial,
}

impl Related<crate::modules::editorials::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Editorial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
