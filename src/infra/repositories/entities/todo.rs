//! Todo database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Todo;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Todo {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            owner_id: model.owner_id,
        }
    }
}
