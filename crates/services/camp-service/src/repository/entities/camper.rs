//! Camper database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Camper;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "campers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::signup::Entity")]
    Signup,
}

impl Related<super::signup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Signup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Camper {
    fn from(model: Model) -> Self {
        Camper::from_parts(model.id, model.name, model.age)
    }
}
