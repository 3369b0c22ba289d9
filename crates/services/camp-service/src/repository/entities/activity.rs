//! Activity database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Activity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub difficulty: i32,
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

impl From<Model> for Activity {
    fn from(model: Model) -> Self {
        Activity::from_parts(model.id, model.name, model.difficulty)
    }
}
