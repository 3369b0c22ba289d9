//! Signup database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Signup;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "signups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub time: i32,
    pub camper_id: i32,
    pub activity_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::camper::Entity",
        from = "Column::CamperId",
        to = "super::camper::Column::Id",
        on_delete = "Cascade"
    )]
    Camper,
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id",
        on_delete = "Cascade"
    )]
    Activity,
}

impl Related<super::camper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Camper.def()
    }
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Signup {
    fn from(model: Model) -> Self {
        Signup::from_parts(model.id, model.time, model.camper_id, model.activity_id)
    }
}
