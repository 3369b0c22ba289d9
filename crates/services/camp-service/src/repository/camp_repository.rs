//! Camp repository implementation.
//!
//! Rows come back as domain entities; the `load_*` methods also gather the
//! rows a detail view needs into a [`CampGraph`].

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, NotSet,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait, Unchanged,
};

use super::entities::activity::{self, Entity as ActivityEntity};
use super::entities::camper::{self, Entity as CamperEntity};
use super::entities::signup::{self, Entity as SignupEntity};
use common::{AppError, AppResult};
use domain::{
    Activity, CampGraph, Camper, NewActivity, NewCamper, NewSignup, Signup, WithRelations,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Camp repository trait for dependency injection.
///
/// Storage only: field rules are checked by the domain types before
/// anything reaches this trait.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CampRepository: Send + Sync {
    /// List all campers ordered by id
    async fn list_campers(&self) -> AppResult<Vec<Camper>>;

    /// Find camper by ID
    async fn find_camper(&self, id: i32) -> AppResult<Option<Camper>>;

    /// Find camper by ID together with its signups and their activities
    async fn load_camper(&self, id: i32) -> AppResult<Option<WithRelations<Camper>>>;

    /// Insert a new camper
    async fn insert_camper(&self, camper: NewCamper) -> AppResult<Camper>;

    /// Write back all fields of an existing camper
    async fn save_camper(&self, camper: Camper) -> AppResult<Camper>;

    /// List all activities ordered by id
    async fn list_activities(&self) -> AppResult<Vec<Activity>>;

    /// Find activity by ID
    async fn find_activity(&self, id: i32) -> AppResult<Option<Activity>>;

    /// Find activity by ID together with its signups and their campers
    async fn load_activity(&self, id: i32) -> AppResult<Option<WithRelations<Activity>>>;

    /// Insert a new activity
    async fn insert_activity(&self, activity: NewActivity) -> AppResult<Activity>;

    /// Delete an activity and its signups; returns how many signups went with it
    async fn delete_activity(&self, id: i32) -> AppResult<u64>;

    /// Insert a new signup
    async fn insert_signup(&self, signup: NewSignup) -> AppResult<Signup>;
}

/// Concrete implementation of CampRepository backed by SeaORM
pub struct CampStore {
    db: DatabaseConnection,
}

impl CampStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CampRepository for CampStore {
    async fn list_campers(&self) -> AppResult<Vec<Camper>> {
        let models = CamperEntity::find()
            .order_by_asc(camper::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Camper::from).collect())
    }

    async fn find_camper(&self, id: i32) -> AppResult<Option<Camper>> {
        let result = CamperEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Camper::from))
    }

    async fn load_camper(&self, id: i32) -> AppResult<Option<WithRelations<Camper>>> {
        let Some(model) = CamperEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let rows = model
            .find_related(SignupEntity)
            .order_by_asc(signup::Column::Id)
            .find_also_related(ActivityEntity)
            .all(&self.db)
            .await?;

        let mut graph = CampGraph::new();
        for (signup, activity) in rows {
            graph.insert_signup(signup.into());
            if let Some(activity) = activity {
                graph.insert_activity(activity.into());
            }
        }

        let camper = Camper::from(model);
        graph.insert_camper(camper.clone());
        Ok(Some(WithRelations::new(camper, graph)))
    }

    async fn insert_camper(&self, camper: NewCamper) -> AppResult<Camper> {
        let active_model = camper::ActiveModel {
            id: NotSet,
            name: Set(camper.name().to_string()),
            age: Set(camper.age()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Camper::from(model))
    }

    async fn save_camper(&self, camper: Camper) -> AppResult<Camper> {
        let active = camper::ActiveModel {
            id: Unchanged(camper.id()),
            name: Set(camper.name().to_string()),
            age: Set(camper.age()),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(Camper::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn list_activities(&self) -> AppResult<Vec<Activity>> {
        let models = ActivityEntity::find()
            .order_by_asc(activity::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Activity::from).collect())
    }

    async fn find_activity(&self, id: i32) -> AppResult<Option<Activity>> {
        let result = ActivityEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Activity::from))
    }

    async fn load_activity(&self, id: i32) -> AppResult<Option<WithRelations<Activity>>> {
        let Some(model) = ActivityEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let rows = model
            .find_related(SignupEntity)
            .order_by_asc(signup::Column::Id)
            .find_also_related(CamperEntity)
            .all(&self.db)
            .await?;

        let mut graph = CampGraph::new();
        for (signup, camper) in rows {
            graph.insert_signup(signup.into());
            if let Some(camper) = camper {
                graph.insert_camper(camper.into());
            }
        }

        let activity = Activity::from(model);
        graph.insert_activity(activity.clone());
        Ok(Some(WithRelations::new(activity, graph)))
    }

    async fn insert_activity(&self, activity: NewActivity) -> AppResult<Activity> {
        let active_model = activity::ActiveModel {
            id: NotSet,
            name: Set(activity.name().to_string()),
            difficulty: Set(activity.difficulty()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Activity::from(model))
    }

    async fn delete_activity(&self, id: i32) -> AppResult<u64> {
        // Signups go in the same transaction so none is left pointing at nothing
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let removed = SignupEntity::delete_many()
            .filter(signup::Column::ActivityId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        let result = ActivityEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotFound);
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(removed.rows_affected)
    }

    async fn insert_signup(&self, signup: NewSignup) -> AppResult<Signup> {
        let active_model = signup::ActiveModel {
            id: NotSet,
            time: Set(signup.time()),
            camper_id: Set(signup.camper_id()),
            activity_id: Set(signup.activity_id()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            // A parent was deleted between lookup and insert
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::validation("signup references a missing camper or activity")
            }
            _ => AppError::from(e),
        })?;

        Ok(Signup::from(model))
    }
}
