//! Camp service - Handles camper, activity and signup use cases.
//!
//! Field rules live in the domain types; this layer adds the lookups the
//! rules depend on (existing rows, referenced parents) before calling the
//! repository.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{
    Activity, CampGraph, Camper, CamperChanges, NewActivity, NewCamper, NewSignup, Signup,
    WithRelations,
};

use crate::repository::CampRepository;

/// Camp service trait for dependency injection.
#[async_trait]
pub trait CampService: Send + Sync {
    /// List all campers
    async fn list_campers(&self) -> AppResult<Vec<Camper>>;

    /// Get camper by ID with its signups and their activities
    async fn get_camper(&self, id: i32) -> AppResult<WithRelations<Camper>>;

    /// Create a new camper
    async fn create_camper(&self, name: String, age: i64) -> AppResult<Camper>;

    /// Apply a partial update; nothing is written if any field is rejected
    async fn update_camper(&self, id: i32, changes: CamperChanges) -> AppResult<Camper>;

    /// List all activities
    async fn list_activities(&self) -> AppResult<Vec<Activity>>;

    /// Get activity by ID with its signups and their campers
    async fn get_activity(&self, id: i32) -> AppResult<WithRelations<Activity>>;

    /// Create a new activity
    async fn create_activity(&self, name: String, difficulty: i32) -> AppResult<Activity>;

    /// Delete an activity together with its signups
    async fn delete_activity(&self, id: i32) -> AppResult<()>;

    /// Sign a camper up for an activity at the given hour
    async fn create_signup(
        &self,
        camper_id: i64,
        activity_id: i64,
        time: i64,
    ) -> AppResult<WithRelations<Signup>>;
}

/// Concrete implementation of CampService using repository.
pub struct CampManager {
    repo: Arc<dyn CampRepository>,
}

impl CampManager {
    /// Create new camp service instance with repository
    pub fn new(repo: Arc<dyn CampRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CampService for CampManager {
    async fn list_campers(&self) -> AppResult<Vec<Camper>> {
        self.repo.list_campers().await
    }

    async fn get_camper(&self, id: i32) -> AppResult<WithRelations<Camper>> {
        self.repo.load_camper(id).await?.ok_or_not_found()
    }

    async fn create_camper(&self, name: String, age: i64) -> AppResult<Camper> {
        let camper = NewCamper::new(name, age)?;
        self.repo.insert_camper(camper).await
    }

    async fn update_camper(&self, id: i32, changes: CamperChanges) -> AppResult<Camper> {
        let camper = self.repo.find_camper(id).await?.ok_or_not_found()?;

        if changes.is_empty() {
            return Ok(camper);
        }

        let updated = camper.with_changes(changes)?;
        self.repo.save_camper(updated).await
    }

    async fn list_activities(&self) -> AppResult<Vec<Activity>> {
        self.repo.list_activities().await
    }

    async fn get_activity(&self, id: i32) -> AppResult<WithRelations<Activity>> {
        self.repo.load_activity(id).await?.ok_or_not_found()
    }

    async fn create_activity(&self, name: String, difficulty: i32) -> AppResult<Activity> {
        self.repo
            .insert_activity(NewActivity::new(name, difficulty))
            .await
    }

    async fn delete_activity(&self, id: i32) -> AppResult<()> {
        let removed = self.repo.delete_activity(id).await?;
        tracing::info!(activity_id = id, signups_removed = removed, "Activity deleted");
        Ok(())
    }

    async fn create_signup(
        &self,
        camper_id: i64,
        activity_id: i64,
        time: i64,
    ) -> AppResult<WithRelations<Signup>> {
        let new_signup = NewSignup::new(camper_id, activity_id, time)?;

        let camper = self.repo.find_camper(new_signup.camper_id()).await?;
        let activity = self.repo.find_activity(new_signup.activity_id()).await?;
        let (camper, activity) = new_signup.resolve(camper, activity)?;

        let signup = self.repo.insert_signup(new_signup).await?;
        let graph = CampGraph::new().with_camper(camper).with_activity(activity);

        Ok(WithRelations::new(signup, graph))
    }
}
