//! In-memory snapshot of related rows.
//!
//! The repository loads the rows reachable from one serialization root into a
//! [`CampGraph`]; relationships are then resolved by matching foreign keys.

use std::collections::BTreeMap;

use crate::activity::Activity;
use crate::camper::Camper;
use crate::signup::Signup;

/// Rows keyed by id, one map per entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampGraph {
    campers: BTreeMap<i32, Camper>,
    activities: BTreeMap<i32, Activity>,
    signups: BTreeMap<i32, Signup>,
}

impl CampGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camper(mut self, camper: Camper) -> Self {
        self.insert_camper(camper);
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.insert_activity(activity);
        self
    }

    pub fn with_signups(mut self, signups: impl IntoIterator<Item = Signup>) -> Self {
        for signup in signups {
            self.insert_signup(signup);
        }
        self
    }

    pub fn insert_camper(&mut self, camper: Camper) {
        self.campers.insert(camper.id(), camper);
    }

    pub fn insert_activity(&mut self, activity: Activity) {
        self.activities.insert(activity.id(), activity);
    }

    pub fn insert_signup(&mut self, signup: Signup) {
        self.signups.insert(signup.id(), signup);
    }

    pub fn camper(&self, id: i32) -> Option<&Camper> {
        self.campers.get(&id)
    }

    pub fn activity(&self, id: i32) -> Option<&Activity> {
        self.activities.get(&id)
    }

    pub fn signup(&self, id: i32) -> Option<&Signup> {
        self.signups.get(&id)
    }

    /// Signups of one camper, ordered by id
    pub fn signups_for_camper(&self, camper_id: i32) -> Vec<&Signup> {
        self.signups
            .values()
            .filter(|s| s.camper_id() == camper_id)
            .collect()
    }

    /// Signups of one activity, ordered by id
    pub fn signups_for_activity(&self, activity_id: i32) -> Vec<&Signup> {
        self.signups
            .values()
            .filter(|s| s.activity_id() == activity_id)
            .collect()
    }
}

/// A root entity together with the rows its relationships resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithRelations<T> {
    pub entity: T,
    pub graph: CampGraph,
}

impl<T> WithRelations<T> {
    pub fn new(entity: T, graph: CampGraph) -> Self {
        Self { entity, graph }
    }
}
