//! Serialization entry points used by the API.
//!
//! Each view fixes the exclusion rules for its root so that no entity is
//! reachable twice from it.

use serde_json::Value;

use crate::activity::Activity;
use crate::camper::Camper;
use crate::constants::{DETAIL_VIEW_RULES, SUMMARY_VIEW_RULES};
use crate::error::DomainResult;
use crate::graph::{CampGraph, WithRelations};
use crate::serializer::{to_dict, to_dict_all, Node, Rules};
use crate::signup::Signup;

/// Camper without its signups (list and write responses).
pub fn camper_summary(camper: &Camper) -> DomainResult<Value> {
    summary(camper.into())
}

/// All campers, each without signups.
pub fn camper_list(campers: &[Camper]) -> DomainResult<Value> {
    summary_list(campers.iter().map(Node::from))
}

/// Camper with its signups; each signup shows its activity but not the camper.
pub fn camper_detail(camper: &WithRelations<Camper>) -> DomainResult<Value> {
    detail((&camper.entity).into(), &camper.graph)
}

/// Activity without its signups.
pub fn activity_summary(activity: &Activity) -> DomainResult<Value> {
    summary(activity.into())
}

/// All activities, each without signups.
pub fn activity_list(activities: &[Activity]) -> DomainResult<Value> {
    summary_list(activities.iter().map(Node::from))
}

/// Activity with its signups; each signup shows its camper but not the activity.
pub fn activity_detail(activity: &WithRelations<Activity>) -> DomainResult<Value> {
    detail((&activity.entity).into(), &activity.graph)
}

/// Signup with its camper and activity, neither carrying signups.
pub fn signup_detail(signup: &WithRelations<Signup>) -> DomainResult<Value> {
    detail((&signup.entity).into(), &signup.graph)
}

fn summary(root: Node<'_>) -> DomainResult<Value> {
    let graph = CampGraph::new();
    to_dict(root, &graph, &Rules::parse(SUMMARY_VIEW_RULES)?)
}

fn summary_list<'a>(roots: impl IntoIterator<Item = Node<'a>>) -> DomainResult<Value> {
    let graph = CampGraph::new();
    to_dict_all(roots, &graph, &Rules::parse(SUMMARY_VIEW_RULES)?)
}

fn detail<'g>(root: Node<'g>, graph: &'g CampGraph) -> DomainResult<Value> {
    to_dict(root, graph, &Rules::parse(DETAIL_VIEW_RULES)?)
}
