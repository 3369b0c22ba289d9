//! Selective-field serialization of the camp entity graph.
//!
//! Camper and Activity each have many Signups, and every Signup points back
//! at both. Following every relationship would never stop, so each call
//! takes a set of [`Rules`] naming relationship paths to leave out. At every
//! node the caller's rules for that branch are merged with the node's own
//! default rules before its relationships are resolved.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::activity::Activity;
use crate::camper::Camper;
use crate::constants::{
    ACTIVITY_SERIALIZE_RULES, CAMPER_SERIALIZE_RULES, SIGNUP_SERIALIZE_RULES,
};
use crate::error::{DomainError, DomainResult};
use crate::graph::CampGraph;
use crate::signup::Signup;

/// Set of excluded relationship paths, e.g. `signups.camper`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    excluded: BTreeSet<String>,
}

impl Rules {
    /// No exclusions beyond each entity's defaults.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse rules written as `-path.to.relation`.
    pub fn parse<I, S>(rules: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded = BTreeSet::new();
        for rule in rules {
            let rule = rule.as_ref();
            let path = rule
                .strip_prefix('-')
                .filter(|p| !p.is_empty() && p.split('.').all(|segment| !segment.is_empty()))
                .ok_or_else(|| DomainError::InvalidRule(rule.to_string()))?;
            excluded.insert(path.to_string());
        }
        Ok(Self { excluded })
    }

    /// Whether the relationship `key` at this level is excluded.
    pub fn excludes(&self, key: &str) -> bool {
        self.excluded.contains(key)
    }

    /// Rules that apply below the relationship `key`.
    pub fn branch(&self, key: &str) -> Self {
        let excluded = self
            .excluded
            .iter()
            .filter_map(|path| path.strip_prefix(key)?.strip_prefix('.'))
            .map(str::to_string)
            .collect();
        Self { excluded }
    }

    /// Union of two rule sets.
    pub fn merged(&self, other: &Rules) -> Self {
        Self {
            excluded: self.excluded.union(&other.excluded).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// A borrowed entity taking part in serialization.
#[derive(Debug, Clone, Copy)]
pub enum Node<'g> {
    Camper(&'g Camper),
    Activity(&'g Activity),
    Signup(&'g Signup),
}

impl<'g> From<&'g Camper> for Node<'g> {
    fn from(camper: &'g Camper) -> Self {
        Node::Camper(camper)
    }
}

impl<'g> From<&'g Activity> for Node<'g> {
    fn from(activity: &'g Activity) -> Self {
        Node::Activity(activity)
    }
}

impl<'g> From<&'g Signup> for Node<'g> {
    fn from(signup: &'g Signup) -> Self {
        Node::Signup(signup)
    }
}

/// Resolved value of one relationship.
enum Related<'g> {
    One(Option<Node<'g>>),
    Many(Vec<Node<'g>>),
}

impl<'g> Node<'g> {
    fn key(&self) -> (&'static str, i32) {
        match self {
            Node::Camper(c) => ("camper", c.id()),
            Node::Activity(a) => ("activity", a.id()),
            Node::Signup(s) => ("signup", s.id()),
        }
    }

    fn default_rules(&self) -> &'static [&'static str] {
        match self {
            Node::Camper(_) => CAMPER_SERIALIZE_RULES,
            Node::Activity(_) => ACTIVITY_SERIALIZE_RULES,
            Node::Signup(_) => SIGNUP_SERIALIZE_RULES,
        }
    }

    fn columns(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            Node::Camper(c) => {
                map.insert("id".into(), c.id().into());
                map.insert("name".into(), c.name().into());
                map.insert("age".into(), c.age().into());
            }
            Node::Activity(a) => {
                map.insert("id".into(), a.id().into());
                map.insert("name".into(), a.name().into());
                map.insert("difficulty".into(), a.difficulty().into());
            }
            Node::Signup(s) => {
                map.insert("id".into(), s.id().into());
                map.insert("time".into(), s.time().into());
                map.insert("camper_id".into(), s.camper_id().into());
                map.insert("activity_id".into(), s.activity_id().into());
            }
        }
        map
    }

    fn relationships(&self) -> &'static [&'static str] {
        match self {
            Node::Camper(_) | Node::Activity(_) => &["signups"],
            Node::Signup(_) => &["camper", "activity"],
        }
    }

    fn resolve(&self, relationship: &str, graph: &'g CampGraph) -> Related<'g> {
        match (self, relationship) {
            (Node::Camper(c), "signups") => Related::Many(
                graph
                    .signups_for_camper(c.id())
                    .into_iter()
                    .map(Node::Signup)
                    .collect(),
            ),
            (Node::Activity(a), "signups") => Related::Many(
                graph
                    .signups_for_activity(a.id())
                    .into_iter()
                    .map(Node::Signup)
                    .collect(),
            ),
            (Node::Signup(s), "camper") => {
                Related::One(graph.camper(s.camper_id()).map(Node::Camper))
            }
            (Node::Signup(s), "activity") => {
                Related::One(graph.activity(s.activity_id()).map(Node::Activity))
            }
            _ => Related::One(None),
        }
    }
}

/// Serialize `root` and whatever of `graph` its relationships reach, minus
/// the paths excluded by `rules`.
///
/// Fails with [`DomainError::Cycle`] when the rules let a traversal come back
/// to an entity that is already on the current path.
pub fn to_dict<'g>(root: Node<'g>, graph: &'g CampGraph, rules: &Rules) -> DomainResult<Value> {
    let mut path = Vec::new();
    serialize_node(root, graph, rules, Defaults::Apply, &mut path)
}

/// Like [`to_dict`], but the entities' default rules are ignored and only
/// `rules` decide what is left out.
pub fn to_dict_only<'g>(
    root: Node<'g>,
    graph: &'g CampGraph,
    rules: &Rules,
) -> DomainResult<Value> {
    let mut path = Vec::new();
    serialize_node(root, graph, rules, Defaults::Ignore, &mut path)
}

/// Serialize each root with the same rules into a JSON array.
pub fn to_dict_all<'a, I>(roots: I, graph: &CampGraph, rules: &Rules) -> DomainResult<Value>
where
    I: IntoIterator<Item = Node<'a>>,
{
    roots
        .into_iter()
        .map(|root| to_dict(root, graph, rules))
        .collect::<DomainResult<Vec<_>>>()
        .map(Value::Array)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Defaults {
    Apply,
    Ignore,
}

fn serialize_node<'g>(
    node: Node<'g>,
    graph: &'g CampGraph,
    rules: &Rules,
    defaults: Defaults,
    path: &mut Vec<(&'static str, i32)>,
) -> DomainResult<Value> {
    let key = node.key();
    if path.contains(&key) {
        let trail: Vec<String> = path
            .iter()
            .chain(std::iter::once(&key))
            .map(|(kind, id)| format!("{}#{}", kind, id))
            .collect();
        return Err(DomainError::Cycle(trail.join(" -> ")));
    }

    let rules = match defaults {
        Defaults::Apply => rules.merged(&Rules::parse(node.default_rules())?),
        Defaults::Ignore => rules.clone(),
    };
    let mut map = node.columns();

    path.push(key);
    for relationship in node.relationships() {
        if rules.excludes(relationship) {
            continue;
        }
        let branch = rules.branch(relationship);
        let value = match node.resolve(relationship, graph) {
            Related::One(Some(child)) => serialize_node(child, graph, &branch, defaults, path)?,
            Related::One(None) => Value::Null,
            Related::Many(children) => Value::Array(
                children
                    .into_iter()
                    .map(|child| serialize_node(child, graph, &branch, defaults, path))
                    .collect::<DomainResult<Vec<_>>>()?,
            ),
        };
        map.insert(relationship.to_string(), value);
    }
    path.pop();

    Ok(Value::Object(map))
}
