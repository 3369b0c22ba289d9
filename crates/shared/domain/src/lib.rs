//! Domain layer - Core business entities, validation and serialization.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Campers and activities are linked through signups; the serializer turns
//! that graph into JSON without following the links in circles.

pub mod activity;
pub mod camper;
pub mod constants;
pub mod error;
pub mod graph;
pub mod serializer;
pub mod signup;
pub mod validation;
pub mod views;

pub use activity::{Activity, NewActivity};
pub use camper::{Camper, CamperChanges, NewCamper};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use graph::{CampGraph, WithRelations};
pub use serializer::{to_dict, to_dict_all, to_dict_only, Node, Rules};
pub use signup::{NewSignup, Signup};
