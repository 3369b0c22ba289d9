//! Custom request extractors.

mod entity_id;
mod validated_json;

pub use entity_id::EntityId;
pub use validated_json::ValidatedJson;
