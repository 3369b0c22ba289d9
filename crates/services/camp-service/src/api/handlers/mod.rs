//! HTTP request handlers.

pub mod activity_handler;
pub mod camper_handler;
pub mod signup_handler;

pub use activity_handler::activity_routes;
pub use camper_handler::camper_routes;
pub use signup_handler::signup_routes;
