//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{activity_handler, camper_handler, signup_handler};
use domain::{Activity, Camper, Signup};

/// OpenAPI documentation for the camp service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Camp Service",
        version = "0.1.0",
        description = "Summer camp records: campers, activities and the signups between them"
    ),
    servers(
        (url = "http://localhost:5555", description = "Local development server")
    ),
    paths(
        camper_handler::list_campers,
        camper_handler::create_camper,
        camper_handler::get_camper,
        camper_handler::update_camper,
        activity_handler::list_activities,
        activity_handler::create_activity,
        activity_handler::get_activity,
        activity_handler::delete_activity,
        signup_handler::create_signup,
    ),
    components(
        schemas(
            Camper,
            Activity,
            Signup,
            camper_handler::CreateCamperRequest,
            camper_handler::UpdateCamperRequest,
            activity_handler::CreateActivityRequest,
            signup_handler::CreateSignupRequest,
        )
    ),
    tags(
        (name = "Campers", description = "Camper records"),
        (name = "Activities", description = "Activity records"),
        (name = "Signups", description = "Camper to activity signups")
    )
)]
pub struct ApiDoc;
