use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::api::state::AppState;
use shared::{
    DayAssignment, ErrorResponse, GenerateScheduleRequest, GenerateScheduleResponse, Person, Role, ScheduleConfig,
    ShiftCounts, ShiftType,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shift Scheduling Service API",
        version = "1.0.0",
        description = "Generates a feasible, load-balanced monthly shift schedule"
    ),
    paths(crate::api::handlers::generate),
    components(schemas(
        GenerateScheduleRequest,
        GenerateScheduleResponse,
        ScheduleConfig,
        Person,
        Role,
        ShiftCounts,
        ShiftType,
        DayAssignment,
        ErrorResponse,
    ))
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new().route("/schedule", post(handlers::generate));

    Router::new()
        .nest("/api/v1", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
