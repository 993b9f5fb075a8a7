//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        CreateSessionPayload, ErrorResponse, GuessPayload, GuessResponse, SentenceView,
        SessionView, TokenDisplayState, TokenView, TopicsResponse,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_topics,
        handlers::create_session,
        handlers::get_session,
        handlers::submit_guess,
        handlers::reshuffle,
    ),
    components(
        schemas(CreateSessionPayload, GuessPayload, GuessResponse, SessionView, SentenceView, TokenView, TokenDisplayState, TopicsResponse, ErrorResponse)
    ),
    tags(
        (name = "Parlance API", description = "Word-ordering game sessions over themed conversations")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/topics", get(handlers::list_topics))
        .route(
            "/session",
            get(handlers::get_session).post(handlers::create_session),
        )
        .route("/session/guess", post(handlers::submit_guess))
        .route("/session/reshuffle", post(handlers::reshuffle))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
