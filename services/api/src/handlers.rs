//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for the single
//! game session. It uses `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use parlance_core::{
    conversation::{ConversationFlow, FlowError},
    source::ConversationParams,
    splitter::WordSplitter,
    topic::TopicPicker,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    models::{
        CreateSessionPayload, ErrorResponse, GuessPayload, GuessResponse, SessionView,
        TopicsResponse,
    },
    state::{AppState, GameSession},
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// Maps flow errors onto HTTP semantics: contract violations are the
/// client's fault, collaborator faults are ours.
fn flow_error(err: FlowError) -> ApiError {
    match err {
        FlowError::Collaborator(inner) => ApiError::InternalServerError(inner),
        other => ApiError::BadRequest(other.to_string()),
    }
}

/// List the topics that can be played.
#[utoipa::path(
    get,
    path = "/topics",
    responses(
        (status = 200, description = "Playable topics", body = TopicsResponse)
    )
)]
pub async fn list_topics(State(state): State<Arc<AppState>>) -> Json<TopicsResponse> {
    Json(TopicsResponse {
        topics: state.topics.clone(),
    })
}

/// Start a new game session, replacing any existing one.
#[utoipa::path(
    post,
    path = "/session",
    request_body = CreateSessionPayload,
    responses(
        (status = 201, description = "Session created", body = SessionView),
        (status = 400, description = "Unknown topic", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut picker = TopicPicker::new(state.topics.clone());
    let topic = picker
        .select_by_value(&payload.topic)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .to_string();

    let params = ConversationParams {
        topic: topic.clone(),
        language: state.config.source_language.clone(),
        turn_count: state.config.turn_count,
        sentences_per_turn: state.config.sentences_per_turn,
        proficiency: state.config.proficiency,
    };
    let turns = state.source.conversation(&params).await?;

    let mut flow = ConversationFlow::new(
        state.segmenter.clone(),
        state.translator.clone(),
        WordSplitter::new(state.config.min_word_len),
        state.config.source_language.clone(),
        state.config.display_language.clone(),
    );
    flow.load_turns(turns).await.map_err(flow_error)?;

    let session = GameSession {
        id: Uuid::new_v4(),
        topic,
        language: state.config.source_language.clone(),
        proficiency: state.config.proficiency,
        flow,
    };
    let view = SessionView::from_session(&session);
    *state.session.lock().await = Some(session);
    info!(session_id = %view.id, topic = %view.topic, "session created");

    Ok((StatusCode::CREATED, Json(view)))
}

/// Fetch the current session.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session state", body = SessionView),
        (status = 404, description = "No active session", body = ErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let guard = state.session.lock().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("no active session".to_string()))?;
    Ok(Json(SessionView::from_session(session)))
}

/// Submit one token pick for the current turn.
#[utoipa::path(
    post,
    path = "/session/guess",
    request_body = GuessPayload,
    responses(
        (status = 200, description = "Guess evaluated", body = GuessResponse),
        (status = 400, description = "Guess violates the session contract", body = ErrorResponse),
        (status = 404, description = "No active session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn submit_guess(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GuessPayload>,
) -> Result<Json<GuessResponse>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = guard
        .as_mut()
        .ok_or_else(|| ApiError::NotFound("no active session".to_string()))?;

    let correct = session
        .flow
        .receive_guess(payload.sentence_index, payload.token_index)
        .await
        .map_err(flow_error)?;

    Ok(Json(GuessResponse {
        correct,
        session: SessionView::from_session(session),
    }))
}

/// Redraw the shuffled board for the current turn.
#[utoipa::path(
    post,
    path = "/session/reshuffle",
    responses(
        (status = 200, description = "Board reshuffled", body = SessionView),
        (status = 400, description = "The session is already finished", body = ErrorResponse),
        (status = 404, description = "No active session", body = ErrorResponse)
    )
)]
pub async fn reshuffle(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = guard
        .as_mut()
        .ok_or_else(|| ApiError::NotFound("no active session".to_string()))?;

    session.flow.reshuffle().map_err(flow_error)?;
    Ok(Json(SessionView::from_session(session)))
}
