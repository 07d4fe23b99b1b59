//! REST request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{debug, info, instrument};

use crate::api::{
    ApiError, CreateGameRequest, CreateGameResponse, GameStateResponse, GameSummaryResponse,
    MakeGuessRequest, MakeGuessResponse, color_names,
};
use crate::service::{GameService, ServiceError};

/// Shared state of the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    service: GameService,
}

impl AppState {
    /// Wraps a game service.
    pub fn new(service: GameService) -> Self {
        Self { service }
    }

    /// The game service.
    pub fn service(&self) -> &GameService {
        &self.service
    }
}

/// Builds the API router.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/colors", get(list_colors))
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/{id}", get(get_game).delete(delete_game))
        .route("/api/games/{id}/guesses", axum::routing::post(submit_guess))
        .with_state(state)
}

/// Runs a service call on the blocking pool; storage access is synchronous.
async fn blocking<T, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(call).await??)
}

async fn root() -> &'static str {
    "Mastermind game server"
}

#[instrument(skip(state))]
async fn list_colors(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(color_names(&state.service.colors()))
}

#[instrument(skip(state, body))]
async fn create_game(
    State(state): State<AppState>,
    body: Result<Option<Json<CreateGameRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    // A bodiless POST starts an unseeded game.
    let req = body?.map(|Json(req)| req).unwrap_or_default();
    debug!(seed = ?req.seed, "Create game request");
    let service = state.service.clone();
    let summary = blocking(move || service.create_game(req.seed)).await?;
    info!(game_id = summary.game_id(), "Game created via API");
    Ok((StatusCode::CREATED, Json(CreateGameResponse::from(&summary))))
}

#[instrument(skip(state))]
async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameSummaryResponse>>, ApiError> {
    let service = state.service.clone();
    let games = blocking(move || service.list_games()).await?;
    Ok(Json(games.iter().map(GameSummaryResponse::from).collect()))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let service = state.service.clone();
    let snapshot = blocking(move || service.get_game(game_id)).await?;
    Ok(Json(GameStateResponse::from(&snapshot)))
}

#[instrument(skip(state, body))]
async fn submit_guess(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    body: Result<Json<MakeGuessRequest>, JsonRejection>,
) -> Result<Json<MakeGuessResponse>, ApiError> {
    let Json(req) = body?;
    debug!(colors = ?req.colors, "Guess request");
    let service = state.service.clone();
    let outcome = blocking(move || service.submit_guess(game_id, &req.colors)).await?;
    info!(
        game_id,
        attempt = outcome.attempt().number(),
        status = %outcome.status(),
        "Guess scored via API"
    );
    Ok(Json(MakeGuessResponse::from(&outcome)))
}

#[instrument(skip(state))]
async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let service = state.service.clone();
    blocking(move || service.delete_game(game_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
