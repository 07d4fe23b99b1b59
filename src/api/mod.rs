//! REST transport over the game service.

mod dto;
mod error;
mod routes;

pub use dto::{
    CreateGameRequest, CreateGameResponse, ErrorResponse, GameStateResponse,
    GameSummaryResponse, GuessHistoryItem, MakeGuessRequest, MakeGuessResponse, color_names,
};
pub use error::ApiError;
pub use routes::{AppState, router};
