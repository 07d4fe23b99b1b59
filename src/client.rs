//! Typed HTTP client for the REST API.

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::api::{
    CreateGameRequest, CreateGameResponse, ErrorResponse, GameStateResponse,
    GameSummaryResponse, MakeGuessRequest, MakeGuessResponse,
};

/// Client for a running Mastermind server.
#[derive(Debug, Clone)]
pub struct MastermindClient {
    base_url: String,
    client: reqwest::Client,
}

impl MastermindClient {
    /// Creates a client for the server at `base_url`, e.g. `http://localhost:3000`.
    #[instrument]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the palette.
    #[instrument(skip(self))]
    pub async fn colors(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/api/colors", self.base_url))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::parse(response).await
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    pub async fn create_game(&self, seed: Option<i64>) -> Result<CreateGameResponse> {
        info!("Creating game");
        let response = self
            .client
            .post(format!("{}/api/games", self.base_url))
            .json(&CreateGameRequest { seed })
            .send()
            .await
            .context("Failed to reach server")?;
        Self::parse(response).await
    }

    /// Lists all games.
    #[instrument(skip(self))]
    pub async fn list_games(&self) -> Result<Vec<GameSummaryResponse>> {
        let response = self
            .client
            .get(format!("{}/api/games", self.base_url))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::parse(response).await
    }

    /// Gets a game with its guess history.
    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: i32) -> Result<GameStateResponse> {
        let response = self
            .client
            .get(format!("{}/api/games/{}", self.base_url, game_id))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::parse(response).await
    }

    /// Submits a guess.
    #[instrument(skip(self))]
    pub async fn guess(&self, game_id: i32, colors: Vec<String>) -> Result<MakeGuessResponse> {
        info!("Submitting guess");
        let response = self
            .client
            .post(format!("{}/api/games/{}/guesses", self.base_url, game_id))
            .json(&MakeGuessRequest { colors })
            .send()
            .await
            .context("Failed to reach server")?;
        Self::parse(response).await
    }

    /// Deletes a game.
    #[instrument(skip(self))]
    pub async fn delete_game(&self, game_id: i32) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/api/games/{}", self.base_url, game_id))
            .send()
            .await
            .context("Failed to reach server")?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        Err(Self::failure(response).await)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        debug!(status = %status, "Got response");
        if !status.is_success() {
            return Err(Self::failure(response).await);
        }
        response.json().await.context("Malformed response body")
    }

    async fn failure(response: Response) -> anyhow::Error {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return anyhow::anyhow!("HTTP {}: {}", status, e),
        };
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => anyhow::anyhow!("{} ({}): {}", err.error, status, err.message),
            Err(_) => anyhow::anyhow!("HTTP {}: {}", status, body),
        }
    }
}
