use gloo::net::http::Request;
use revealphoto_protocol::{GameRecord, NewGame, UploadedImage};

/// Errors surfaced by the data-access layer. The game view treats a missing
/// record and a transport failure the same way: a terminal error screen.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("game not found")]
    NotFound,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response status {0}")]
    Status(u16),
}

/// Data access contract for everything the pages need from the backend.
/// Implementations are injected into the page components through props; no
/// page reaches for an ambient client.
pub(crate) trait GameStore {
    async fn get_game(&self, id: &str) -> Result<GameRecord, ApiError>;
    async fn create_game(&self, new_game: NewGame) -> Result<GameRecord, ApiError>;
    async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, ApiError>;
}

/// [`GameStore`] over the worker's JSON API on the same origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ApiClient;

impl ApiClient {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl GameStore for ApiClient {
    async fn get_game(&self, id: &str) -> Result<GameRecord, ApiError> {
        let response = Request::get(&format!("/api/games/{id}"))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            200 => response.json().await.map_err(transport),
            404 => Err(ApiError::NotFound),
            status => Err(ApiError::Status(status)),
        }
    }

    async fn create_game(&self, new_game: NewGame) -> Result<GameRecord, ApiError> {
        let response = Request::post("/api/games")
            .json(&new_game)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            200 | 201 => response.json().await.map_err(transport),
            status => Err(ApiError::Status(status)),
        }
    }

    async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, ApiError> {
        let body = js_sys::Uint8Array::from(bytes.as_slice());
        let response = Request::post("/api/images")
            .header("Content-Type", content_type)
            .body(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            200 | 201 => {
                let uploaded: UploadedImage = response.json().await.map_err(transport)?;
                Ok(uploaded.url)
            }
            status => Err(ApiError::Status(status)),
        }
    }
}

fn transport(err: gloo::net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
