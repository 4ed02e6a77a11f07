//! Client for the managed database/storage service. All row and object I/O
//! goes through this one explicitly constructed collaborator.

use revealphoto_protocol::{GameRecord, NewGame};
use wasm_bindgen::JsValue;
use worker::{Env, Fetch, Headers, Method, Request, RequestInit};

const GAMES_TABLE_PATH: &str = "rest/v1/games";
const IMAGE_BUCKET: &str = "images";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("service credentials are not configured")]
    MissingCredentials,
    #[error("game not found")]
    NotFound,
    #[error("upstream service error: {0}")]
    Upstream(String),
}

impl From<worker::Error> for StoreError {
    fn from(err: worker::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// REST client for game rows and image objects.
pub struct RecordStore {
    base_url: String,
    api_key: String,
}

impl RecordStore {
    /// Reads `STORAGE_URL` and `STORAGE_KEY` from the worker environment.
    /// Missing credentials surface as a deploy-time misconfiguration, which
    /// callers report as an unexpected (500) failure.
    pub fn from_env(env: &Env) -> Result<Self> {
        let base_url = env
            .var("STORAGE_URL")
            .map_err(|_| StoreError::MissingCredentials)?
            .to_string();
        let api_key = env
            .var("STORAGE_KEY")
            .map_err(|_| StoreError::MissingCredentials)?
            .to_string();
        if base_url.is_empty() || api_key.is_empty() {
            return Err(StoreError::MissingCredentials);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub async fn get_game(&self, id: &str) -> Result<GameRecord> {
        let url = format!(
            "{}/{GAMES_TABLE_PATH}?id=eq.{id}&select=*&limit=1",
            self.base_url
        );
        let request = self.request(Method::Get, &url, None, &[])?;
        let mut response = Fetch::Request(request).send().await?;

        if response.status_code() == 404 {
            return Err(StoreError::NotFound);
        }
        if !(200..300).contains(&response.status_code()) {
            return Err(upstream_status(response.status_code()));
        }

        let mut rows: Vec<GameRecord> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn create_game(&self, new_game: &NewGame) -> Result<GameRecord> {
        let url = format!("{}/{GAMES_TABLE_PATH}", self.base_url);
        let body = serde_json::to_string(&[new_game])
            .map_err(|err| StoreError::Upstream(err.to_string()))?;
        let request = self.request(
            Method::Post,
            &url,
            Some(JsValue::from_str(&body)),
            &[
                ("Content-Type", "application/json"),
                ("Prefer", "return=representation"),
            ],
        )?;
        let mut response = Fetch::Request(request).send().await?;

        if !(200..300).contains(&response.status_code()) {
            return Err(upstream_status(response.status_code()));
        }

        let mut rows: Vec<GameRecord> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::Upstream(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    /// Stores an encoded image and returns its public URL.
    pub async fn upload_image(&self, bytes: &[u8], content_type: &str) -> Result<String> {
        let object_name = format!("{}.jpg", random_object_id());
        let url = format!(
            "{}/storage/v1/object/{IMAGE_BUCKET}/{object_name}",
            self.base_url
        );
        let body = js_sys::Uint8Array::from(bytes);
        let request = self.request(
            Method::Post,
            &url,
            Some(body.into()),
            &[("Content-Type", content_type)],
        )?;
        let response = Fetch::Request(request).send().await?;

        if !(200..300).contains(&response.status_code()) {
            return Err(upstream_status(response.status_code()));
        }

        Ok(format!(
            "{}/storage/v1/object/public/{IMAGE_BUCKET}/{object_name}",
            self.base_url
        ))
    }

    fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<JsValue>,
        extra_headers: &[(&str, &str)],
    ) -> Result<Request> {
        let headers = Headers::new();
        headers.set("apikey", &self.api_key)?;
        headers.set("Authorization", &format!("Bearer {}", self.api_key))?;
        for (name, value) in extra_headers {
            headers.set(name, value)?;
        }

        let mut init = RequestInit::new();
        init.with_method(method).with_headers(headers);
        if let Some(body) = body {
            init.with_body(Some(body));
        }

        Ok(Request::new_with_init(url, &init)?)
    }
}

fn upstream_status(status: u16) -> StoreError {
    StoreError::Upstream(format!("unexpected status {status}"))
}

/// Random hex object name from JS randomness; collisions are as unlikely as
/// a 128-bit clash.
fn random_object_id() -> String {
    use std::fmt::Write;

    let mut id = String::with_capacity(32);
    for _ in 0..16 {
        let byte = (256.0 * js_sys::Math::random()) as u8;
        let _ = write!(id, "{byte:02x}");
    }
    id
}
