use revealphoto_protocol::{ErrorBody, NewGame, UploadedImage};
use worker::*;

use crate::share::share_page_html;
use crate::store::{RecordStore, StoreError};

mod share;
mod store;

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let path = req.path();

    match (req.method(), path.as_str()) {
        (Method::Get, "/share") => share(req, &env).await,
        (Method::Post, "/api/games") => create_game(req, &env).await,
        (Method::Post, "/api/images") => upload_image(req, &env).await,
        (Method::Get, _) if path.starts_with("/api/games/") => get_game(&path, &env).await,
        _ => Response::error("not found", 404),
    }
}

async fn share(req: Request, env: &Env) -> Result<Response> {
    let id = match query_param(&req, "id")? {
        Some(id) if !id.is_empty() => id,
        _ => return Response::error("missing game id", 400),
    };

    let store = match RecordStore::from_env(env) {
        Ok(store) => store,
        Err(err) => return internal_error("share", &err),
    };

    match store.get_game(&id).await {
        Ok(record) => Response::from_html(share_page_html(&record)),
        Err(StoreError::NotFound) => Response::error("game not found", 404),
        Err(err) => internal_error("share", &err),
    }
}

async fn get_game(path: &str, env: &Env) -> Result<Response> {
    let Some(id) = extract_game_id(path) else {
        return json_error("missing game id", 400);
    };

    let store = match RecordStore::from_env(env) {
        Ok(store) => store,
        Err(err) => return internal_json_error("get_game", &err),
    };

    match store.get_game(id).await {
        Ok(record) => Response::from_json(&record),
        Err(StoreError::NotFound) => json_error("game not found", 404),
        Err(err) => internal_json_error("get_game", &err),
    }
}

async fn create_game(mut req: Request, env: &Env) -> Result<Response> {
    let new_game: NewGame = match req.json().await {
        Ok(new_game) => new_game,
        Err(_) => return json_error("invalid request body", 400),
    };
    if new_game.title.trim().is_empty() || new_game.image_path.trim().is_empty() {
        return json_error("title and image_path are required", 400);
    }

    let store = match RecordStore::from_env(env) {
        Ok(store) => store,
        Err(err) => return internal_json_error("create_game", &err),
    };

    match store.create_game(&new_game).await {
        Ok(record) => Ok(Response::from_json(&record)?.with_status(201)),
        Err(err) => internal_json_error("create_game", &err),
    }
}

async fn upload_image(mut req: Request, env: &Env) -> Result<Response> {
    let bytes = req.bytes().await?;
    if bytes.is_empty() {
        return json_error("empty image payload", 400);
    }

    let content_type = req
        .headers()
        .get("Content-Type")?
        .unwrap_or_else(|| "image/jpeg".to_string());

    let store = match RecordStore::from_env(env) {
        Ok(store) => store,
        Err(err) => return internal_json_error("upload_image", &err),
    };

    match store.upload_image(&bytes, &content_type).await {
        Ok(url) => Ok(Response::from_json(&UploadedImage { url })?.with_status(201)),
        Err(err) => internal_json_error("upload_image", &err),
    }
}

fn query_param(req: &Request, name: &str) -> Result<Option<String>> {
    let url = req.url()?;
    for (key, value) in url.query_pairs() {
        if key == name {
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn extract_game_id(path: &str) -> Option<&str> {
    let id = path.strip_prefix("/api/games/")?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

fn internal_error(context: &str, err: &StoreError) -> Result<Response> {
    console_log!("{context} failed: {err}");
    Response::error("internal error", 500)
}

fn internal_json_error(context: &str, err: &StoreError) -> Result<Response> {
    console_log!("{context} failed: {err}");
    json_error("internal error", 500)
}

fn json_error(message: &str, status: u16) -> Result<Response> {
    Ok(Response::from_json(&ErrorBody {
        error: message.to_string(),
    })?
    .with_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_id_is_the_sole_trailing_path_segment() {
        assert_eq!(extract_game_id("/api/games/abc-123"), Some("abc-123"));
        assert_eq!(extract_game_id("/api/games/"), None);
        assert_eq!(extract_game_id("/api/games/a/b"), None);
        assert_eq!(extract_game_id("/api/other/a"), None);
    }
}
