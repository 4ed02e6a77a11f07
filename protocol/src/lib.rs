//! Wire types shared by the web app and the worker, plus the teaser-image
//! URL templating used by both the share page and the unsolved game view.

use serde::{Deserialize, Serialize};

/// One persisted game: the title to reveal and the uploaded photo, identified
/// by an opaque id. Field names match the stored rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /api/games`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub title: String,
    pub image_path: String,
}

/// Body returned by `POST /api/images`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

/// JSON error payload for API responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Sizing hints appended to an image URL to produce the degraded preview
/// shown before the puzzle is solved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TeaserParams {
    pub width: u32,
    pub quality: u8,
    pub blur: Option<u8>,
}

impl Default for TeaserParams {
    fn default() -> Self {
        Self {
            width: 200,
            quality: 15,
            blur: None,
        }
    }
}

/// Appends the teaser sizing hints to `image_path` as query parameters,
/// respecting a query string the path may already carry.
pub fn teaser_image_url(image_path: &str, params: TeaserParams) -> String {
    let separator = if image_path.contains('?') { '&' } else { '?' };
    let mut url = format!(
        "{image_path}{separator}width={}&quality={}",
        params.width, params.quality
    );
    if let Some(blur) = params.blur {
        url.push_str(&format!("&blur={blur}"));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teaser_url_uses_default_sizing_hints() {
        assert_eq!(
            teaser_image_url("https://cdn.example/i/abc.jpg", TeaserParams::default()),
            "https://cdn.example/i/abc.jpg?width=200&quality=15"
        );
    }

    #[test]
    fn teaser_url_extends_an_existing_query_string() {
        let params = TeaserParams {
            blur: Some(8),
            ..TeaserParams::default()
        };
        assert_eq!(
            teaser_image_url("https://cdn.example/i/abc.jpg?v=2", params),
            "https://cdn.example/i/abc.jpg?v=2&width=200&quality=15&blur=8"
        );
    }

    #[test]
    fn game_record_rows_use_snake_case_fields() {
        let record: GameRecord = serde_json::from_str(
            r#"{"id":"g1","title":"hi","image_path":"https://cdn.example/i/g1.jpg"}"#,
        )
        .unwrap();
        assert_eq!(record.title, "hi");
        assert_eq!(record.created_at, None);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""image_path""#));
        assert!(!json.contains("created_at"));
    }
}
