//! Server-rendered social preview for a shared game link. Link-preview bots
//! read the open-graph tags; a human visitor is immediately redirected to the
//! interactive puzzle view.

use revealphoto_protocol::{GameRecord, TeaserParams, teaser_image_url};

pub const SHARE_DESCRIPTION: &str = "Solve the puzzle to reveal the photo!";

/// Builds the preview document for one game record.
pub fn share_page_html(record: &GameRecord) -> String {
    let title = escape_html(&record.title);
    let teaser = escape_html(&teaser_image_url(
        &record.image_path,
        TeaserParams::default(),
    ));
    let game_url = format!("/game/{}", record.id);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{title}</title>
<meta property="og:title" content="{title}">
<meta property="og:image" content="{teaser}">
<meta property="og:description" content="{SHARE_DESCRIPTION}">
<meta http-equiv="refresh" content="0;url={game_url}">
</head>
<body>Redirecting&hellip;</body>
</html>
"#
    )
}

/// Minimal escaping for text dropped into HTML content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GameRecord {
        GameRecord {
            id: "g42".to_string(),
            title: "Happy birthday <3".to_string(),
            image_path: "https://cdn.example/i/g42.jpg".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn preview_embeds_escaped_title_and_teaser_image() {
        let html = share_page_html(&record());

        assert!(html.contains("<title>Happy birthday &lt;3</title>"));
        assert!(html.contains(
            r#"og:image" content="https://cdn.example/i/g42.jpg?width=200&amp;quality=15""#
        ));
        assert!(html.contains(r#"content="0;url=/game/g42""#));
    }

    #[test]
    fn escaping_covers_attribute_breakers() {
        assert_eq!(
            escape_html(r#"a"b'c&d<e>"#),
            "a&quot;b&#39;c&amp;d&lt;e&gt;"
        );
    }
}
