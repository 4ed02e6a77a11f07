#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Creator,
    Game { id: String },
}

/// Maps `location.pathname` to a page. Anything that is not a well-formed
/// game path falls back to the creator flow.
pub(crate) fn parse_path(path: &str) -> Route {
    let trimmed = path.trim_end_matches('/');
    if let Some(id) = trimmed.strip_prefix("/game/") {
        if !id.is_empty() && !id.contains('/') {
            return Route::Game { id: id.to_string() };
        }
    }
    Route::Creator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_paths_carry_the_record_id() {
        assert_eq!(
            parse_path("/game/abc-123"),
            Route::Game {
                id: "abc-123".to_string()
            }
        );
        assert_eq!(
            parse_path("/game/abc-123/"),
            Route::Game {
                id: "abc-123".to_string()
            }
        );
    }

    #[test]
    fn everything_else_lands_on_the_creator() {
        assert_eq!(parse_path("/"), Route::Creator);
        assert_eq!(parse_path(""), Route::Creator);
        assert_eq!(parse_path("/game/"), Route::Creator);
        assert_eq!(parse_path("/game/a/b"), Route::Creator);
        assert_eq!(parse_path("/about"), Route::Creator);
    }
}
