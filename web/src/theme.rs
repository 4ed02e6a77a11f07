use serde::{Deserialize, Serialize};

use crate::utils::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl StorageKey for Theme {
    const KEY: &'static str = "revealphoto:theme";
}

impl Theme {
    const ATTR_NAME: &'static str = "data-theme";

    const fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Applies the persisted preference on startup. Without one the attribute
    /// stays unset and the stylesheet falls back to the media query.
    pub(crate) fn init() {
        Self::update_html(LocalOrDefault::local_or_default());
    }

    /// Persists the preference and restyles the document.
    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }

    /// Cycles explicit light, explicit dark, back to the media-query default.
    pub(crate) fn toggle() {
        let current: Option<Self> = LocalOrDefault::local_or_default();
        let next = match current {
            None => Some(Self::Light),
            Some(Self::Light) => Some(Self::Dark),
            Some(Self::Dark) => None,
        };
        Self::apply(next);
    }

    fn update_html(theme: Option<Self>) {
        let html = gloo::utils::document_element();
        let result = match theme {
            Some(theme) => {
                log::debug!("theme preference: {}", theme.scheme());
                html.set_attribute(Self::ATTR_NAME, theme.scheme())
            }
            None => {
                log::debug!("no theme preference");
                html.remove_attribute(Self::ATTR_NAME)
            }
        };
        if let Err(err) = result {
            log::error!("failed to apply theme: {err:?}");
        }
    }
}
