//! Light/dark theme context. The choice is persisted in localStorage and
//! applied to the document (`data-theme` attribute plus a body class the
//! stylesheet keys off).

use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::browser;
use crate::config::AppConfig;

pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Saved preference first, config default otherwise.
pub fn initial_theme(config: &AppConfig) -> Theme {
    browser::local_storage_get(THEME_STORAGE_KEY)
        .and_then(|v| Theme::from_str(&v))
        .or_else(|| Theme::from_str(&config.default_theme))
        .unwrap_or_default()
}

fn apply_to_document(theme: Theme) {
    let Some(document) = browser::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
    if let Some(body) = document.body() {
        body.set_class_name(theme.body_class());
    }
}

pub type ThemeContext = UseStateHandle<Theme>;

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let config = use_context::<std::rc::Rc<AppConfig>>().expect("ThemeProvider outside ConfigProvider");
    let theme = use_state(|| initial_theme(&config));

    {
        let current = *theme;
        use_effect_with(current, move |_| {
            apply_to_document(current);
            browser::local_storage_set(THEME_STORAGE_KEY, current.as_str());
            || ()
        });
    }

    html! {
        <ContextProvider<ThemeContext> context={theme.clone()}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

#[hook]
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("use_theme outside ThemeProvider")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_toggle() {
        assert_eq!(Theme::from_str("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("solarized"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn body_class_matches_theme() {
        assert_eq!(Theme::Dark.body_class(), "dark-theme");
        assert_eq!(Theme::Light.body_class(), "light-theme");
    }
}
