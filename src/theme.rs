//! Theme preference logic for the web client.
//!
//! Deciding which theme to show is a pure function of the stored preference
//! and the OS hint. Persisting the choice and painting it go through the
//! [`PreferenceStore`] and [`ThemeSurface`] traits.

/// Storage key the client keeps its preference under
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// A stored `"dark"` wins; any other stored value means light. With nothing
/// stored the OS preference decides.
pub fn desired_theme(stored: Option<&str>, os_prefers_dark: bool) -> Theme {
    match stored {
        Some("dark") => Theme::Dark,
        Some(_) => Theme::Light,
        None if os_prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// What the page should look like for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePresentation {
    pub add_class: &'static str,
    pub remove_class: &'static str,
    pub toggle_icon: &'static str,
}

impl ThemePresentation {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                add_class: "dark-mode",
                remove_class: "light",
                toggle_icon: "☀️",
            },
            Theme::Light => Self {
                add_class: "light",
                remove_class: "dark-mode",
                toggle_icon: "🌙",
            },
        }
    }
}

/// Opaque client-side key/value storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Where a presentation gets applied
pub trait ThemeSurface {
    fn apply(&mut self, presentation: &ThemePresentation);
}

pub struct ThemeController<S, U> {
    store: S,
    surface: U,
    os_prefers_dark: bool,
}

impl<S: PreferenceStore, U: ThemeSurface> ThemeController<S, U> {
    pub fn new(store: S, surface: U, os_prefers_dark: bool) -> Self {
        Self {
            store,
            surface,
            os_prefers_dark,
        }
    }

    pub fn current(&self) -> Theme {
        let stored = self.store.get(THEME_STORAGE_KEY);
        desired_theme(stored.as_deref(), self.os_prefers_dark)
    }

    /// Applies and persists the theme derived at page load
    pub fn initialize(&mut self) -> Theme {
        let theme = self.current();
        self.apply(theme);
        theme
    }

    pub fn toggle(&mut self) -> Theme {
        let theme = self.current().toggled();
        self.apply(theme);
        theme
    }

    fn apply(&mut self, theme: Theme) {
        self.surface.apply(&ThemePresentation::for_theme(theme));
        self.store.set(THEME_STORAGE_KEY, theme.as_str());
    }

    pub fn into_parts(self) -> (S, U) {
        (self.store, self.surface)
    }
}
