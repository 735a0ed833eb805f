use std::fmt;

use iced::Theme;

use crate::preferences::Preferences;

pub const THEME_KEY: &str = "mtg-deck-builder-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀️",
            ThemeMode::Dark => "🌙",
        }
    }

    /// Tooltip of the toggle button.
    pub fn toggle_title(self) -> &'static str {
        match self {
            ThemeMode::Light => "Switch to dark mode",
            ThemeMode::Dark => "Switch to light mode",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ThemeController {
    prefs: Preferences,
    mode: ThemeMode,
}

impl ThemeController {
    /// Reads the saved preference once; anything unreadable means dark.
    pub fn init(prefs: Preferences) -> Self {
        let mode = Self::saved(&prefs);
        log::debug!("Theme initialised to {}", mode);
        Self { prefs, mode }
    }

    fn saved(prefs: &Preferences) -> ThemeMode {
        match prefs.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(ThemeMode::parse).unwrap_or_default(),
            Err(e) => {
                log::warn!("Could not read theme preference: {}", e);
                ThemeMode::default()
            }
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flips the stored preference and applies it.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = Self::saved(&self.prefs).flipped();
        if let Err(e) = self.prefs.set(THEME_KEY, next.as_str()) {
            log::warn!("Could not persist theme preference: {}", e);
        }
        self.mode = next;
        next
    }

    pub fn theme(&self) -> Theme {
        match self.mode {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }
}
