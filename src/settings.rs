use std::{fmt, str::FromStr, sync::Arc};

use anyhow::anyhow;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;

pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow!("unknown theme '{other}'")),
        }
    }
}

/// User preferences kept next to the verification history.
pub struct PreferencesStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl PreferencesStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> Theme {
        match self.storage.get(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                warn!("Ignoring stored theme: {err}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("Failed to read theme preference: {err}");
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Err(err) = self.storage.set(THEME_STORAGE_KEY, theme.as_str()) {
            warn!("Failed to persist theme preference: {err}");
        }
    }
}
