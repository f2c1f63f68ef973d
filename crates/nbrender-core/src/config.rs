//! Render configuration.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::transform::TransformRegistry;

/// Color theme signalled to the styling layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::Config(format!(
                "unknown theme '{}' (expected 'light' or 'dark')",
                other
            ))),
        }
    }
}

/// Configuration consumed by the renderer.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub theme: Theme,
    pub registry: TransformRegistry,
}

impl RenderConfig {
    /// Light theme with the built-in transforms.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            registry: TransformRegistry::builtin(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Apply settings on top of the built-in defaults.
    ///
    /// Display order entries with no registered transform are dropped.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let mut config = Self::new();

        if let Some(theme) = settings.theme {
            config.theme = theme;
        }

        if let Some(order) = &settings.display_order {
            let known: Vec<&str> = order
                .iter()
                .map(String::as_str)
                .filter(|mime_type| {
                    let registered = config.registry.is_registered(mime_type);
                    if !registered {
                        tracing::warn!(
                            "no transform for '{}', dropping it from display order",
                            mime_type
                        );
                    }
                    registered
                })
                .collect();
            config.registry.set_display_order(known);
        }

        config
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable render settings, loaded from a JSON file.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    #[serde(default)]
    pub theme: Option<Theme>,

    /// MIME types in rendering priority order.
    #[serde(default)]
    pub display_order: Option<Vec<String>>,
}

impl RenderSettings {
    /// Load settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::new();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(
            config.registry.display_order().len(),
            crate::transform::DEFAULT_DISPLAY_ORDER.len()
        );
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_settings_override_defaults() {
        let settings = RenderSettings::from_json(
            r#"{"theme": "dark", "displayOrder": ["image/png", "text/plain"], "other": 1}"#,
        )
        .unwrap();
        let config = RenderConfig::from_settings(&settings);

        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.registry.display_order(), ["image/png", "text/plain"]);
    }

    #[test]
    fn test_unknown_mime_types_are_dropped() {
        let settings = RenderSettings {
            theme: None,
            display_order: Some(vec!["video/mp4".to_string(), "text/html".to_string()]),
        };
        let config = RenderConfig::from_settings(&settings);

        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.registry.display_order(), ["text/html"]);
    }

    #[test]
    fn test_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let settings = RenderSettings::from_file(&path).unwrap();
        assert_eq!(settings.theme, Some(Theme::Dark));
        assert!(settings.display_order.is_none());
    }

    #[test]
    fn test_invalid_theme_in_file_is_an_error() {
        assert!(RenderSettings::from_json(r#"{"theme": "neon"}"#).is_err());
    }
}
