pub mod script_tag;

use serde::{ Deserialize, Serialize };
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "/api/chat/ask";
pub const DEFAULT_TITLE: &str = "Smart Chat";
pub const DEFAULT_PLACEHOLDER: &str = "Type your question...";
pub const DEFAULT_GREETING: &str =
    "Hello! I'm your smart chat assistant. How can I help you today?";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid position: '{0}' (expected bottom-right or bottom-left)")]
    InvalidPosition(String),
    #[error("Invalid theme: '{0}' (expected light or dark)")]
    InvalidTheme(String),
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to read options file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse widget options: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    pub fn as_class(&self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bottom-right" => Ok(Position::BottomRight),
            "bottom-left" => Ok(Position::BottomLeft),
            _ => Err(ConfigError::InvalidPosition(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_class(&self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ConfigError::InvalidTheme(s.to_string())),
        }
    }
}

/// Caller-supplied overrides. Every field is optional; keys follow the
/// embedding page's option object (`apiUrl`, `calendlyUrl`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    pub api_url: Option<String>,
    pub theme: Option<Theme>,
    pub position: Option<Position>,
    pub title: Option<String>,
    pub placeholder: Option<String>,
    pub auto_open: Option<bool>,
    pub initial_message: Option<String>,
    pub calendly_url: Option<String>,
}

impl WidgetOptions {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Field-by-field overlay; values set in `other` win.
    pub fn merge(self, other: WidgetOptions) -> WidgetOptions {
        WidgetOptions {
            api_url: other.api_url.or(self.api_url),
            theme: other.theme.or(self.theme),
            position: other.position.or(self.position),
            title: other.title.or(self.title),
            placeholder: other.placeholder.or(self.placeholder),
            auto_open: other.auto_open.or(self.auto_open),
            initial_message: other.initial_message.or(self.initial_message),
            calendly_url: other.calendly_url.or(self.calendly_url),
        }
    }
}

/// Fully resolved widget settings. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Endpoint the widget POSTs to. May be relative to the host page.
    pub api_url: String,
    pub theme: Theme,
    pub position: Position,
    pub title: String,
    pub placeholder: String,
    pub auto_open: bool,
    /// Shown under the header title.
    pub initial_message: String,
    /// Scheduling page to embed. `None` means answer with the phone fallback.
    pub calendly_url: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme: Theme::default(),
            position: Position::default(),
            title: DEFAULT_TITLE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            auto_open: false,
            initial_message: DEFAULT_GREETING.to_string(),
            calendly_url: None,
        }
    }
}

impl WidgetConfig {
    /// Overlays `options` onto the defaults. Blank strings count as unset,
    /// the same way the embedding page treats empty option values.
    pub fn resolve(options: WidgetOptions) -> Self {
        let defaults = Self::default();
        Self {
            api_url: non_blank(options.api_url).unwrap_or(defaults.api_url),
            theme: options.theme.unwrap_or(defaults.theme),
            position: options.position.unwrap_or(defaults.position),
            title: non_blank(options.title).unwrap_or(defaults.title),
            placeholder: non_blank(options.placeholder).unwrap_or(defaults.placeholder),
            auto_open: options.auto_open.unwrap_or(defaults.auto_open),
            initial_message: non_blank(options.initial_message).unwrap_or(
                defaults.initial_message
            ),
            calendly_url: non_blank(options.calendly_url),
        }
    }

    /// Absolute endpoint URL. A relative `api_url` is joined onto the origin
    /// of the page hosting the widget.
    pub fn endpoint_url(&self, origin: Option<&Url>) -> Result<Url, ConfigError> {
        let invalid = |source: url::ParseError| ConfigError::InvalidUrl { url: self.api_url.clone(), source };
        match Url::parse(&self.api_url) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                match origin {
                    Some(base) => base.join(&self.api_url).map_err(invalid),
                    None => Err(invalid(url::ParseError::RelativeUrlWithoutBase)),
                }
            }
            Err(source) => Err(invalid(source)),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_no_options() {
        let config = WidgetConfig::resolve(WidgetOptions::default());
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.api_url, "/api/chat/ask");
        assert_eq!(config.position, Position::BottomRight);
        assert!(!config.auto_open);
        assert!(config.calendly_url.is_none());
    }

    #[test]
    fn options_override_defaults() {
        let options = WidgetOptions::from_json_str(
            r#"{
                "apiUrl": "https://bot.example.com/api/chat/ask",
                "position": "bottom-left",
                "theme": "dark",
                "title": "Power Help",
                "autoOpen": true,
                "calendlyUrl": "https://calendly.com/acme/visit"
            }"#
        ).unwrap();
        let config = WidgetConfig::resolve(options);
        assert_eq!(config.api_url, "https://bot.example.com/api/chat/ask");
        assert_eq!(config.position, Position::BottomLeft);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.title, "Power Help");
        assert!(config.auto_open);
        assert_eq!(config.calendly_url.as_deref(), Some("https://calendly.com/acme/visit"));
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = WidgetConfig::resolve(WidgetOptions {
            title: Some("  ".into()),
            calendly_url: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.calendly_url, None);
    }

    #[test]
    fn merge_prefers_later_source() {
        let file = WidgetOptions {
            title: Some("From file".into()),
            placeholder: Some("Ask away".into()),
            ..Default::default()
        };
        let flags = WidgetOptions {
            title: Some("From flags".into()),
            ..Default::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.title.as_deref(), Some("From flags"));
        assert_eq!(merged.placeholder.as_deref(), Some("Ask away"));
    }

    #[test]
    fn relative_endpoint_joins_page_origin() {
        let config = WidgetConfig::default();
        let origin = Url::parse("https://shop.example.com/contact").unwrap();
        let url = config.endpoint_url(Some(&origin)).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/chat/ask");
        assert!(matches!(config.endpoint_url(None), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn absolute_endpoint_ignores_origin() {
        let config = WidgetConfig {
            api_url: "http://127.0.0.1:9000/ask".into(),
            ..Default::default()
        };
        let origin = Url::parse("https://shop.example.com").unwrap();
        assert_eq!(
            config.endpoint_url(Some(&origin)).unwrap().as_str(),
            "http://127.0.0.1:9000/ask"
        );
    }

    #[test]
    fn unknown_position_is_rejected() {
        assert!(matches!("top-left".parse::<Position>(), Err(ConfigError::InvalidPosition(_))));
        assert!(WidgetOptions::from_json_str(r#"{"position":"middle"}"#).is_err());
    }
}
