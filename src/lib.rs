//! Memories: a Zellij plugin for the memory photos posting service.
//!
//! Browse the shared photo feed, post new memories, edit your own, like and
//! delete, all from a terminal pane. Every rendered value comes from a
//! client-side store that is only ever changed by reducing the results of
//! completed backend calls.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, form state machine               │
//! │  - Dispatch of finished calls into the store        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store         │   │ Worker Layer  │
//! │ (ui/)         │   │ (store/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - PostEvent   │   │ - Image read  │
//! │ - Theming     │   │ - Reducer     │   │ - Validation  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Transport (transport/)                             │
//! │  - REST calls as curl commands, reply decoding      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Post, draft, image rules, errors (domain/)       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/memories.wasm" {
//!         backend_url "https://memories-proj.onrender.com/posts"
//!         curl_path "curl"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use memories::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(matches!(actions.as_slice(), [Action::SendRequest { .. }]));
//! # Ok::<(), memories::MemoriesError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod store;
pub mod transport;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus, FormField, FormMode};
pub use domain::{MemoriesError, Post, PostDraft, Result, TransportError};
pub use store::{PostEvent, PostStore};
pub use transport::{PostsApi, DEFAULT_BACKEND_URL};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
///
/// ```kdl
/// plugin location="file:/path/to/memories.wasm" {
///     backend_url "http://localhost:5000/posts"
///     curl_path "/usr/bin/curl"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base path of the posts resource.
    pub backend_url: String,

    /// Program run for HTTP calls. Default: `curl`
    pub curl_path: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; see [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter such as `debug` or `memories=trace`. Default: `info`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            curl_path: "curl".to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map, falling back to defaults for missing or
    /// blank values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use memories::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("backend_url".to_string(), "http://localhost:5000/posts/".to_string());
    /// map.insert("curl_path".to_string(), "  ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.backend_url, "http://localhost:5000/posts");
    /// assert_eq!(config.curl_path, "curl");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            backend_url: value("backend_url")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            curl_path: value("curl_path").unwrap_or(defaults.curl_path),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }
}

/// Builds the initial [`AppState`]: themed, pointed at the configured
/// backend, with an empty store that is filled once permissions are granted.
///
/// A theme that fails to load is logged and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(backend_url = %config.backend_url, "initializing memories plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, PostsApi::new(config.backend_url.clone()))
}
