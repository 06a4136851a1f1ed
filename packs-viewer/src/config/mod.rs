//! Configuration management for the packs viewer
//!
//! Configuration is an explicit value handed to the server; nothing is read
//! from ambient globals once startup is done. Sources are layered with clear
//! precedence:
//!
//! 1. Command-line overrides (highest priority)
//! 2. `PORT` environment variable
//! 3. `PACKS_VIEWER_*` environment variables
//! 4. `./packs-viewer.toml` (or the file passed with `--config`)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # packs-viewer.toml
//! host = "127.0.0.1"
//! port = 3000
//! content_dir = "./html"
//! static_dir = "./static"
//! open_browser = false
//! stylesheets = ["/css/tailwind/tailwind.min.css"]
//! ```

use crate::error::{ViewerError, ViewerResult};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "packs-viewer.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PACKS_VIEWER_";

/// Host operating system family
///
/// Drives path separator normalization and the command used to open a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    Macos,
    /// Linux and friends
    Linux,
    /// Anything else; no browser auto-launch
    Other,
}

impl Platform {
    /// Detect the platform the binary is running on
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::Macos,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Root of the `<category>/<component>.html` tree
    pub content_dir: PathBuf,

    /// Project static assets, served for any path no route claims
    pub static_dir: PathBuf,

    /// Optional directory whose templates replace the embedded ones
    pub views_dir: Option<PathBuf>,

    /// Open the default browser once the server is listening
    pub open_browser: bool,

    /// Host platform
    pub platform: Platform,

    /// Categories starting with this prefix are internal and never classified
    pub reserved_prefix: String,

    /// Stylesheets linked from every rendered page, usually the pack's CSS
    pub stylesheets: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            content_dir: PathBuf::from("./html"),
            static_dir: PathBuf::from("./static"),
            views_dir: None,
            open_browser: true,
            platform: Platform::current(),
            reserved_prefix: "__".to_string(),
            stylesheets: vec!["/css/tailwind/tailwind.min.css".to_string()],
        }
    }
}

/// Values supplied on the command line
///
/// Only fields that are `Some` take part in the merge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    /// Bind address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Listening port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Content root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<PathBuf>,
    /// Static asset root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    /// Browser auto-launch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_browser: Option<bool>,
}

impl ViewerConfig {
    /// Build the layered figment without extracting it
    #[must_use]
    pub fn figment(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&["PORT"]))
            .merge(Serialized::defaults(overrides))
    }

    /// Load configuration from every source
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Config`] when a source holds a value of the
    /// wrong type (e.g. a non-numeric `PORT`).
    pub fn load(config_file: Option<&Path>, overrides: &ConfigOverrides) -> ViewerResult<Self> {
        let config: Self = Self::figment(config_file, overrides)
            .extract()
            .map_err(|e| ViewerError::Config(e.to_string()))?;

        tracing::debug!(
            host = %config.host,
            port = config.port,
            content_dir = %config.content_dir.display(),
            static_dir = %config.static_dir.display(),
            platform = ?config.platform,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Configuration rooted at a content directory, with everything else default
    ///
    /// Handy for tests and embedding; the browser is never opened.
    #[must_use]
    pub fn for_content_dir(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            open_browser: false,
            ..Self::default()
        }
    }

    /// Address the server binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL announced in logs and opened in the browser
    #[must_use]
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }
}
