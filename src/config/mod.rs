//! Configuration for the renderer and logging
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/terminal-display/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;


/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ENV_LOG_LEVEL: &str = "TERMINAL_DISPLAY_LOG";
const ENV_LOG_DIR: &str = "TERMINAL_DISPLAY_LOG_DIR";
const ENV_ALT_SCREEN: &str = "TERMINAL_DISPLAY_ALT_SCREEN";

// ─────────────────────────────────────────────────────────────────────────────
// Render Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How the renderer takes over its output target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Draw on the alternate screen and restore the old contents on close
    pub alternate_screen: bool,

    /// Put the terminal in raw mode so keystrokes are not echoed over the display
    pub raw_mode: bool,

    /// Hide the cursor while attached
    pub hide_cursor: bool,
}

impl RenderConfig {
    /// Touch nothing on the target (in-memory backends, plain writers)
    pub fn headless() -> Self {
        Self {
            alternate_screen: false,
            raw_mode: false,
            hide_cursor: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            raw_mode: true,
            hide_cursor: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Directory for log files. Without one, logs are discarded: the
    /// terminal belongs to the renderer.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Render settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileRender {
    alternate_screen: Option<bool>,
    raw_mode: Option<bool>,
    hide_cursor: Option<bool>,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    level: Option<String>,
    dir: Option<String>,
}

/// Config file structure: every field optional, merged over defaults
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [render] section
    render: Option<FileRender>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/terminal-display/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| {
            p.join(".config")
                .join("terminal-display")
                .join("config.toml")
        })
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Parse a config file body and merge it over defaults (no env lookup)
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(contents)?;
        Ok(Self::resolve(file, |_| None))
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();

        // Render settings: alternate screen can be switched off from the env
        // (handy when piping output); the rest is file only
        let file_render = file.render.unwrap_or_default();
        let render = RenderConfig {
            alternate_screen: env(ENV_ALT_SCREEN)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .or(file_render.alternate_screen)
                .unwrap_or(defaults.render.alternate_screen),
            raw_mode: file_render.raw_mode.unwrap_or(defaults.render.raw_mode),
            hide_cursor: file_render
                .hide_cursor
                .unwrap_or(defaults.render.hide_cursor),
        };

        // Logging: env > file > default (RUST_LOG is applied on top in logging::init)
        let file_logging = file.logging.unwrap_or_default();
        let logging = LoggingConfig {
            level: env(ENV_LOG_LEVEL)
                .or(file_logging.level)
                .unwrap_or(defaults.logging.level),
            dir: env(ENV_LOG_DIR)
                .or(file_logging.dir)
                .map(PathBuf::from)
                .or(defaults.logging.dir),
        };

        Self { render, logging }
    }

    /// Serialize config to TOML string
    pub fn to_toml(&self) -> String {
        let dir = match &self.logging.dir {
            Some(dir) => format!("dir = {:?}", dir.display().to_string()),
            None => "# dir = \"./logs\"".to_string(),
        };

        format!(
            r#"# terminal-display configuration

[render]
alternate_screen = {alt}
raw_mode = {raw}
hide_cursor = {hide}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{level}"
{dir}
"#,
            alt = self.render.alternate_screen,
            raw = self.render.raw_mode,
            hide = self.render.hide_cursor,
            level = self.logging.level,
        )
    }
}
