// Configuration for the analysis client
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/soundsense/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Also write logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Analysis Service
    pub service_base_url: String,

    /// Directory the file picker scans for .mp3/.wav files
    pub audio_dir: PathBuf,

    /// HTTP request timeout in seconds
    /// A hung request is bounded only by this; there is no client-side retry
    pub request_timeout_secs: u64,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    service_base_url: Option<String>,
    audio_dir: Option<String>,
    request_timeout_secs: Option<u64>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/soundsense/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("soundsense").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# soundsense configuration
# Uncomment and modify options as needed

# Base URL of the Analysis Service (default: http://localhost:5000)
# service_base_url = "http://localhost:5000"

# Directory to scan for .mp3/.wav files (default: current directory)
# audio_dir = "."

# HTTP request timeout in seconds (default: 600)
# request_timeout_secs = 600

# Logging configuration
# [logging]
# level = "info"         # trace, debug, info, warn, error (RUST_LOG env var overrides this)
# file_enabled = false   # Also write logs to rotating files
# file_dir = "./logs"    # Directory for log files
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# soundsense configuration

# Base URL of the Analysis Service
service_base_url = "{service_url}"

# Directory to scan for .mp3/.wav files
audio_dir = "{audio_dir}"

# HTTP request timeout in seconds
request_timeout_secs = {timeout}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
"#,
            service_url = self.service_base_url,
            audio_dir = self.audio_dir.display(),
            timeout = self.request_timeout_secs,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
        )
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Service URL: env > file > default
        let service_base_url = std::env::var("SOUNDSENSE_SERVICE_URL")
            .ok()
            .or(file.service_base_url)
            .unwrap_or_else(|| "http://localhost:5000".to_string());

        // Audio directory: env > file > default
        let audio_dir = std::env::var("SOUNDSENSE_AUDIO_DIR")
            .ok()
            .or(file.audio_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        // Request timeout: file > default (generous - large files transcribe slowly)
        let request_timeout_secs = file.request_timeout_secs.unwrap_or(600);

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("SOUNDSENSE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or_else(|| "info".to_string()),
            file_enabled: file_logging.file_enabled.unwrap_or(false),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./logs")),
        };

        Self {
            service_base_url,
            audio_dir,
            request_timeout_secs,
            enable_tui,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:5000".to_string(),
            audio_dir: PathBuf::from("."),
            request_timeout_secs: 600,
            enable_tui: true,
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that serialized config can be parsed back.
    /// Catches TOML syntax errors in the to_toml template.
    #[test]
    fn test_config_roundtrip_default() {
        let config = Config::default();
        let toml_str = config.to_toml();

        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );

        let file = parsed.unwrap();
        assert_eq!(
            file.service_base_url.as_deref(),
            Some("http://localhost:5000")
        );
        assert_eq!(file.request_timeout_secs, Some(600));
        let logging = file.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.file_enabled, Some(false));
    }

    /// The startup template must stay parseable as it gains options
    #[test]
    fn test_partial_file_config_parses() {
        let toml_str = r#"
service_base_url = "http://audio.internal:9000"

[logging]
level = "debug"
"#;
        let file: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            file.service_base_url.as_deref(),
            Some("http://audio.internal:9000")
        );
        assert!(file.audio_dir.is_none());
        assert_eq!(file.logging.unwrap().level.as_deref(), Some("debug"));
    }
}
