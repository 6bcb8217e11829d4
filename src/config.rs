use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Default id offset: numbering continues from the last id of the previous
/// run's output file.
pub const DEFAULT_ID_OFFSET: u32 = 699;

/// Default viewport width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 640;

/// Application configuration loaded from environment variables.
///
/// Every variable has a default; an empty environment yields a working
/// configuration matching the paths the site tooling expects.
#[derive(Debug, Clone)]
pub struct Config {
    // Output
    pub output_json_path: PathBuf,
    pub image_dir: PathBuf,

    // Numbering
    pub id_offset: u32,

    // Browser
    pub viewport_width: u32,
    pub chrome_path: Option<String>,

    // Timeouts & pacing
    pub nav_timeout: Duration,
    pub ready_timeout: Duration,
    pub anchor_timeout: Duration,
    pub screenshot_timeout: Duration,
    pub iteration_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Output
            output_json_path: PathBuf::from(env_or_default("OUTPUT_JSON_PATH", "./fufufafa.json")),
            image_dir: PathBuf::from(env_or_default("IMAGE_DIR", "./public/img")),

            // Numbering
            id_offset: parse_env_u32("ID_OFFSET", DEFAULT_ID_OFFSET)?,

            // Browser
            viewport_width: parse_env_u32("VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH)?,
            chrome_path: optional_env("CHROME_PATH"),

            // Timeouts & pacing
            nav_timeout: Duration::from_secs(parse_env_u64("NAV_TIMEOUT_SECS", 60)?),
            ready_timeout: Duration::from_secs(parse_env_u64("READY_TIMEOUT_SECS", 10)?),
            anchor_timeout: Duration::from_secs(parse_env_u64("ANCHOR_TIMEOUT_SECS", 5)?),
            screenshot_timeout: Duration::from_secs(parse_env_u64("SCREENSHOT_TIMEOUT_SECS", 60)?),
            iteration_delay: Duration::from_millis(parse_env_u64("ITERATION_DELAY_MS", 1000)?),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 {
            return Err(ConfigError::InvalidValue {
                name: "VIEWPORT_WIDTH".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.output_json_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "OUTPUT_JSON_PATH".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.image_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "IMAGE_DIR".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration for tests: default paths, short timeouts, no pacing.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            output_json_path: PathBuf::from("./fufufafa.json"),
            image_dir: PathBuf::from("./public/img"),
            id_offset: DEFAULT_ID_OFFSET,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            chrome_path: None,
            nav_timeout: Duration::from_secs(30),
            ready_timeout: Duration::from_secs(5),
            anchor_timeout: Duration::from_secs(2),
            screenshot_timeout: Duration::from_secs(30),
            iteration_delay: Duration::ZERO,
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        assert_eq!(parse_env_u32("NONEXISTENT_VAR", 7).unwrap(), 7);
        assert_eq!(parse_env_u64("NONEXISTENT_VAR", 42).unwrap(), 42);
        assert_eq!(env_or_default("NONEXISTENT_VAR", "fallback"), "fallback");
        assert!(optional_env("NONEXISTENT_VAR").is_none());
    }

    #[test]
    fn test_for_testing_is_valid() {
        let config = Config::for_testing();
        assert!(config.validate().is_ok());
        assert_eq!(config.id_offset, DEFAULT_ID_OFFSET);
        assert_eq!(config.iteration_delay, Duration::ZERO);
    }

    #[test]
    fn test_validate_rejects_zero_viewport() {
        let config = Config {
            viewport_width: 0,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let config = Config {
            output_json_path: PathBuf::new(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            image_dir: PathBuf::new(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }
}
