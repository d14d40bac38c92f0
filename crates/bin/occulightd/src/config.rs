//! Configuration loading — TOML file with environment variable overrides.
//!
//! Reads `occulight.toml` from the working directory unless another path is
//! given. Server and logging settings have defaults so the file is optional;
//! light groups are only what the file declares. Environment variables take
//! precedence over file values.
//!
//! ```toml
//! [[groups]]
//! name = "hallway"
//! sensors = ["binary_sensor.hall_motion", "binary_sensor.stairs_motion"]
//! lights = ["light.hall_ceiling"]
//! light_off_timeout = 30
//! light_brightness = 80
//! ```

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use occulight_domain::group::LightGroup;
use occulight_domain::id::{LightId, SensorId};
use occulight_domain::light::Brightness;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "occulight.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Light groups, each run by its own controller.
    pub groups: Vec<GroupConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One `[[groups]]` entry as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupConfig {
    /// Defaults to `group-<index>`.
    #[serde(default)]
    pub name: Option<String>,
    pub sensors: Vec<String>,
    pub lights: Vec<String>,
    /// Seconds a sensor must stay `off` before it counts.
    #[serde(default = "default_light_off_timeout")]
    pub light_off_timeout: u64,
    /// Percent, `0..=100`.
    #[serde(default = "default_light_brightness")]
    pub light_brightness: i64,
}

fn default_light_off_timeout() -> u64 {
    1
}

fn default_light_brightness() -> i64 {
    100
}

impl GroupConfig {
    /// Build the validated [`LightGroup`]. `index` names unnamed groups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for blank ids, duplicates, empty
    /// sensor or light lists, or an out-of-range brightness.
    pub fn to_light_group(&self, index: usize) -> Result<LightGroup, ConfigError> {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("group-{index}"));
        let invalid = |err: &dyn std::fmt::Display| {
            ConfigError::Validation(format!("group {name}: {err}"))
        };

        let sensors = self
            .sensors
            .iter()
            .map(|s| SensorId::new(s.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid(&err))?;
        let lights = self
            .lights
            .iter()
            .map(|l| LightId::new(l.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid(&err))?;
        let brightness = Brightness::try_from(self.light_brightness).map_err(|err| invalid(&err))?;

        LightGroup::builder()
            .name(name.clone())
            .sensors(sensors)
            .lights(lights)
            .light_off_timeout(Duration::from_secs(self.light_off_timeout))
            .light_brightness(brightness)
            .build()
            .map_err(|err| invalid(&err))
    }
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Config path from the first CLI argument, then `OCCULIGHT_CONFIG`,
    /// then [`DEFAULT_CONFIG_PATH`].
    #[must_use]
    pub fn path_from_env() -> String {
        std::env::args()
            .nth(1)
            .or_else(|| std::env::var("OCCULIGHT_CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OCCULIGHT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("OCCULIGHT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("OCCULIGHT_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("OCCULIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let mut names = HashSet::new();
        for group in self.light_groups()? {
            if !names.insert(group.name.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate group name {}",
                    group.name
                )));
            }
        }
        Ok(())
    }

    /// Build every configured group, in file order.
    ///
    /// # Errors
    ///
    /// Returns the first group that fails validation.
    pub fn light_groups(&self) -> Result<Vec<LightGroup>, ConfigError> {
        self.groups
            .iter()
            .enumerate()
            .map(|(index, group)| group.to_light_group(index))
            .collect()
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "occulightd=info,occulight=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
