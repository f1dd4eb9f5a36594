/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::num::NonZeroU64;
use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Resolution used when neither the caller nor the configuration supplies a usable one.
pub const DEFAULT_RESOLUTION_MS: u64 = 10;

/// [`DEFAULT_RESOLUTION_MS`] as a non-zero value.
pub const DEFAULT_RESOLUTION: NonZeroU64 = match NonZeroU64::new(DEFAULT_RESOLUTION_MS) {
    Some(resolution) => resolution,
    None => panic!("default resolution must be non-zero"),
};

/// Configuration for Acton Stopwatch.
///
/// Loaded from `config.toml` in the XDG config directory for `acton-stopwatch`.
/// Every section and key is optional; anything missing keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    /// Defaults merged under the options a stopwatch is created with
    pub defaults: DefaultsConfig,
    /// Capacity limits
    pub limits: LimitsConfig,
    /// Shutdown timeouts
    pub timeouts: TimeoutConfig,
}

/// Values used when a stopwatch's creation options leave them unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Milliseconds per tick
    pub resolution_ms: u64,
    /// Base name for stopwatch ids
    pub stopwatch_name: String,
}

/// Limits and capacity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Bounded inbox size for each stopwatch
    pub inbox_capacity: usize,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long a single stopwatch may take to shut down, in milliseconds
    pub stopwatch_shutdown_timeout_ms: u64,
    /// How long `shutdown_all` may take, in milliseconds
    pub system_shutdown_timeout_ms: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            resolution_ms: DEFAULT_RESOLUTION_MS,
            stopwatch_name: "stopwatch".to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 255,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            stopwatch_shutdown_timeout_ms: 10_000,
            system_shutdown_timeout_ms: 30_000,
        }
    }
}

impl StopwatchConfig {
    /// Default resolution as a non-zero value.
    ///
    /// A configured `resolution_ms` of 0 is unusable and falls back to
    /// [`DEFAULT_RESOLUTION_MS`].
    #[must_use]
    pub fn default_resolution(&self) -> NonZeroU64 {
        NonZeroU64::new(self.defaults.resolution_ms).unwrap_or_else(|| {
            warn!(
                "Configured resolution_ms is 0, using {} ms",
                DEFAULT_RESOLUTION_MS
            );
            DEFAULT_RESOLUTION
        })
    }

    /// Inbox capacity, never below 1.
    #[must_use]
    pub fn inbox_capacity(&self) -> usize {
        self.limits.inbox_capacity.max(1)
    }

    /// Per-stopwatch shutdown timeout as a `Duration`.
    #[must_use]
    pub const fn stopwatch_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.stopwatch_shutdown_timeout_ms)
    }

    /// System-wide shutdown timeout as a `Duration`.
    #[must_use]
    pub const fn system_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.system_shutdown_timeout_ms)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads configuration from a specific file, falling back to defaults if the
    /// file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Self {
        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(text) => match Self::from_toml_str(&text) {
                Ok(config) => {
                    info!("Successfully loaded configuration");
                    config
                }
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `acton-stopwatch/config.toml` under `$XDG_CONFIG_HOME` (and the
    /// platform fallbacks the `xdg` crate knows about). A missing file yields the
    /// defaults; a malformed one is logged and also yields the defaults.
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("acton-stopwatch") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from(&path),
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Configuration loaded once from XDG-compliant locations.
    pub static ref CONFIG: StopwatchConfig = StopwatchConfig::load();
}
