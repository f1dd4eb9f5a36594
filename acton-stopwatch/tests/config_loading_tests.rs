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

use std::fs;

use acton_stopwatch::prelude::*;
use acton_stopwatch_test::prelude::*;
use tempfile::TempDir;

/// Configuration from `$XDG_CONFIG_HOME/acton-stopwatch/config.toml` reaches new stopwatches.
///
/// Environment-dependent scenarios run in one test so they cannot race each other.
#[acton_stopwatch_test]
async fn test_xdg_configuration_loading() -> anyhow::Result<()> {
    // No config file: defaults.
    let empty = TempDir::new()?;
    std::env::set_var("XDG_CONFIG_HOME", empty.path());
    let runtime = StopwatchApp::launch();
    assert_eq!(runtime.config(), &StopwatchConfig::default());

    // A custom file overrides what it names.
    let custom = TempDir::new()?;
    let config_dir = custom.path().join("acton-stopwatch");
    fs::create_dir_all(&config_dir)?;
    fs::write(
        config_dir.join("config.toml"),
        r#"
        [defaults]
        resolution_ms = 25
        stopwatch_name = "custom"

        [limits]
        inbox_capacity = 16
        "#,
    )?;
    std::env::set_var("XDG_CONFIG_HOME", custom.path());

    let runtime = StopwatchApp::launch();
    assert_eq!(runtime.config().defaults.resolution_ms, 25);
    assert_eq!(runtime.config().limits.inbox_capacity, 16);
    assert_eq!(runtime.config().timeouts.system_shutdown_timeout_ms, 30_000);

    let stopwatch = runtime.new_stopwatch(StopwatchOptions::new()).await?;
    assert_eq!(stopwatch.snapshot().await?.resolution.get(), 25);
    assert!(stopwatch.name().starts_with("custom"));
    runtime.shutdown_all().await?;

    // A malformed file falls back to defaults.
    fs::write(config_dir.join("config.toml"), "[defaults\nresolution_ms = ")?;
    let runtime = StopwatchApp::launch();
    assert_eq!(runtime.config(), &StopwatchConfig::default());

    Ok(())
}

/// Loading an explicit path that does not exist yields defaults.
#[acton_stopwatch_test]
async fn test_missing_explicit_path_uses_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = StopwatchConfig::load_from(&dir.path().join("absent.toml"));
    assert_eq!(config, StopwatchConfig::default());
    Ok(())
}
