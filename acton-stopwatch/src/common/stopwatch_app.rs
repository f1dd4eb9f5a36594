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

use tracing::trace;

use crate::common::{StopwatchConfig, StopwatchRuntime};

/// Entry point for creating a [`StopwatchRuntime`].
#[derive(Default, Debug, Clone)]
pub struct StopwatchApp;

impl StopwatchApp {
    /// Loads configuration from the XDG config directory and returns a runtime.
    #[must_use]
    pub fn launch() -> StopwatchRuntime {
        trace!("Starting stopwatch runtime");
        let config = StopwatchConfig::load();
        trace!("Configuration loaded: {:?}", config);
        StopwatchRuntime::with_config(config)
    }

    /// Returns a runtime using the given configuration instead of loading one.
    #[must_use]
    pub fn launch_with_config(config: StopwatchConfig) -> StopwatchRuntime {
        trace!("Starting stopwatch runtime with explicit configuration");
        StopwatchRuntime::with_config(config)
    }
}
