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

//! Runtime plumbing around the stopwatch state machine.
//!
//! *   [`StopwatchApp`]: entry point that loads configuration and builds a runtime.
//! *   [`StopwatchRuntime`]: creates stopwatches and tracks their handles.
//! *   [`StopwatchHandle`]: clonable handle for commanding one stopwatch.
//! *   [`StopwatchConfig`]: XDG/TOML configuration.
//! *   [`ManualTickTimer`]: deterministic timer for driving a stopwatch by hand.

// --- Public Re-exports ---
pub use config::{StopwatchConfig, DEFAULT_RESOLUTION, DEFAULT_RESOLUTION_MS};
pub use manual_tick_timer::ManualTickTimer;
pub use stopwatch_app::StopwatchApp;
pub use stopwatch_handle::StopwatchHandle;
pub use stopwatch_runtime::StopwatchRuntime;
pub use types::*;

// --- Crate-Internal Re-exports ---
pub(crate) use tokio_tick_timer::TokioTickTimer;

// --- Submodules ---

/// Configuration loaded from XDG-compliant locations.
pub mod config;
mod manual_tick_timer;
mod stopwatch_app;
mod stopwatch_handle;
mod stopwatch_runtime;
mod tokio_tick_timer;
mod types;
