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

use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;

use tracing::warn;

use crate::common::{silent_announcer, Announcer, Initializer, StopwatchConfig, DEFAULT_RESOLUTION};
use crate::message::Announcement;

/// Creation options for a stopwatch.
///
/// Every option is optional. Unset options take their value from the runtime's
/// [`StopwatchConfig`] or the built-in defaults: `ticks = 0`, `running = false`,
/// `resolution = 10` ms and an announcer that discards everything.
///
/// ```rust,ignore
/// let options = StopwatchOptions::new()
///     .with_name("lap-timer")
///     .with_resolution(20)
///     .with_announcer(|announcement| println!("{announcement:?}"));
/// ```
#[derive(Default)]
pub struct StopwatchOptions {
    name: Option<String>,
    initializer: Option<Initializer>,
    ticks: Option<u64>,
    running: Option<bool>,
    resolution: Option<NonZeroU64>,
    announcer: Option<Announcer>,
}

impl fmt::Debug for StopwatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopwatchOptions")
            .field("name", &self.name)
            .field("initializer", &self.initializer.is_some())
            .field("ticks", &self.ticks)
            .field("running", &self.running)
            .field("resolution", &self.resolution)
            .field("announcer", &self.announcer.is_some())
            .finish()
    }
}

impl StopwatchOptions {
    /// Options with nothing overridden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base name for the stopwatch id. A sequence number is appended so names never collide.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Side effect run once during creation, before the state is finalized.
    #[must_use]
    pub fn with_initializer<F>(mut self, initializer: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.initializer = Some(Box::new(initializer));
        self
    }

    /// Initial tick count.
    #[must_use]
    pub const fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = Some(ticks);
        self
    }

    /// Whether the stopwatch starts out running.
    #[must_use]
    pub const fn with_running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    /// Milliseconds per tick. Zero is not a usable resolution and leaves the default in place.
    #[must_use]
    pub fn with_resolution(mut self, resolution_ms: u64) -> Self {
        match NonZeroU64::new(resolution_ms) {
            Some(resolution) => self.resolution = Some(resolution),
            None => warn!("Ignoring zero resolution, keeping the default"),
        }
        self
    }

    /// Sink for announcements.
    #[must_use]
    pub fn with_announcer<F>(mut self, announcer: F) -> Self
    where
        F: Fn(&Announcement) + Send + Sync + 'static,
    {
        self.announcer = Some(Arc::new(announcer));
        self
    }

    /// Sink for announcements, already shared.
    #[must_use]
    pub fn with_shared_announcer(mut self, announcer: Announcer) -> Self {
        self.announcer = Some(announcer);
        self
    }

    /// Splits the options into the base name, the initializer and the settings the
    /// stopwatch starts from, filling unset values from `config`.
    pub(crate) fn resolve(
        self,
        config: &StopwatchConfig,
    ) -> (String, Option<Initializer>, StopwatchSettings) {
        let name = self
            .name
            .unwrap_or_else(|| config.defaults.stopwatch_name.clone());
        let settings = StopwatchSettings {
            ticks: self.ticks.unwrap_or(0),
            running: self.running.unwrap_or(false),
            resolution: self
                .resolution
                .unwrap_or_else(|| config.default_resolution()),
            announcer: self.announcer.unwrap_or_else(silent_announcer),
        };
        (name, self.initializer, settings)
    }
}

/// The fully merged state a [`Stopwatch`](crate::prelude::Stopwatch) starts from.
#[derive(Clone)]
pub struct StopwatchSettings {
    /// Initial tick count.
    pub ticks: u64,
    /// Whether the stopwatch starts out running.
    pub running: bool,
    /// Milliseconds per tick.
    pub resolution: NonZeroU64,
    /// Sink for announcements.
    pub announcer: Announcer,
}

impl Default for StopwatchSettings {
    fn default() -> Self {
        Self {
            ticks: 0,
            running: false,
            resolution: DEFAULT_RESOLUTION,
            announcer: silent_announcer(),
        }
    }
}

impl fmt::Debug for StopwatchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopwatchSettings")
            .field("ticks", &self.ticks)
            .field("running", &self.running)
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}
