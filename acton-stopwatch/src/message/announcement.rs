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

use derive_new::new;
use serde::Serialize;

/// Observable state broadcast to the announcer.
///
/// Serialized untagged, so a `Full` announcement becomes the mapping
/// `{ticks, resolution, running, msec}` and a `Tick` announcement `{ticks, msec}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Announcement {
    /// Emitted on start, `go`, `stop`, `clear` and every effective hub change.
    Full {
        /// Elapsed ticks.
        ticks: u64,
        /// Milliseconds per tick.
        resolution: u64,
        /// Whether the stopwatch is ticking.
        running: bool,
        /// `ticks * resolution`.
        msec: u64,
    },
    /// Emitted by each periodic tick.
    Tick {
        /// Elapsed ticks.
        ticks: u64,
        /// `ticks * resolution`.
        msec: u64,
    },
}

impl Announcement {
    /// Elapsed ticks carried by either shape.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        match self {
            Self::Full { ticks, .. } | Self::Tick { ticks, .. } => *ticks,
        }
    }

    /// Elapsed milliseconds carried by either shape.
    #[must_use]
    pub const fn msec(&self) -> u64 {
        match self {
            Self::Full { msec, .. } | Self::Tick { msec, .. } => *msec,
        }
    }

    /// True for the full public-state shape.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full { .. })
    }
}

/// The public state of a stopwatch at one point in time.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StopwatchSnapshot {
    /// Elapsed ticks.
    pub ticks: u64,
    /// Milliseconds per tick.
    pub resolution: NonZeroU64,
    /// Whether the stopwatch is ticking.
    pub running: bool,
}

impl StopwatchSnapshot {
    /// Elapsed milliseconds, `ticks * resolution`.
    #[must_use]
    pub fn msec(&self) -> u64 {
        self.ticks.saturating_mul(self.resolution.get())
    }

    /// The full announcement for this state.
    #[must_use]
    pub fn announcement(&self) -> Announcement {
        Announcement::Full {
            ticks: self.ticks,
            resolution: self.resolution.get(),
            running: self.running,
            msec: self.msec(),
        }
    }
}

/// Acknowledgement returned once a batch of hub changes has been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ack;
