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
use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::actor::StopwatchSettings;
use crate::common::Announcer;
use crate::message::{Ack, Announcement, Change, StopwatchSnapshot};
use crate::traits::{TickTimer, TimerId};

/// The stopwatch state machine.
///
/// `Stopwatch` owns the tick count, the resolution, the running flag, the id of its
/// one outstanding timer and the announcer. It knows nothing about mailboxes: the
/// message loop in [`StopwatchHandle`](crate::prelude::StopwatchHandle) feeds it one
/// command or tick at a time, and tests can drive it directly over a
/// [`ManualTickTimer`](crate::prelude::ManualTickTimer).
///
/// Invariant: at most one timer is outstanding, and outside of the start-up timer a
/// timer is outstanding only while `running` is true.
pub struct Stopwatch<T: TickTimer> {
    ticks: u64,
    resolution: NonZeroU64,
    running: bool,
    timer_handle: Option<TimerId>,
    timer: T,
    announcer: Announcer,
}

impl<T: TickTimer> fmt::Debug for Stopwatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("ticks", &self.ticks)
            .field("resolution", &self.resolution)
            .field("running", &self.running)
            .field("timer_handle", &self.timer_handle)
            .finish_non_exhaustive()
    }
}

impl<T: TickTimer> Stopwatch<T> {
    /// Builds a stopwatch from merged settings, announces the initial state and arms
    /// the first timer.
    ///
    /// The first timer is armed even when `settings.running` is false. Its tick is
    /// then discarded on delivery, so the only effect is one wasted wake-up.
    pub fn start(settings: StopwatchSettings, timer: T) -> Self {
        let mut stopwatch = Self {
            ticks: settings.ticks,
            resolution: settings.resolution,
            running: settings.running,
            timer_handle: None,
            timer,
            announcer: settings.announcer,
        };
        trace!(?stopwatch, "starting stopwatch");
        stopwatch.announce_full();
        stopwatch.arm_timer();
        stopwatch
    }

    /// Starts ticking. Announces the full state whether or not it was already running.
    #[instrument(skip(self), fields(ticks = self.ticks, running = self.running))]
    pub fn go(&mut self) {
        if !self.running {
            self.start_ticking();
        }
        self.announce_full();
    }

    /// Stops ticking. Announces the full state whether or not it was running.
    #[instrument(skip(self), fields(ticks = self.ticks, running = self.running))]
    pub fn stop(&mut self) {
        self.stop_ticking();
        self.announce_full();
    }

    /// Resets the tick count to zero without touching `running`, then announces.
    #[instrument(skip(self), fields(ticks = self.ticks, running = self.running))]
    pub fn clear(&mut self) {
        self.ticks = 0;
        self.announce_full();
    }

    /// Elapsed ticks. This is a count of resolution units, not milliseconds.
    #[must_use]
    pub const fn time(&self) -> u64 {
        self.ticks
    }

    /// Milliseconds per tick.
    #[must_use]
    pub const fn resolution(&self) -> NonZeroU64 {
        self.resolution
    }

    /// Whether the stopwatch is ticking.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The public state.
    #[must_use]
    pub fn snapshot(&self) -> StopwatchSnapshot {
        StopwatchSnapshot::new(self.ticks, self.resolution, self.running)
    }

    /// The id of the outstanding timer, if any.
    #[must_use]
    pub const fn current_timer(&self) -> Option<TimerId> {
        self.timer_handle
    }

    /// The timer this stopwatch schedules its ticks on.
    #[must_use]
    pub const fn timer(&self) -> &T {
        &self.timer
    }

    /// Replaces the announcer. The new one receives every announcement from here on.
    pub fn set_announcer(&mut self, announcer: Announcer) {
        self.announcer = announcer;
    }

    /// Applies hub changes left to right and acknowledges once all are applied.
    pub fn apply_changes<I>(&mut self, changes: I) -> Ack
    where
        I: IntoIterator<Item = Change>,
    {
        for change in changes {
            self.apply_change(change);
        }
        Ack
    }

    /// Applies one hub change.
    ///
    /// Unlike the plain commands, a change announces only when it actually
    /// transitions the state. `ticks = 0` always counts as a transition.
    #[instrument(skip(self), fields(ticks = self.ticks, running = self.running))]
    pub fn apply_change(&mut self, change: Change) {
        match change {
            Change::Running(true) => {
                if !self.running {
                    self.start_ticking();
                    self.announce_full();
                }
            }
            Change::Running(false) => {
                if self.running {
                    self.stop_ticking();
                    self.announce_full();
                } else {
                    self.cancel_timer();
                }
            }
            Change::ResetTicks => {
                self.ticks = 0;
                self.announce_full();
            }
            Change::Resolution(resolution) => {
                let elapsed_ms = self.elapsed_ms();
                self.cancel_timer();
                self.resolution = resolution;
                self.ticks = elapsed_ms / resolution.get();
                if self.running {
                    self.arm_timer();
                }
                trace!(elapsed_ms, ticks = self.ticks, "resolution changed");
                self.announce_full();
            }
            Change::Ignored { key, value } => {
                debug!(%key, %value, "ignoring unrecognized change");
            }
        }
    }

    /// Handles a tick delivered by the timer `id`.
    ///
    /// Only a tick from the outstanding timer of a running stopwatch counts. Any other
    /// tick raced with a `stop` or a resolution change and is dropped.
    #[instrument(skip(self), fields(ticks = self.ticks, running = self.running))]
    pub fn on_tick(&mut self, id: TimerId) {
        self.timer.expired(id);
        if self.timer_handle != Some(id) {
            debug!(%id, current = ?self.timer_handle, "discarding tick from a cancelled timer");
            return;
        }
        self.timer_handle = None;
        if !self.running {
            debug!(%id, "discarding tick while stopped");
            return;
        }
        self.arm_timer();
        self.ticks = self.ticks.saturating_add(1);
        self.announce_tick();
    }

    /// Cancels the outstanding timer, if any. Used when the stopwatch goes away.
    pub(crate) fn halt(&mut self) {
        self.cancel_timer();
    }

    fn elapsed_ms(&self) -> u64 {
        self.ticks.saturating_mul(self.resolution.get())
    }

    fn start_ticking(&mut self) {
        self.cancel_timer();
        self.arm_timer();
        self.running = true;
    }

    fn stop_ticking(&mut self) {
        self.cancel_timer();
        self.running = false;
    }

    fn arm_timer(&mut self) {
        debug_assert!(
            self.timer_handle.is_none(),
            "arming a timer while {:?} is outstanding",
            self.timer_handle
        );
        let id = self.timer.arm(Duration::from_millis(self.resolution.get()));
        trace!(%id, resolution = self.resolution.get(), "timer armed");
        self.timer_handle = Some(id);
    }

    fn cancel_timer(&mut self) {
        if let Some(id) = self.timer_handle.take() {
            if let Err(e) = self.timer.cancel(id) {
                panic!("stopwatch timer cancellation failed, a second timer could be outstanding: {e}");
            }
        }
    }

    fn announce_full(&self) {
        let announcement = self.snapshot().announcement();
        trace!(?announcement, "announcing");
        (self.announcer)(&announcement);
    }

    fn announce_tick(&self) {
        let announcement = Announcement::Tick {
            ticks: self.ticks,
            msec: self.elapsed_ms(),
        };
        (self.announcer)(&announcement);
    }
}
