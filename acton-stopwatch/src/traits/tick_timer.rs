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
use std::time::Duration;

use crate::message::TimerError;

/// Identifies one armed timer.
///
/// Ids are handed out in increasing order by a [`TickTimer`] and are carried by the
/// tick the timer delivers, so the stopwatch can tell a tick from its current timer
/// apart from one that was already in flight when that timer was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Scheduling seam between the stopwatch state machine and a clock.
///
/// An implementation arms one-shot timers that each deliver a single tick carrying
/// their [`TimerId`] back to the owning stopwatch. The stopwatch never holds more
/// than one armed id at a time and always cancels before re-arming.
pub trait TickTimer: Send + 'static {
    /// Schedules one tick to be delivered after `after` and returns its id.
    fn arm(&mut self, after: Duration) -> TimerId;

    /// Cancels a timer previously returned by [`arm`](TickTimer::arm).
    ///
    /// Cancellation is best-effort: a tick that already left the timer may still be
    /// delivered and must be discarded by the receiver.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::NotOutstanding`] if `id` is not a timer this
    /// implementation is tracking.
    fn cancel(&mut self, id: TimerId) -> Result<(), TimerError>;

    /// Informs the timer that the tick for `id` was delivered and it no longer
    /// needs to be tracked. Unknown ids are ignored.
    fn expired(&mut self, id: TimerId);
}
