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

use std::collections::BTreeMap;
use std::time::Duration;

use crate::message::TimerError;
use crate::traits::{TickTimer, TimerId};

/// A [`TickTimer`] that never fires on its own.
///
/// It only records which timers are armed, letting a caller drive a
/// [`Stopwatch`](crate::prelude::Stopwatch) one tick at a time and inspect how many
/// timers are outstanding after every transition.
#[derive(Debug, Default, Clone)]
pub struct ManualTickTimer {
    live: BTreeMap<TimerId, Duration>,
    next_id: u64,
    armed_total: usize,
}

impl ManualTickTimer {
    /// Creates a timer with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers armed and neither cancelled nor expired.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Number of timers armed over this timer's lifetime.
    #[must_use]
    pub fn armed_total(&self) -> usize {
        self.armed_total
    }

    /// The most recently armed timer that is still live, with its delay.
    #[must_use]
    pub fn latest(&self) -> Option<(TimerId, Duration)> {
        self.live.iter().next_back().map(|(id, after)| (*id, *after))
    }
}

impl TickTimer for ManualTickTimer {
    fn arm(&mut self, after: Duration) -> TimerId {
        self.next_id += 1;
        self.armed_total += 1;
        let id = TimerId(self.next_id);
        self.live.insert(id, after);
        id
    }

    fn cancel(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.live
            .remove(&id)
            .map(|_| ())
            .ok_or(TimerError::NotOutstanding(id))
    }

    fn expired(&mut self, id: TimerId) {
        self.live.remove(&id);
    }
}
