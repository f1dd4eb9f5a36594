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

use static_assertions::assert_impl_all;
use tokio::sync::oneshot;

use crate::common::Announcer;
use crate::message::{Ack, Change, StopwatchSnapshot, SystemSignal};
use crate::traits::TimerId;

/// Everything a stopwatch inbox carries: caller commands, hub batches, queries,
/// its own timer ticks and lifecycle signals.
pub(crate) enum Envelope {
    Go,
    Stop,
    Clear,
    Time(oneshot::Sender<u64>),
    Snapshot(oneshot::Sender<StopwatchSnapshot>),
    ApplyChanges(Vec<Change>, oneshot::Sender<Ack>),
    SwapAnnouncer(Announcer),
    Tick(TimerId),
    Signal(SystemSignal),
}

assert_impl_all!(Envelope: Send);

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Go => f.write_str("Go"),
            Self::Stop => f.write_str("Stop"),
            Self::Clear => f.write_str("Clear"),
            Self::Time(_) => f.write_str("Time"),
            Self::Snapshot(_) => f.write_str("Snapshot"),
            Self::ApplyChanges(changes, _) => f.debug_tuple("ApplyChanges").field(changes).finish(),
            Self::SwapAnnouncer(_) => f.write_str("SwapAnnouncer"),
            Self::Tick(id) => f.debug_tuple("Tick").field(id).finish(),
            Self::Signal(signal) => f.debug_tuple("Signal").field(signal).finish(),
        }
    }
}
