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

use acton_ern::Ern;
use tokio::sync::mpsc::Receiver;
use tracing::{instrument, trace};

use crate::actor::Stopwatch;
use crate::common::TokioTickTimer;
use crate::message::{Envelope, SystemSignal};

/// A running stopwatch: its state machine plus the inbox feeding it.
///
/// `wake` handles exactly one envelope at a time, so the state machine needs no locks.
pub(crate) struct ManagedStopwatch {
    id: Ern,
    inbox: Receiver<Envelope>,
    stopwatch: Stopwatch<TokioTickTimer>,
}

impl ManagedStopwatch {
    pub(crate) fn new(id: Ern, inbox: Receiver<Envelope>, stopwatch: Stopwatch<TokioTickTimer>) -> Self {
        Self {
            id,
            inbox,
            stopwatch,
        }
    }

    #[instrument(skip(self), fields(id = %self.id))]
    pub(crate) async fn wake(mut self) {
        while let Some(envelope) = self.inbox.recv().await {
            trace!(?envelope, "received envelope");
            match envelope {
                Envelope::Go => self.stopwatch.go(),
                Envelope::Stop => self.stopwatch.stop(),
                Envelope::Clear => self.stopwatch.clear(),
                Envelope::Time(reply) => {
                    if reply.send(self.stopwatch.time()).is_err() {
                        trace!("caller stopped waiting for time");
                    }
                }
                Envelope::Snapshot(reply) => {
                    if reply.send(self.stopwatch.snapshot()).is_err() {
                        trace!("caller stopped waiting for snapshot");
                    }
                }
                Envelope::ApplyChanges(changes, ack) => {
                    let applied = self.stopwatch.apply_changes(changes);
                    if ack.send(applied).is_err() {
                        trace!("hub stopped waiting for acknowledgement");
                    }
                }
                Envelope::SwapAnnouncer(announcer) => self.stopwatch.set_announcer(announcer),
                Envelope::Tick(id) => self.stopwatch.on_tick(id),
                Envelope::Signal(SystemSignal::Terminate) => {
                    trace!("terminate received, closing inbox");
                    // Queued envelopes are still drained before the loop ends.
                    self.inbox.close();
                }
            }
        }
        self.stopwatch.halt();
        trace!(snapshot = ?self.stopwatch.snapshot(), "stopwatch stopped");
    }
}
