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

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::WeakSender;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::message::{Envelope, TimerError};
use crate::traits::{TickTimer, TimerId};

/// [`TickTimer`] backed by Tokio's timer wheel.
///
/// Every armed timer is a task on the stopwatch's [`TaskTracker`] that waits for its
/// deadline or its cancellation token, whichever comes first. On expiry it posts
/// [`Envelope::Tick`] to the stopwatch inbox through a weak sender, so pending timers
/// never keep an otherwise abandoned stopwatch alive.
#[derive(Debug)]
pub struct TokioTickTimer {
    outbox: WeakSender<Envelope>,
    tracker: TaskTracker,
    pending: HashMap<TimerId, CancellationToken>,
    next_id: u64,
}

impl TokioTickTimer {
    pub(crate) fn new(outbox: WeakSender<Envelope>, tracker: TaskTracker) -> Self {
        Self {
            outbox,
            tracker,
            pending: HashMap::new(),
            next_id: 0,
        }
    }
}

impl TickTimer for TokioTickTimer {
    #[instrument(skip(self))]
    fn arm(&mut self, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = Instant::now() + after;
        let token = CancellationToken::new();
        self.pending.insert(id, token.clone());

        let outbox = self.outbox.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    trace!(%id, "timer cancelled before expiry");
                }
                () = tokio::time::sleep_until(deadline) => {
                    let Some(outbox) = outbox.upgrade() else {
                        trace!(%id, "stopwatch gone, dropping tick");
                        return;
                    };
                    if outbox.send(Envelope::Tick(id)).await.is_err() {
                        trace!(%id, "inbox closed, dropping tick");
                    }
                }
            }
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> Result<(), TimerError> {
        let token = self
            .pending
            .remove(&id)
            .ok_or(TimerError::NotOutstanding(id))?;
        token.cancel();
        trace!(%id, "timer cancelled");
        Ok(())
    }

    fn expired(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}

impl Drop for TokioTickTimer {
    fn drop(&mut self) {
        for (_, token) in self.pending.drain() {
            token.cancel();
        }
    }
}
