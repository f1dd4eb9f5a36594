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

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use acton_ern::Ern;
use tokio::sync::{mpsc, oneshot};
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::actor::{ManagedStopwatch, Stopwatch, StopwatchSettings};
use crate::common::{Announcer, StopwatchConfig, StopwatchSender, TokioTickTimer};
use crate::message::{
    Ack, Announcement, Change, ChangeValue, Envelope, StopwatchError, StopwatchSnapshot,
    SystemSignal,
};

/// A clonable handle for talking to one stopwatch.
///
/// Handles are the only way to reach a stopwatch; there is no global name. Every
/// clone addresses the same stopwatch, identified by its [`Ern`].
///
/// `go`, `stop` and `clear` are fire-and-forget: they return once the command is
/// queued. `time`, `snapshot` and `apply_changes` wait for the stopwatch to answer,
/// which also means every command queued before them has been handled.
#[derive(Debug, Clone)]
pub struct StopwatchHandle {
    pub(crate) id: Ern,
    outbox: StopwatchSender,
    tracker: TaskTracker,
    shutdown_timeout: Duration,
}

impl PartialEq for StopwatchHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StopwatchHandle {}

impl Hash for StopwatchHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl StopwatchHandle {
    /// Starts a stopwatch from merged settings and spawns its message loop.
    ///
    /// The initial full announcement and the first timer happen here, before the
    /// handle is returned, so the stopwatch is ready for commands immediately.
    pub(crate) fn spawn(id: Ern, settings: StopwatchSettings, config: &StopwatchConfig) -> Self {
        let (outbox, inbox) = mpsc::channel(config.inbox_capacity());
        let tracker = TaskTracker::new();
        let timer = TokioTickTimer::new(outbox.downgrade(), tracker.clone());
        let stopwatch = Stopwatch::start(settings, timer);

        trace!(%id, "spawning stopwatch message loop");
        tracker.spawn(ManagedStopwatch::new(id.clone(), inbox, stopwatch).wake());
        tracker.close();

        Self {
            id,
            outbox,
            tracker,
            shutdown_timeout: config.stopwatch_shutdown_timeout(),
        }
    }

    /// The stopwatch's unique id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Ern {
        self.id.clone()
    }

    /// The root segment of the stopwatch's id.
    #[inline]
    #[must_use]
    pub fn name(&self) -> String {
        self.id.root.to_string()
    }

    /// True once the stopwatch has stopped accepting messages.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.outbox.is_closed()
    }

    /// Starts ticking.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] if the stopwatch has shut down.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn go(&self) -> Result<(), StopwatchError> {
        self.post(Envelope::Go).await
    }

    /// Stops ticking.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] if the stopwatch has shut down.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn stop(&self) -> Result<(), StopwatchError> {
        self.post(Envelope::Stop).await
    }

    /// Resets the tick count to zero, leaving the running state alone.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] if the stopwatch has shut down.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn clear(&self) -> Result<(), StopwatchError> {
        self.post(Envelope::Clear).await
    }

    /// Elapsed ticks (not milliseconds).
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] or [`StopwatchError::NoReply`] if the
    /// stopwatch has shut down.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn time(&self) -> Result<u64, StopwatchError> {
        self.ask(Envelope::Time).await
    }

    /// The public state: ticks, resolution and running.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] or [`StopwatchError::NoReply`] if the
    /// stopwatch has shut down.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn snapshot(&self) -> Result<StopwatchSnapshot, StopwatchError> {
        self.ask(Envelope::Snapshot).await
    }

    /// Applies raw `(key, value)` changes from a hub, left to right.
    ///
    /// Recognized keys are `running`, `ticks` (only `0`) and `resolution` (a positive
    /// number of milliseconds). Anything else is accepted and ignored.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] or [`StopwatchError::NoReply`] if the
    /// stopwatch has shut down.
    pub async fn apply_changes<I, K, V>(&self, changes: I) -> Result<Ack, StopwatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ChangeValue>,
    {
        let changes = changes
            .into_iter()
            .map(|(key, value)| Change::from_pair(key, value))
            .collect();
        self.apply(changes).await
    }

    /// Applies already sorted changes, left to right.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] or [`StopwatchError::NoReply`] if the
    /// stopwatch has shut down.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn apply(&self, changes: Vec<Change>) -> Result<Ack, StopwatchError> {
        self.ask(|ack| Envelope::ApplyChanges(changes, ack)).await
    }

    /// Replaces the announcer for all later announcements.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::MailboxClosed`] if the stopwatch has shut down.
    pub async fn swap_announcer<F>(&self, announcer: F) -> Result<(), StopwatchError>
    where
        F: Fn(&Announcement) + Send + Sync + 'static,
    {
        let announcer: Announcer = Arc::new(announcer);
        self.post(Envelope::SwapAnnouncer(announcer)).await
    }

    /// Shuts the stopwatch down and waits for its message loop and timers to finish.
    ///
    /// Commands already queued are handled first. Shutting down a stopwatch that has
    /// already stopped is not an error.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::ShutdownTimeout`] if the stopwatch does not finish within the
    /// configured per-stopwatch shutdown timeout.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn shutdown(&self) -> Result<(), StopwatchError> {
        if self
            .outbox
            .send(Envelope::Signal(SystemSignal::Terminate))
            .await
            .is_err()
        {
            trace!("stopwatch inbox already closed");
        }

        tokio::time::timeout(self.shutdown_timeout, self.tracker.wait())
            .await
            .map_err(|_| StopwatchError::ShutdownTimeout {
                id: self.id.to_string(),
                timeout_ms: u64::try_from(self.shutdown_timeout.as_millis()).unwrap_or(u64::MAX),
            })?;
        trace!("stopwatch shut down");
        Ok(())
    }

    async fn post(&self, envelope: Envelope) -> Result<(), StopwatchError> {
        self.outbox
            .send(envelope)
            .await
            .map_err(|_| StopwatchError::MailboxClosed(self.id.to_string()))
    }

    async fn ask<R>(
        &self,
        envelope: impl FnOnce(oneshot::Sender<R>) -> Envelope,
    ) -> Result<R, StopwatchError> {
        let (reply, answer) = oneshot::channel();
        self.post(envelope(reply)).await?;
        answer
            .await
            .map_err(|_| StopwatchError::NoReply(self.id.to_string()))
    }
}
