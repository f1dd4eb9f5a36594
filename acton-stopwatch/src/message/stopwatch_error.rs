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

use thiserror::Error;

use crate::traits::TimerId;

/// Errors surfaced by [`StopwatchHandle`](crate::prelude::StopwatchHandle) and
/// [`StopwatchRuntime`](crate::prelude::StopwatchRuntime).
///
/// Unrecognized hub changes and redundant commands are never errors; they are
/// accepted and ignored by the stopwatch itself.
#[derive(Debug, Error)]
pub enum StopwatchError {
    /// The stopwatch has shut down and no longer accepts messages.
    #[error("stopwatch {0} is no longer accepting messages")]
    MailboxClosed(String),
    /// The stopwatch went away before answering a query.
    #[error("stopwatch {0} dropped the reply channel")]
    NoReply(String),
    /// A stopwatch name could not be turned into an `Ern`.
    #[error("invalid stopwatch name `{name}`: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The stopwatch did not finish within the configured shutdown timeout.
    #[error("stopwatch {id} did not shut down within {timeout_ms} ms")]
    ShutdownTimeout {
        /// Stopwatch id.
        id: String,
        /// The timeout that expired.
        timeout_ms: u64,
    },
}

/// Failure reported by a [`TickTimer`](crate::traits::TickTimer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The timer being cancelled is not one the implementation is tracking.
    #[error("{0} is not an outstanding timer")]
    NotOutstanding(TimerId),
}
