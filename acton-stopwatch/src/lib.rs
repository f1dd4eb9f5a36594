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

#![forbid(unsafe_code)]
#![forbid(missing_docs)]

//! # Acton Stopwatch
//!
//! A timer-driven counting agent on Tokio. A stopwatch counts *ticks*, each worth
//! `resolution` milliseconds, and exposes two ways to drive it:
//!
//! - **Commands**: `go`, `stop`, `clear` and `time` on a [`StopwatchHandle`](prelude::StopwatchHandle).
//! - **Hub changes**: an ordered list of `(key, value)` pairs applied with
//!   `apply_changes`, so a supervising component can drive the stopwatch through the
//!   same generic interface it uses for everything else.
//!
//! Every state-affecting transition is *announced* to a caller-supplied callback:
//! a full `{ticks, resolution, running, msec}` snapshot for commands and hub
//! changes, and a light `{ticks, msec}` snapshot for each tick.
//!
//! ## Key Concepts
//!
//! - **State machine (`Stopwatch`)**: owns the tick count, resolution, running flag
//!   and the id of its single outstanding timer.
//! - **Timer seam (`TickTimer`)**: arms and cancels one-shot timers. Ticks carry the
//!   id of the timer that produced them, so a tick that raced with a `stop` or a
//!   resolution change is recognized and dropped.
//! - **Handles (`StopwatchHandle`)**: clonable references that queue messages on the
//!   stopwatch's inbox. One message is handled at a time.
//! - **Runtime (`StopwatchRuntime`)**: creates stopwatches under unique ids and shuts
//!   them down.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acton_stopwatch::prelude::*;
//!
//! let runtime = StopwatchApp::launch();
//! let stopwatch = runtime
//!     .new_stopwatch(StopwatchOptions::new().with_announcer(|a| println!("{a:?}")))
//!     .await?;
//! stopwatch.go().await?;
//! tokio::time::sleep(std::time::Duration::from_millis(100)).await;
//! let ticks = stopwatch.time().await?;
//! stopwatch.apply_changes([("resolution", 20)]).await?;
//! runtime.shutdown_all().await?;
//! ```

/// Runtime plumbing: configuration, handles, the runtime and timer implementations.
pub(crate) mod common;

/// The stopwatch state machine and its message loop.
pub(crate) mod actor;

/// Messages, hub changes and announcement shapes.
pub(crate) mod message;

/// Traits at the seams of the stopwatch.
pub(crate) mod traits;

/// Configuration types and the lazily loaded global configuration.
pub mod config {
    pub use crate::common::config::{
        DefaultsConfig, LimitsConfig, StopwatchConfig, TimeoutConfig, CONFIG,
        DEFAULT_RESOLUTION, DEFAULT_RESOLUTION_MS,
    };
}

/// A prelude module for conveniently importing the most commonly used items.
///
/// ## External Crates
/// *   [`acton_ern::Ern`](https://docs.rs/acton-ern): the id type of every stopwatch.
///
/// ## Core Types
/// *   [`crate::actor::Stopwatch`]: The stopwatch state machine.
/// *   [`crate::actor::StopwatchOptions`]: Creation options merged over defaults.
/// *   [`crate::actor::StopwatchSettings`]: Fully merged starting state.
/// *   [`crate::common::StopwatchApp`]: Entry point that loads configuration.
/// *   [`crate::common::StopwatchRuntime`]: Creates and tracks stopwatches.
/// *   [`crate::common::StopwatchHandle`]: Handle for commanding one stopwatch.
/// *   [`crate::common::ManualTickTimer`]: Timer that only fires when told to.
/// *   [`crate::message::Announcement`]: The two announced shapes.
/// *   [`crate::message::Change`] / [`crate::message::ChangeValue`]: Hub changes.
/// *   [`crate::traits::TickTimer`]: The timer seam.
pub mod prelude {
    pub use acton_ern::Ern;

    pub use crate::actor::{Stopwatch, StopwatchOptions, StopwatchSettings};
    pub use crate::common::{
        silent_announcer, Announcer, Initializer, ManualTickTimer, StopwatchApp,
        StopwatchConfig, StopwatchHandle, StopwatchRuntime,
    };
    pub use crate::message::{
        Ack, Announcement, Change, ChangeValue, StopwatchError, StopwatchSnapshot, SystemSignal,
        TimerError,
    };
    pub use crate::traits::{TickTimer, TimerId};
}
