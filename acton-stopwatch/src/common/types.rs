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

//! Type aliases shared across the crate.

use std::sync::Arc;

use tokio::sync::mpsc::Sender;

use crate::message::{Announcement, Envelope};

/// Sink for stopwatch announcements.
///
/// Called inline by the stopwatch on every state-affecting transition, so a slow
/// announcer stalls that stopwatch's inbox. Announcers that do real work should hand
/// the announcement off (for example over a channel) and return.
pub type Announcer = Arc<dyn Fn(&Announcement) + Send + Sync + 'static>;

/// Side effect run once while a stopwatch is being created, before its state is
/// finalized. Typically used to register the new stopwatch somewhere.
pub type Initializer = Box<dyn FnOnce() + Send + 'static>;

/// Crate-internal: sender half of a stopwatch inbox.
pub(crate) type StopwatchSender = Sender<Envelope>;

/// An announcer that discards every announcement.
#[must_use]
pub fn silent_announcer() -> Announcer {
    Arc::new(|_: &Announcement| {})
}
