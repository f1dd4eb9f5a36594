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
#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use acton_stopwatch::prelude::*;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Ensures tracing initialization happens only once across all tests.
static INIT: Once = Once::new();

/// Installs a global tracing subscriber writing to `logs/stopwatch_tests.txt`.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        std::fs::create_dir_all("logs").expect("could not create logs dir");

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "stopwatch_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Leak the guard so the non-blocking writer outlives every test.
        Box::leak(Box::new(guard));

        let filter = EnvFilter::new("info")
            .add_directive("acton_stopwatch=trace".parse().unwrap())
            .add_directive("stopwatch_tests=trace".parse().unwrap())
            .add_directive("hub_tests=trace".parse().unwrap())
            .add_directive("runtime_tests=trace".parse().unwrap());

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .with_max_level(Level::TRACE)
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    });
}

/// Collects every announcement a stopwatch makes.
#[derive(Clone, Default)]
pub struct AnnouncementLog(Arc<Mutex<Vec<Announcement>>>);

impl AnnouncementLog {
    pub fn announcer(&self) -> impl Fn(&Announcement) + Send + Sync + 'static {
        let log = Arc::clone(&self.0);
        move |announcement: &Announcement| log.lock().unwrap().push(*announcement)
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<Announcement> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// A runtime with default configuration that ignores any config file on the machine.
pub fn runtime() -> StopwatchRuntime {
    StopwatchApp::launch_with_config(StopwatchConfig::default())
}
