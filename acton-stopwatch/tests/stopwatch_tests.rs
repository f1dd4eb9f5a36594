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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use acton_stopwatch::prelude::*;
use acton_stopwatch_test::prelude::*;
use tokio::time::sleep;

use crate::setup::{initialize_tracing, runtime, AnnouncementLog};
mod setup;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// A fresh stopwatch announces its initial state once, and the timer armed at start
/// while stopped produces no tick.
#[acton_stopwatch_test]
async fn test_start_announces_and_discards_first_tick() -> anyhow::Result<()> {
    initialize_tracing();
    let log = AnnouncementLog::default();
    let stopwatch = runtime()
        .new_stopwatch(StopwatchOptions::new().with_announcer(log.announcer()))
        .await?;

    assert_eq!(
        log.take(),
        [Announcement::Full {
            ticks: 0,
            resolution: 10,
            running: false,
            msec: 0
        }]
    );

    sleep(ms(55)).await;
    assert_eq!(stopwatch.time().await?, 0);
    assert!(log.take().is_empty());

    stopwatch.shutdown().await?;
    Ok(())
}

/// After five resolution intervals `time` reports 5 ticks, not 50 milliseconds.
#[acton_stopwatch_test]
async fn test_time_counts_ticks_not_milliseconds() -> anyhow::Result<()> {
    initialize_tracing();
    let stopwatch = runtime().new_stopwatch(StopwatchOptions::new()).await?;

    stopwatch.go().await?;
    sleep(ms(55)).await;

    assert_eq!(stopwatch.time().await?, 5);
    let snapshot = stopwatch.snapshot().await?;
    assert!(snapshot.running);
    assert_eq!(snapshot.msec(), 50);

    stopwatch.shutdown().await?;
    Ok(())
}

/// Ticks announce only `{ticks, msec}`, once per interval, in increasing order.
#[acton_stopwatch_test]
async fn test_ticks_are_announced_lightly() -> anyhow::Result<()> {
    initialize_tracing();
    let log = AnnouncementLog::default();
    let stopwatch = runtime()
        .new_stopwatch(
            StopwatchOptions::new()
                .with_resolution(25)
                .with_announcer(log.announcer()),
        )
        .await?;
    stopwatch.go().await?;
    sleep(ms(80)).await;
    stopwatch.stop().await?;
    stopwatch.time().await?;

    let announced = log.take();
    let ticks: Vec<_> = announced.iter().filter(|a| !a.is_full()).copied().collect();
    assert_eq!(
        ticks,
        [
            Announcement::Tick { ticks: 1, msec: 25 },
            Announcement::Tick { ticks: 2, msec: 50 },
            Announcement::Tick { ticks: 3, msec: 75 },
        ]
    );
    // start, go and stop
    assert_eq!(announced.iter().filter(|a| a.is_full()).count(), 3);

    stopwatch.shutdown().await?;
    Ok(())
}

/// `go` on a running stopwatch changes nothing but still announces.
#[acton_stopwatch_test]
async fn test_go_is_idempotent() -> anyhow::Result<()> {
    initialize_tracing();
    let log = AnnouncementLog::default();
    let stopwatch = runtime()
        .new_stopwatch(StopwatchOptions::new().with_announcer(log.announcer()))
        .await?;

    stopwatch.go().await?;
    sleep(ms(35)).await;
    log.take();

    stopwatch.go().await?;
    stopwatch.go().await?;
    sleep(ms(20)).await;

    // A second timer would have doubled the rate.
    assert_eq!(stopwatch.time().await?, 5);
    let full = log.take().into_iter().filter(Announcement::is_full).count();
    assert_eq!(full, 2);

    stopwatch.shutdown().await?;
    Ok(())
}

/// `stop` freezes the count; a later `go` resumes from it.
#[acton_stopwatch_test]
async fn test_stop_and_resume() -> anyhow::Result<()> {
    initialize_tracing();
    let stopwatch = runtime().new_stopwatch(StopwatchOptions::new()).await?;

    stopwatch.go().await?;
    sleep(ms(35)).await;
    stopwatch.stop().await?;
    sleep(ms(100)).await;
    assert_eq!(stopwatch.time().await?, 3);
    assert!(!stopwatch.snapshot().await?.running);

    stopwatch.go().await?;
    sleep(ms(25)).await;
    assert_eq!(stopwatch.time().await?, 5);

    stopwatch.shutdown().await?;
    Ok(())
}

/// `clear` zeroes the count but the stopwatch keeps ticking.
#[acton_stopwatch_test]
async fn test_clear_preserves_running() -> anyhow::Result<()> {
    initialize_tracing();
    let stopwatch = runtime().new_stopwatch(StopwatchOptions::new()).await?;

    stopwatch.go().await?;
    sleep(ms(35)).await;
    stopwatch.clear().await?;
    let cleared = stopwatch.snapshot().await?;
    assert_eq!(cleared.ticks, 0);
    assert!(cleared.running);

    sleep(ms(30)).await;
    assert_eq!(stopwatch.time().await?, 3);

    stopwatch.shutdown().await?;
    Ok(())
}

/// Options override the defaults, including starting out running.
#[acton_stopwatch_test]
async fn test_options_override_defaults() -> anyhow::Result<()> {
    initialize_tracing();
    let stopwatch = runtime()
        .new_stopwatch(StopwatchOptions::new().with_ticks(10).with_running(true))
        .await?;

    sleep(ms(25)).await;
    assert_eq!(stopwatch.time().await?, 12);

    stopwatch.shutdown().await?;
    Ok(())
}

/// The initializer runs exactly once, before the stopwatch's first announcement.
#[acton_stopwatch_test]
async fn test_initializer_runs_before_first_announcement() -> anyhow::Result<()> {
    initialize_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen_at_announce = Arc::new(AtomicUsize::new(usize::MAX));

    let init_calls = Arc::clone(&calls);
    let announce_calls = Arc::clone(&calls);
    let seen = Arc::clone(&seen_at_announce);
    let stopwatch = runtime()
        .new_stopwatch(
            StopwatchOptions::new()
                .with_initializer(move || {
                    init_calls.fetch_add(1, Ordering::SeqCst);
                })
                .with_announcer(move |_| {
                    let _ = seen.compare_exchange(
                        usize::MAX,
                        announce_calls.load(Ordering::SeqCst),
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                }),
        )
        .await?;

    stopwatch.go().await?;
    stopwatch.time().await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(seen_at_announce.load(Ordering::SeqCst), 1);

    stopwatch.shutdown().await?;
    Ok(())
}

/// A swapped announcer receives everything after the swap; the old one nothing.
#[acton_stopwatch_test]
async fn test_swap_announcer() -> anyhow::Result<()> {
    initialize_tracing();
    let first = AnnouncementLog::default();
    let second = AnnouncementLog::default();
    let stopwatch = runtime()
        .new_stopwatch(StopwatchOptions::new().with_announcer(first.announcer()))
        .await?;
    first.take();

    stopwatch.swap_announcer(second.announcer()).await?;
    stopwatch.clear().await?;
    stopwatch.time().await?;

    assert!(first.take().is_empty());
    assert_eq!(second.take().len(), 1);

    stopwatch.shutdown().await?;
    Ok(())
}

/// Once shut down, a stopwatch refuses commands and queries.
#[acton_stopwatch_test]
async fn test_commands_after_shutdown_fail() -> anyhow::Result<()> {
    initialize_tracing();
    let stopwatch = runtime().new_stopwatch(StopwatchOptions::new()).await?;
    stopwatch.go().await?;
    stopwatch.shutdown().await?;

    assert!(stopwatch.is_closed());
    assert!(matches!(
        stopwatch.go().await,
        Err(StopwatchError::MailboxClosed(_))
    ));
    assert!(stopwatch.time().await.is_err());
    // A second shutdown is harmless.
    stopwatch.shutdown().await?;
    Ok(())
}
