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

use std::collections::HashSet;
use std::time::Duration;

use acton_stopwatch::prelude::*;
use acton_stopwatch_test::prelude::*;
use tokio::time::sleep;

use crate::setup::{initialize_tracing, runtime};
mod setup;

/// Stopwatches sharing a base name still get distinct ids and independent state.
#[acton_stopwatch_test]
async fn test_independent_instances() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = runtime();
    let first = runtime
        .new_stopwatch(StopwatchOptions::new().with_name("lap"))
        .await?;
    let second = runtime
        .new_stopwatch(StopwatchOptions::new().with_name("lap"))
        .await?;

    assert_ne!(first.id(), second.id());
    assert_ne!(first, second);
    assert_eq!(runtime.stopwatch_count(), 2);

    first.go().await?;
    sleep(Duration::from_millis(35)).await;
    assert_eq!(first.time().await?, 3);
    assert_eq!(second.time().await?, 0);

    runtime.shutdown_all().await?;
    Ok(())
}

/// Handles can be found by id, cloned, and removed from the registry.
#[acton_stopwatch_test]
async fn test_lookup_and_remove() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = runtime();
    let handle = runtime.new_stopwatch(StopwatchOptions::new()).await?;
    let id = handle.id();

    let found = runtime.stopwatch(&id).expect("registered stopwatch");
    assert_eq!(found, handle);
    found.clear().await?;
    assert_eq!(handle.time().await?, 0);

    let mut set = HashSet::new();
    set.insert(handle.clone());
    set.insert(found);
    assert_eq!(set.len(), 1);

    let removed = runtime.remove(&id).expect("removed stopwatch");
    assert!(runtime.stopwatch(&id).is_none());
    assert_eq!(runtime.stopwatch_count(), 0);

    removed.shutdown().await?;
    Ok(())
}

/// The default base name comes from configuration.
#[acton_stopwatch_test]
async fn test_default_name_from_config() -> anyhow::Result<()> {
    initialize_tracing();
    let mut config = StopwatchConfig::default();
    config.defaults.stopwatch_name = "kitchen".to_string();
    let runtime = StopwatchApp::launch_with_config(config);

    let handle = runtime.new_stopwatch(StopwatchOptions::new()).await?;
    assert!(handle.name().starts_with("kitchen"));

    runtime.shutdown_all().await?;
    Ok(())
}

/// `shutdown_all` stops every stopwatch and empties the registry.
#[acton_stopwatch_test]
async fn test_shutdown_all() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = runtime();
    let mut handles = Vec::new();
    for _ in 0..3 {
        let handle = runtime
            .new_stopwatch(StopwatchOptions::new().with_running(true))
            .await?;
        handles.push(handle);
    }
    sleep(Duration::from_millis(15)).await;

    runtime.shutdown_all().await?;

    assert_eq!(runtime.stopwatch_count(), 0);
    for handle in handles {
        assert!(handle.is_closed());
        assert!(matches!(
            handle.go().await,
            Err(StopwatchError::MailboxClosed(_))
        ));
    }
    Ok(())
}
