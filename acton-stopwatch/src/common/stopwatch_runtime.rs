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

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use acton_ern::Ern;
use dashmap::DashMap;
use futures::future::join_all;
use tracing::{error, instrument, trace};

use crate::actor::StopwatchOptions;
use crate::common::config::CONFIG;
use crate::common::{StopwatchConfig, StopwatchHandle};
use crate::message::StopwatchError;

/// Creates stopwatches and keeps track of the ones it created.
///
/// Each stopwatch gets an id of the form `<name>-<sequence>`, unique within the
/// runtime, so any number of independent stopwatches can share a base name.
/// Cloning the runtime shares its registry.
#[derive(Debug, Clone)]
pub struct StopwatchRuntime {
    roster: Arc<DashMap<Ern, StopwatchHandle>>,
    sequence: Arc<AtomicU64>,
    config: StopwatchConfig,
}

impl Default for StopwatchRuntime {
    fn default() -> Self {
        Self::with_config(CONFIG.clone())
    }
}

impl StopwatchRuntime {
    pub(crate) fn with_config(config: StopwatchConfig) -> Self {
        Self {
            roster: Arc::default(),
            sequence: Arc::default(),
            config,
        }
    }

    /// The configuration new stopwatches are created with.
    #[must_use]
    pub const fn config(&self) -> &StopwatchConfig {
        &self.config
    }

    /// Creates and starts a stopwatch.
    ///
    /// Options are merged over the configured defaults, the initializer (if any) runs,
    /// the stopwatch announces its initial state and arms its first timer, and its
    /// handle is registered.
    ///
    /// # Errors
    ///
    /// [`StopwatchError::InvalidName`] if the base name cannot form an `Ern`.
    #[instrument(skip(self))]
    pub async fn new_stopwatch(
        &self,
        options: StopwatchOptions,
    ) -> Result<StopwatchHandle, StopwatchError> {
        let (name, initializer, settings) = options.resolve(&self.config);
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = Ern::with_root(format!("{name}-{sequence}")).map_err(|e| {
            StopwatchError::InvalidName {
                name: name.clone(),
                reason: e.to_string(),
            }
        })?;

        if let Some(initializer) = initializer {
            trace!(%id, "running initializer");
            initializer();
        }

        let handle = StopwatchHandle::spawn(id.clone(), settings, &self.config);
        trace!(%id, "registering stopwatch");
        self.roster.insert(id, handle.clone());
        Ok(handle)
    }

    /// Looks up a stopwatch created by this runtime.
    #[must_use]
    pub fn stopwatch(&self, id: &Ern) -> Option<StopwatchHandle> {
        self.roster.get(id).map(|entry| entry.value().clone())
    }

    /// Number of registered stopwatches.
    #[inline]
    #[must_use]
    pub fn stopwatch_count(&self) -> usize {
        self.roster.len()
    }

    /// Forgets a stopwatch without stopping it.
    pub fn remove(&self, id: &Ern) -> Option<StopwatchHandle> {
        self.roster.remove(id).map(|(_, handle)| handle)
    }

    /// Shuts down every registered stopwatch concurrently and empties the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the stopwatches do not all finish within the configured
    /// system shutdown timeout.
    #[instrument(skip(self))]
    pub async fn shutdown_all(&self) -> anyhow::Result<()> {
        let handles: Vec<StopwatchHandle> = self
            .roster
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        self.roster.clear();

        trace!("Sending Terminate signal to {} stopwatches", handles.len());
        let stop_futures = handles.iter().map(|handle| async move {
            if let Err(e) = handle.shutdown().await {
                error!("Error stopping stopwatch {}: {}", handle.id(), e);
            }
        });

        let timeout = self.config.system_shutdown_timeout();
        if tokio::time::timeout(timeout, join_all(stop_futures))
            .await
            .is_err()
        {
            error!(
                "System-wide shutdown timeout expired after {} ms",
                timeout.as_millis()
            );
            return Err(anyhow::anyhow!(
                "Timeout while waiting for stopwatches to shut down after {} ms",
                timeout.as_millis()
            ));
        }
        trace!("All stopwatches shut down.");
        Ok(())
    }
}
