//! Chart session state and the reload path that feeds it.
//!
//! [`ChartState`] is an immutable snapshot: every user action produces a new
//! snapshot instead of mutating the old one. [`SeriesStore`] owns the current
//! snapshot and the fetch collaborator.
//!
//! # Reload ordering
//!
//! Each request takes a generation number before it awaits the backend. A
//! response is applied only if its generation is newer than the snapshot's, so
//! a slow response can never overwrite a faster, later one.
//!
//! Requests are built from the last *requested* selection and window, not the
//! last loaded one. Both are updated before the fetch starts, so an action
//! issued while another is still in flight carries the earlier change along.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};

use crate::backend::TemperatureSource;
use crate::chart::model::{DeviceSelection, Series, TimeWindow, WindowPreset};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    series: Vec<Series>,
    window: TimeWindow,
    selection: DeviceSelection,
    toggles: Vec<bool>,
    generation: u64,
}

impl ChartState {
    /// Empty state that has not been loaded yet.
    #[must_use]
    pub fn new(selection: DeviceSelection, window: TimeWindow) -> Self {
        Self {
            series: Vec::new(),
            window,
            selection,
            toggles: Vec::new(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn selection(&self) -> &DeviceSelection {
        &self.selection
    }

    /// Per-series visibility. Empty unless the selection uses toggles.
    #[must_use]
    pub fn toggles(&self) -> &[bool] {
        &self.toggles
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total number of samples across all fetched series.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.series.iter().map(|s| s.samples.len()).sum()
    }

    /// Snapshot after a successful fetch. Replaces everything; toggles reset to all enabled.
    #[must_use]
    pub fn loaded(
        &self,
        selection: DeviceSelection,
        window: TimeWindow,
        series: Vec<Series>,
        generation: u64,
    ) -> Self {
        let toggles = if selection.uses_toggles() {
            vec![true; series.len()]
        } else {
            Vec::new()
        };

        Self {
            series,
            window,
            selection,
            toggles,
            generation,
        }
    }

    /// Snapshot with one series' toggle flipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when the selection has no toggles and
    /// `AppError::NotFound` when `index` is out of range.
    pub fn toggled(&self, index: usize) -> AppResult<Self> {
        let enabled = self.toggle_at(index)?;
        self.with_toggle(index, !enabled)
    }

    /// Snapshot with one series' toggle set explicitly.
    ///
    /// # Errors
    ///
    /// Same as [`ChartState::toggled`].
    pub fn with_toggle(&self, index: usize, enabled: bool) -> AppResult<Self> {
        self.toggle_at(index)?;
        let mut next = self.clone();
        next.toggles[index] = enabled;
        Ok(next)
    }

    fn toggle_at(&self, index: usize) -> AppResult<bool> {
        if !self.selection.uses_toggles() {
            return Err(AppError::BadRequest(
                "Series toggles are not available when devices are selected explicitly"
                    .to_string(),
            ));
        }
        self.toggles
            .get(index)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Series {index} not found")))
    }
}

/// The selection and window the next request is built from.
#[derive(Debug, Clone)]
struct Requested {
    selection: DeviceSelection,
    window: TimeWindow,
}

pub struct SeriesStore {
    source: Arc<dyn TemperatureSource>,
    state: RwLock<Arc<ChartState>>,
    requested: Mutex<Requested>,
    issued: AtomicU64,
}

impl SeriesStore {
    #[must_use]
    pub fn new(source: Arc<dyn TemperatureSource>, initial: ChartState) -> Self {
        let issued = AtomicU64::new(initial.generation());
        let requested = Requested {
            selection: initial.selection().clone(),
            window: initial.window(),
        };
        Self {
            source,
            state: RwLock::new(Arc::new(initial)),
            requested: Mutex::new(requested),
            issued,
        }
    }

    /// Current snapshot. Cheap; the returned `Arc` is never mutated.
    pub async fn snapshot(&self) -> Arc<ChartState> {
        self.state.read().await.clone()
    }

    pub async fn current_series(&self) -> Vec<Series> {
        self.snapshot().await.series().to_vec()
    }

    pub async fn current_window(&self) -> TimeWindow {
        self.snapshot().await.window()
    }

    pub async fn current_selection(&self) -> DeviceSelection {
        self.snapshot().await.selection().clone()
    }

    /// Fetch series for `selection` and `window` and replace the stored state.
    ///
    /// Returns the snapshot that is current once the response is handled. If a
    /// newer load already landed, that newer snapshot is returned unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; the stored state is left untouched.
    pub async fn load(
        &self,
        selection: DeviceSelection,
        window: TimeWindow,
    ) -> AppResult<Arc<ChartState>> {
        self.request(|_| Some(Requested { selection, window }))
            .await
    }

    /// Refetch with the most recently requested window and selection.
    ///
    /// # Errors
    ///
    /// See [`SeriesStore::load`].
    pub async fn reload(&self) -> AppResult<Arc<ChartState>> {
        self.request(|current| Some(current.clone())).await
    }

    /// Switch to a custom window and refetch.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if both bounds are set and `end <= start`,
    /// otherwise see [`SeriesStore::load`].
    pub async fn set_window(&self, window: TimeWindow) -> AppResult<Arc<ChartState>> {
        if let (Some(start), Some(end)) = (window.start, window.end) {
            if end <= start {
                return Err(AppError::BadRequest(
                    "end time must be after start time".to_string(),
                ));
            }
        }
        self.request(|current| {
            Some(Requested {
                selection: current.selection.clone(),
                window,
            })
        })
        .await
    }

    /// Apply a preset window ending at `now` (epoch seconds) and refetch.
    ///
    /// # Errors
    ///
    /// See [`SeriesStore::load`].
    pub async fn apply_preset(&self, preset: WindowPreset, now: i64) -> AppResult<Arc<ChartState>> {
        self.set_window(preset.window_ending_at(now)).await
    }

    /// Add a device to the explicit selection and refetch.
    ///
    /// A device that is already selected leaves the state as is.
    ///
    /// # Errors
    ///
    /// See [`SeriesStore::load`].
    pub async fn add_device(&self, device_id: i64) -> AppResult<Arc<ChartState>> {
        self.request(|current| {
            if current.selection.device_ids().contains(&device_id) {
                return None;
            }
            Some(Requested {
                selection: current.selection.with_device(device_id),
                window: current.window,
            })
        })
        .await
    }

    /// Record the next request and issue its generation under one lock, then
    /// fetch. `next` returns `None` when nothing needs to change.
    async fn request<F>(&self, next: F) -> AppResult<Arc<ChartState>>
    where
        F: FnOnce(&Requested) -> Option<Requested>,
    {
        let (request, generation) = {
            let mut requested = self.requested.lock().await;
            let Some(request) = next(&requested) else {
                drop(requested);
                return Ok(self.snapshot().await);
            };
            *requested = request.clone();
            (request, self.issued.fetch_add(1, Ordering::SeqCst) + 1)
        };
        self.fetch_and_apply(request, generation).await
    }

    async fn fetch_and_apply(
        &self,
        request: Requested,
        generation: u64,
    ) -> AppResult<Arc<ChartState>> {
        let Requested { selection, window } = request;
        tracing::debug!(generation, ?selection, ?window, "Loading temperature series");

        let series = match self.source.fetch_series(&selection, &window).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(error = %e, generation, "Series fetch failed, keeping previous state");
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        if generation <= state.generation() {
            tracing::debug!(
                generation,
                current = state.generation(),
                "Discarding stale series response"
            );
            return Ok(state.clone());
        }

        let next = Arc::new(state.loaded(selection, window, series, generation));
        tracing::info!(
            generation,
            series = next.series().len(),
            records = next.record_count(),
            "Series loaded"
        );
        *state = next.clone();
        Ok(next)
    }

    /// Flip the visibility of one series.
    ///
    /// # Errors
    ///
    /// See [`ChartState::toggled`].
    pub async fn toggle(&self, index: usize) -> AppResult<Arc<ChartState>> {
        let mut state = self.state.write().await;
        let next = Arc::new(state.toggled(index)?);
        tracing::debug!(index, enabled = next.toggles()[index], "Series toggled");
        *state = next.clone();
        Ok(next)
    }
}
