//! Deferred view loading with a per-route module cache
//!
//! The first navigation to a deferred route asks the [`ModuleLoader`] for the
//! route's chunk. Concurrent navigations to the same route share that one fetch,
//! and every later navigation reuses the cached module for the rest of the session.
//! A failed fetch is reported to every navigation waiting on it and is never
//! retried on their behalf; a later navigation starts a fresh fetch.

use crate::error::{Result, RouterError};
use crate::ViewId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell, RwLock};

/// The module-loading subsystem: turns a chunk name into a view
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Fetch the chunk and return the view it provides
    async fn load(&self, chunk: &str) -> anyhow::Result<ViewId>;

    /// Loader name for diagnostics
    fn name(&self) -> &'static str {
        "loader"
    }
}

/// Lifecycle of a deferred route's module
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed(String),
}

/// A fetched module, cached by route name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedModule {
    /// Route the module was fetched for
    pub route: String,

    /// Chunk that was fetched
    pub chunk: String,

    /// View the chunk provides
    pub view: ViewId,

    /// When the fetch completed
    pub loaded_at: DateTime<Utc>,
}

/// Statistics for the module cache
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoaderStats {
    /// Loads served by an already-fetched module or by joining an in-flight fetch
    pub hits: u64,

    /// Fetches issued to the loader
    pub fetches: u64,

    /// Fetches that failed
    pub failures: u64,
}

impl LoaderStats {
    /// Fraction of loads served from cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.fetches;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct ModuleSlot {
    module: OnceCell<LoadedModule>,
    state: RwLock<LoadState>,
    /// Held for the duration of a fetch; carries the last attempt's failure
    fetch: Mutex<Option<String>>,
    /// Completed fetch attempts
    attempts: AtomicU64,
}

impl ModuleSlot {
    fn new() -> Self {
        Self {
            module: OnceCell::new(),
            state: RwLock::new(LoadState::Unloaded),
            fetch: Mutex::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    async fn set_state(&self, state: LoadState) {
        *self.state.write().await = state;
    }
}

/// Append-only cache of deferred modules keyed by route name
pub struct ModuleCache {
    loader: Arc<dyn ModuleLoader>,
    slots: RwLock<HashMap<String, Arc<ModuleSlot>>>,
    stats: RwLock<LoaderStats>,
}

impl ModuleCache {
    /// Create an empty cache in front of `loader`
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            loader,
            slots: RwLock::new(HashMap::new()),
            stats: RwLock::new(LoaderStats::default()),
        }
    }

    async fn slot(&self, route: &str) -> Arc<ModuleSlot> {
        if let Some(slot) = self.slots.read().await.get(route) {
            return slot.clone();
        }

        self.slots
            .write()
            .await
            .entry(route.to_string())
            .or_insert_with(|| Arc::new(ModuleSlot::new()))
            .clone()
    }

    /// Load the module for `route`, fetching `chunk` only if it is not cached yet
    ///
    /// Callers that arrive while a fetch is in flight wait for it and share its
    /// outcome, including a failure.
    pub async fn load(&self, route: &str, chunk: &str) -> Result<LoadedModule> {
        let slot = self.slot(route).await;

        if let Some(module) = slot.module.get() {
            self.stats.write().await.hits += 1;
            return Ok(module.clone());
        }

        let seen = slot.attempts.load(Ordering::SeqCst);
        let mut last_failure = slot.fetch.lock().await;

        if let Some(module) = slot.module.get() {
            self.stats.write().await.hits += 1;
            return Ok(module.clone());
        }
        if slot.attempts.load(Ordering::SeqCst) != seen {
            if let Some(reason) = last_failure.as_ref() {
                return Err(RouterError::LoadFailure {
                    route: route.to_string(),
                    reason: reason.clone(),
                });
            }
        }

        slot.set_state(LoadState::Loading).await;
        self.stats.write().await.fetches += 1;
        tracing::info!(route, chunk, loader = self.loader.name(), "fetching deferred view");

        let fetched = self.loader.load(chunk).await;
        slot.attempts.fetch_add(1, Ordering::SeqCst);

        match fetched {
            Ok(view) => {
                let module = LoadedModule {
                    route: route.to_string(),
                    chunk: chunk.to_string(),
                    view,
                    loaded_at: Utc::now(),
                };
                let module = slot.module.get_or_init(|| async move { module }).await.clone();
                *last_failure = None;
                slot.set_state(LoadState::Loaded).await;
                Ok(module)
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(route, chunk, %reason, "deferred view failed to load");
                *last_failure = Some(reason.clone());
                slot.set_state(LoadState::Failed(reason.clone())).await;
                self.stats.write().await.failures += 1;
                Err(RouterError::LoadFailure {
                    route: route.to_string(),
                    reason,
                })
            }
        }
    }

    /// Current state of a route's module
    pub async fn state(&self, route: &str) -> LoadState {
        match self.slots.read().await.get(route) {
            Some(slot) => slot.state.read().await.clone(),
            None => LoadState::Unloaded,
        }
    }

    /// Cached module for a route, if fetched
    pub async fn get(&self, route: &str) -> Option<LoadedModule> {
        self.slots
            .read()
            .await
            .get(route)
            .and_then(|slot| slot.module.get().cloned())
    }

    /// Names of routes whose module is cached
    pub async fn loaded_routes(&self) -> Vec<String> {
        let slots = self.slots.read().await;
        let mut routes: Vec<String> = slots
            .iter()
            .filter(|(_, slot)| slot.module.initialized())
            .map(|(route, _)| route.clone())
            .collect();
        routes.sort();
        routes
    }

    /// Get cache statistics
    pub async fn stats(&self) -> LoaderStats {
        self.stats.read().await.clone()
    }
}
