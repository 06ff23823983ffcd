//! Navigation: resolve, load, and commit the most recent request only
//!
//! Every call to [`Navigator::navigate`] takes a generation number. Resolution is
//! synchronous; deferred views suspend the navigation until their module arrives.
//! Before committing, the navigator checks that no newer navigation has started.
//! Stale results are dropped, so the most recent navigation always decides
//! what is displayed.

use crate::error::Result;
use crate::loader::ModuleCache;
use crate::path::Location;
use crate::{Component, Params, RouteTable, ViewId};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The view-mounting subsystem that consumes resolved navigations
pub trait ViewMount: Send + Sync {
    /// Display a resolved view
    fn mount(&self, view: &ResolvedView);

    /// Called when the most recent navigation matched no route
    fn not_found(&self, location: &str) {
        let _ = location;
    }
}

/// A placeholder mount that discards every navigation
impl ViewMount for () {
    fn mount(&self, _view: &ResolvedView) {}
}

/// A navigation that resolved to a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedView {
    /// Name of the matched route
    pub route: String,
    /// View to mount
    pub view: ViewId,
    /// Captured path parameters
    pub params: Params,
    /// View inputs, present only when the route forwards params
    pub props: Option<Params>,
    /// The resolved location
    pub location: Location,
    /// Generation number of the navigation
    pub generation: u64,
}

/// How a navigation ended when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// The view was handed to the mount
    Mounted(ResolvedView),
    /// A newer navigation started before this one completed
    Superseded { generation: u64, latest: u64 },
}

impl NavigationOutcome {
    pub fn mounted(&self) -> Option<&ResolvedView> {
        match self {
            NavigationOutcome::Mounted(view) => Some(view),
            NavigationOutcome::Superseded { .. } => None,
        }
    }
}

/// Drives navigations against an immutable route table
pub struct Navigator<M: ViewMount = ()> {
    table: Arc<RouteTable>,
    modules: Arc<ModuleCache>,
    mount: M,
    generation: AtomicU64,
    current: RwLock<Option<ResolvedView>>,
}

impl<M: ViewMount> Navigator<M> {
    pub fn new(table: Arc<RouteTable>, modules: Arc<ModuleCache>, mount: M) -> Self {
        Self {
            table,
            modules,
            mount,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn modules(&self) -> &ModuleCache {
        &self.modules
    }

    pub fn view_mount(&self) -> &M {
        &self.mount
    }

    /// The view committed by the most recent successful navigation
    pub async fn current(&self) -> Option<ResolvedView> {
        self.current.read().await.clone()
    }

    fn latest(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Navigate to `location`
    ///
    /// Returns `NotFound` when no route matches (the mount is told if this is
    /// still the latest navigation) and `LoadFailure` when a deferred fetch fails.
    /// Neither case is retried.
    pub async fn navigate(&self, location: &str) -> Result<NavigationOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let route_match = match self.table.resolve(location) {
            Ok(route_match) => route_match,
            Err(err) => {
                let mut current = self.current.write().await;
                if self.latest() == generation {
                    self.mount.not_found(location);
                    *current = None;
                }
                return Err(err);
            }
        };

        let route = route_match.route;
        let view = match &route.component {
            Component::Eager(view) => view.clone(),
            Component::Deferred { chunk } => self.modules.load(&route.name, chunk).await?.view,
        };

        let resolved = ResolvedView {
            route: route.name.clone(),
            view,
            params: route_match.params,
            props: route_match.props,
            location: route_match.location,
            generation,
        };

        let mut current = self.current.write().await;
        let latest = self.latest();
        if latest != generation {
            tracing::debug!(generation, latest, route = %resolved.route, "discarding stale navigation");
            return Ok(NavigationOutcome::Superseded { generation, latest });
        }

        tracing::debug!(generation, route = %resolved.route, view = %resolved.view, "mounting view");
        self.mount.mount(&resolved);
        *current = Some(resolved.clone());

        Ok(NavigationOutcome::Mounted(resolved))
    }
}

