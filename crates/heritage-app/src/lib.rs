//! # Heritage App
//!
//! Client-side routing for the Miao heritage traceability site: the declared
//! route table, the chunk-manifest loader behind its deferred views, and the
//! wiring that turns configuration into a ready [`Navigator`].
//!
//! ```
//! use heritage_app::{routes::build_table, AppConfig};
//!
//! let table = build_table(&AppConfig::default().routing).unwrap();
//! assert_eq!(table.resolve("/trace/123").unwrap().route.name, "trace");
//! ```

pub mod config;
pub mod loader;
pub mod routes;

pub use config::{AppConfig, LoaderConfig};
pub use loader::ManifestLoader;

use anyhow::Result;
use heritage_router::{ModuleCache, Navigator, ViewMount};
use std::sync::Arc;
use std::time::Duration;

/// Builds the loader described by the configuration
pub fn build_loader(config: &LoaderConfig) -> Result<ManifestLoader> {
    let loader = match &config.manifest {
        Some(path) => ManifestLoader::from_file(path)?,
        None => ManifestLoader::builtin(),
    };

    Ok(loader.with_delay(Duration::from_millis(config.delay_ms)))
}

/// Builds the route table, module cache and navigator for a session
///
/// Fails fast if the route table is malformed.
pub fn build_navigator<M: ViewMount>(config: &AppConfig, mount: M) -> Result<Navigator<M>> {
    let table = routes::build_table(&config.routing)?;
    let loader = build_loader(&config.loader)?;
    let modules = ModuleCache::new(Arc::new(loader));

    tracing::info!(
        routes = table.routes().len(),
        base = table.base(),
        "heritage router ready"
    );

    Ok(Navigator::new(Arc::new(table), Arc::new(modules), mount))
}
