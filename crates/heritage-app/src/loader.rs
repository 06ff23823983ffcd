//! Chunk-manifest module loader
//!
//! Stands in for the browser's module-loading subsystem: each deferred route
//! names a chunk, and the manifest says which view that chunk provides.

use anyhow::{Context, Result};
use async_trait::async_trait;
use heritage_router::{ModuleLoader, ViewId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Loader backed by a chunk → view manifest
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    chunks: HashMap<String, ViewId>,
    delay: Duration,
}

impl ManifestLoader {
    /// Create a loader over an explicit manifest
    pub fn new(chunks: HashMap<String, ViewId>) -> Self {
        Self {
            chunks,
            delay: Duration::ZERO,
        }
    }

    /// The chunks shipped with the heritage site
    pub fn builtin() -> Self {
        let chunks = [
            ("products", "ProductsView"),
            ("product-detail", "ProductDetailView"),
            ("ai-identification", "AiIdentificationView"),
            ("about", "AboutView"),
        ]
        .into_iter()
        .map(|(chunk, view)| (chunk.to_string(), ViewId::new(view)))
        .collect();

        Self::new(chunks)
    }

    /// Load a JSON manifest: `{ "chunk": "ViewId", ... }`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chunk manifest: {:?}", path))?;
        let chunks: HashMap<String, ViewId> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse chunk manifest: {:?}", path))?;
        Ok(Self::new(chunks))
    }

    /// Simulate network latency on every fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn chunks(&self) -> &HashMap<String, ViewId> {
        &self.chunks
    }
}

#[async_trait]
impl ModuleLoader for ManifestLoader {
    async fn load(&self, chunk: &str) -> Result<ViewId> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.chunks
            .get(chunk)
            .cloned()
            .with_context(|| format!("chunk `{chunk}` is not in the manifest"))
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
