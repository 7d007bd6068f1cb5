//! Application state for the dashboard service.

use std::sync::Arc;

use common::config::AppConfig;
use common::errors::AppResult;

use crate::backend::{HttpListingBackend, ListingBackend};
use crate::page::PageRenderer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn ListingBackend>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    /// Creates state backed by the configured Infinity HTTP API.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let backend = HttpListingBackend::new(&config.backend)?;
        Self::with_backend(config, Arc::new(backend))
    }

    /// Creates state around an arbitrary listing backend.
    pub fn with_backend(config: AppConfig, backend: Arc<dyn ListingBackend>) -> AppResult<Self> {
        Ok(Self {
            config,
            backend,
            renderer: Arc::new(PageRenderer::new()?),
        })
    }

    /// Database whose tables the page lists.
    pub fn default_database(&self) -> &str {
        &self.config.backend.default_database
    }

    pub fn service_name(&self) -> &str {
        &self.config.service_name
    }
}
