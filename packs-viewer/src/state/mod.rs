//! Application state shared by the request handlers
//!
//! Everything in here is read-only after construction. Requests share the
//! configuration, catalog handle, templates and random source, but never
//! mutate them, so no locking is needed beyond what the random source does
//! internally.

use crate::{
    catalog::Catalog,
    config::ViewerConfig,
    error::ViewerResult,
    random::{RandomSource, ThreadRandom},
    template::Templates,
};
use std::sync::Arc;

/// Application state for the viewer
#[derive(Clone)]
pub struct ViewerState {
    config: Arc<ViewerConfig>,
    catalog: Arc<Catalog>,
    templates: Arc<Templates>,
    random: Arc<dyn RandomSource>,
}

impl ViewerState {
    /// Build state from configuration with the thread-local RNG
    ///
    /// # Errors
    ///
    /// Fails when the templates cannot be loaded.
    pub fn new(config: ViewerConfig) -> ViewerResult<Self> {
        Self::with_random(config, Arc::new(ThreadRandom))
    }

    /// Build state with an explicit random source
    ///
    /// # Errors
    ///
    /// Fails when the templates cannot be loaded.
    pub fn with_random(config: ViewerConfig, random: Arc<dyn RandomSource>) -> ViewerResult<Self> {
        let templates = Templates::new(config.views_dir.as_deref(), &config.stylesheets)?;
        let catalog = Catalog::from_config(&config);

        tracing::debug!(
            content_dir = %config.content_dir.display(),
            views_dir = ?config.views_dir,
            "viewer state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            templates: Arc::new(templates),
            random,
        })
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Component catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Loaded templates
    #[must_use]
    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Random source used for page composition
    #[must_use]
    pub fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }
}
