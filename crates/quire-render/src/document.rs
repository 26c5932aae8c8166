//! A [`Document`] that loads images through the [`ImageLoaderPipeline`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use quire_common::image::ImageSurface;
use quire_common::warning::warn_once;
use quire_layout::Document;

use crate::image_loader::{ImageLoaderPipeline, warn_url_decorations};

/// Document services backed by the filesystem, `data:` URLs and HTTP.
///
/// Each URI is loaded at most once. Failures are cached as well, so a
/// missing image referenced twice is reported once.
#[derive(Debug, Default)]
pub struct ResourceDocument {
    base_url: Option<String>,
    pipeline: ImageLoaderPipeline,
    cache: RefCell<HashMap<String, Option<Arc<ImageSurface>>>>,
}

impl ResourceDocument {
    /// A document whose relative references resolve against `base_url`.
    #[must_use]
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(str::to_string),
            pipeline: ImageLoaderPipeline::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Whether `uri` has already been looked up, successfully or not.
    #[must_use]
    pub fn is_cached(&self, uri: &str) -> bool {
        self.cache.borrow().contains_key(uri)
    }
}

impl Document for ResourceDocument {
    fn image_surface_from_uri(&self, uri: &str) -> Option<Arc<ImageSurface>> {
        if let Some(cached) = self.cache.borrow().get(uri) {
            return cached.clone();
        }

        warn_url_decorations(uri);
        let surface = match self.pipeline.load(uri) {
            Ok(surface) => Some(Arc::new(surface)),
            Err(e) => {
                warn_once("image", &format!("failed to load '{uri}': {e}"));
                None
            }
        };
        let _ = self
            .cache
            .borrow_mut()
            .insert(uri.to_string(), surface.clone());
        surface
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
