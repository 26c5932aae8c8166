//! Element-specific box generation.
//!
//! Most elements become exactly the box their `display` value calls for.
//! A few need markup-level knowledge that styling cannot express: replaced
//! content (`<img>`), forced line breaks (`<br>`) and table attributes
//! (`<colgroup>`, `<col>`, `<td>`, `<th>`). For those, a handler takes the
//! provisional box and returns the boxes that replace it.
//!
//! # Module Structure
//!
//! - [`handlers`] - the per-tag handlers and the box construction helpers
//! - [`attributes`] - typed attribute readers with silent fallback

pub mod attributes;
pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use quire_common::image::ImageSurface;
use quire_dom::ElementRef;

use crate::LayoutError;
use crate::boxes::LayoutBox;

pub use handlers::{make_replaced_box, make_text_box};

/// Document-level services a handler may call on.
pub trait Document {
    /// Fetch and decode the image at `uri`.
    ///
    /// `None` when the resource is missing or cannot be decoded; the handler
    /// then falls back to alternative text.
    fn image_surface_from_uri(&self, uri: &str) -> Option<Arc<ImageSurface>>;

    /// Base URL relative references are resolved against.
    fn base_url(&self) -> Option<&str> {
        None
    }
}

/// A document with no resources: every image lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl Document for NoResources {
    fn image_surface_from_uri(&self, _uri: &str) -> Option<Arc<ImageSurface>> {
        None
    }
}

/// Turns one provisional box into the boxes that replace it, in order.
pub type ElementHandler =
    fn(&dyn Document, ElementRef<'_>, LayoutBox) -> Result<Vec<LayoutBox>, LayoutError>;

/// Immutable map from tag name to handler.
///
/// Built once and shared by reference; handlers are plain function
/// pointers, so the registry is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, ElementHandler>,
}

impl HandlerRegistry {
    /// The handlers for HTML: `img`, `br`, `colgroup`, `col`, `td`, `th`.
    #[must_use]
    pub fn html() -> Self {
        let entries: [(&'static str, ElementHandler); 6] = [
            ("img", handlers::handle_img),
            ("br", handlers::handle_br),
            ("colgroup", handlers::handle_colgroup),
            ("col", handlers::handle_col),
            ("td", handlers::handle_td),
            ("th", handlers::handle_td),
        ];
        Self {
            handlers: entries.into_iter().collect(),
        }
    }

    /// A registry with no handlers: every box passes through unchanged.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The handler registered for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<ElementHandler> {
        self.handlers.get(tag).copied()
    }

    /// Whether `tag` has a handler.
    #[must_use]
    pub fn is_registered(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Replace `layout_box` with the boxes its element calls for.
    ///
    /// Elements without a handler keep their box unchanged. A handler may
    /// return any number of boxes, including none.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError::UnsupportedDisplay`] when a handler must
    /// classify a box whose display is neither block- nor inline-level.
    pub fn handle(
        &self,
        document: &dyn Document,
        element: ElementRef<'_>,
        layout_box: LayoutBox,
    ) -> Result<Vec<LayoutBox>, LayoutError> {
        let Some(handler) = self.get(element.tag()) else {
            return Ok(vec![layout_box]);
        };

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[HANDLER] <{}> line={:?} box={}",
            element.tag(),
            element.source_line(),
            layout_box.kind_name()
        );

        let boxes = handler(document, element, layout_box)?;

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[HANDLER] <{}> -> [{}]",
            element.tag(),
            boxes
                .iter()
                .map(LayoutBox::kind_name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(boxes)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::html()
    }
}
