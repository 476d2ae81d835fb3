//! Cameras and software renderers for the tilecast engine.
//!
//! Two renderers are provided, both producing a [`Rendering`]:
//!
//! * [`HierarchyRenderer`] casts one ray per pixel through the whole grid hierarchy
//!   using [`World::trace()`].
//! * [`ColumnRenderer`] is a classic textured-wall column renderer, which steps through
//!   only the root grid and draws one wall slice per image column.
//!
//! ## Package features
//!
//! This package, `tilecast-render`, defines the following feature flags:
//!
//! * `"auto-threads"`:
//!   Enable use of threads for parallel processing, via [`rayon`]’s global thread pool.
//!   This feature does not affect the public API, only performance and dependencies.
//!
//! [`World::trace()`]: tilecast::World::trace
#![cfg_attr(not(feature = "auto-threads"), doc = "[`rayon`]: https://docs.rs/rayon/")]

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use tilecast::World;

pub mod camera;

mod columns;
pub use columns::{ColumnHit, ColumnRenderer, MAX_DDA_STEPS, trace_column};

mod hierarchy;
pub use hierarchy::HierarchyRenderer;

#[cfg(feature = "auto-threads")]
mod rayon_util;

mod rendering;
pub use rendering::{RenderInfo, Rendering};

// -------------------------------------------------------------------------------------------------

/// A renderer which draws a [`World`] from the point of view of its [`Viewer`] into an
/// image in memory.
///
/// [`Viewer`]: tilecast::viewer::Viewer
pub trait Renderer {
    /// Draws a complete image, and reports statistics about the rays cast.
    fn render(&self, world: &World) -> (Rendering, RenderInfo);
}

/// An error indicating that a renderer could not be configured as requested.
#[derive(Clone, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum RenderError {
    /// image size {width}×{height} has too many pixels
    ImageTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// image size {width}×{height} has no pixels
    ImageEmpty {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// field of view {0}° is not between 0° and 180°
    FieldOfView(f64),

    /// maximum ray length {0} is not positive
    MaxLength(f64),
}

impl std::error::Error for RenderError {}
