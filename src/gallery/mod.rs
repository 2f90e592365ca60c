//! Image gallery: document image index, full-screen viewer, and loader.
//!
//! [`collect_images`] walks a rendered [`crate::content::Document`] and
//! produces the ordered snapshot the [`Viewer`] navigates over.

mod index;
mod loader;
mod viewer;

pub use index::{ImageEntry, collect_images};
pub use loader::ImageLoader;
pub use viewer::{GalleryError, ImageSink, ScrollFlag, ScrollLock, Viewer, ViewerState};
