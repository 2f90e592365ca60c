// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. gallery::GalleryError)
    clippy::module_name_repetitions
)]

//! # Lectern
//!
//! A terminal reading client for syndicated feeds.
//!
//! Lectern renders stored article content in the terminal with:
//! - `[!kind]` callout annotations rewritten into styled blocks
//! - An ordered image index derived from the rendered content
//! - A full-screen image viewer with keyboard navigation and download
//!
//! ## Architecture
//!
//! Lectern uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`content`]: Content transformation and the rendered document tree
//! - [`gallery`]: Image index and viewer state machine
//! - [`feed`]: Feed/article data model and the content source collaborator
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults

pub mod app;
pub mod config;
pub mod content;
pub mod feed;
pub mod gallery;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::content::{Document, transform};
    pub use crate::gallery::{ImageEntry, Viewer, ViewerState, collect_images};
}
