//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Reading surface and status bar
//! - [`overlays`]: Image viewer and help popups
//! - [`style`]: Theming and colors

pub mod style;

mod overlays;
mod render;

pub use render::{LayoutLine, LineKind, build_layout, content_width, render};

pub const READING_LEFT_PADDING: u16 = 2;

#[cfg(test)]
mod tests;
