//! Full-screen image viewer state machine.
//!
//! The viewer is either `Closed` or `Open(index)` over an immutable
//! snapshot of indexed images. While open it holds a [`ScrollLock`] that
//! suspends scrolling of the underlying reading surface; the lock is
//! released on every path back to `Closed`, including forced closes when
//! the snapshot is replaced.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use super::index::ImageEntry;

/// Errors from the viewer's imperative surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GalleryError {
    /// `open`/`navigate` called with an index outside the snapshot.
    /// Distinct from the soft no-op boundaries of `previous`/`next`.
    #[error("image index {index} out of range (snapshot has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Viewer states. `Open(i)` always satisfies `i < images.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(usize),
}

/// Shared scroll-suspension flag for the reading surface.
///
/// The surface checks [`ScrollFlag::is_locked`] before applying scroll
/// input; the viewer acquires the flag through a [`ScrollLock`] guard.
#[derive(Debug, Clone, Default)]
pub struct ScrollFlag(Arc<AtomicBool>);

impl ScrollFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether scrolling is currently suspended.
    pub fn is_locked(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn acquire(&self) -> ScrollLock {
        self.0.store(true, Ordering::Relaxed);
        ScrollLock(Arc::clone(&self.0))
    }
}

/// Guard holding the scroll suspension; dropping it restores scrolling.
#[derive(Debug)]
pub struct ScrollLock(Arc<AtomicBool>);

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// External save mechanism for the download operation.
pub trait ImageSink {
    /// Save the resource at `src` under `suggested_name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the resource cannot be saved; the viewer
    /// logs it and carries on.
    fn save(&self, src: &str, suggested_name: &str) -> anyhow::Result<()>;
}

/// Modal image viewer over a snapshot of indexed images.
#[derive(Debug, Default)]
pub struct Viewer {
    images: Vec<ImageEntry>,
    state: ViewerState,
    scroll: ScrollFlag,
    hold: Option<ScrollLock>,
}

impl Viewer {
    /// Create a closed viewer sharing `scroll` with the reading surface.
    pub fn new(scroll: ScrollFlag) -> Self {
        Self {
            images: Vec::new(),
            state: ViewerState::Closed,
            scroll,
            hold: None,
        }
    }

    /// Replace the image snapshot, force-closing the viewer.
    ///
    /// Called whenever rendered content changes: the previous snapshot and
    /// its bindings are discarded wholesale, never diffed, and the scroll
    /// lock is released if held.
    pub fn set_images(&mut self, images: Vec<ImageEntry>) {
        self.images = images;
        self.state = ViewerState::Closed;
        self.hold = None;
    }

    /// The current snapshot.
    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Read-only observation point for the UI.
    pub const fn state(&self) -> ViewerState {
        self.state
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    /// The entry currently shown, if open.
    pub fn current(&self) -> Option<&ImageEntry> {
        match self.state {
            ViewerState::Open(index) => self.images.get(index),
            ViewerState::Closed => None,
        }
    }

    /// Open at `index` (image activation or thumbnail selection).
    ///
    /// Acquires the scroll lock when entering `Open` from `Closed`.
    ///
    /// # Errors
    ///
    /// [`GalleryError::IndexOutOfRange`] when `index` is outside the
    /// snapshot.
    pub fn open(&mut self, index: usize) -> Result<(), GalleryError> {
        if index >= self.images.len() {
            return Err(GalleryError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        if self.hold.is_none() {
            self.hold = Some(self.scroll.acquire());
        }
        self.state = ViewerState::Open(index);
        Ok(())
    }

    /// Jump to `index` (thumbnail selection). Same contract as [`Self::open`].
    ///
    /// # Errors
    ///
    /// [`GalleryError::IndexOutOfRange`] when `index` is outside the
    /// snapshot.
    pub fn navigate(&mut self, index: usize) -> Result<(), GalleryError> {
        self.open(index)
    }

    /// Step to the previous image; no-op at the first (no wraparound).
    pub fn previous(&mut self) {
        if let ViewerState::Open(index) = self.state
            && index > 0
        {
            self.state = ViewerState::Open(index - 1);
        }
    }

    /// Step to the next image; no-op at the last (no wraparound).
    pub fn next(&mut self) {
        if let ViewerState::Open(index) = self.state
            && index + 1 < self.images.len()
        {
            self.state = ViewerState::Open(index + 1);
        }
    }

    /// Close the viewer, releasing the scroll lock.
    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
        self.hold = None;
    }

    /// Save the current image through `sink`, fire-and-forget.
    ///
    /// Failure is logged, never surfaced; viewer state is unchanged
    /// either way.
    pub fn download(&self, sink: &dyn ImageSink) {
        let Some(entry) = self.current() else {
            return;
        };
        if let Err(err) = sink.save(&entry.src, entry.suggested_name()) {
            tracing::warn!(src = %entry.src, error = %err, "image download failed");
        }
    }
}
