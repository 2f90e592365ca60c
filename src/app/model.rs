use std::collections::HashMap;
use std::path::PathBuf;

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::content::Document;
use crate::feed::{Article, Feed};
use crate::gallery::{ImageLoader, ScrollFlag, Viewer, collect_images};
use crate::ui::{LayoutLine, build_layout};

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Subscribed feeds from the dump
    pub feeds: Vec<Feed>,
    /// All articles, in dump order
    pub articles: Vec<Article>,
    /// Index of the selected article in `articles`
    pub selected: Option<usize>,
    /// Rendered document for the selected article
    pub document: Document,
    /// Fingerprint of the rendered content the image snapshot belongs to
    rendered_fingerprint: u64,
    /// Wrapped layout lines for the reading surface
    pub layout: Vec<LayoutLine>,
    /// First visible layout line
    pub scroll_offset: usize,
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
    /// Full-screen image viewer
    pub viewer: Viewer,
    /// Scroll suspension flag shared with the viewer
    scroll: ScrollFlag,
    /// Image picker for terminal rendering
    pub picker: Option<Picker>,
    /// Loads local images for the viewer
    pub loader: ImageLoader,
    /// Image protocols for the viewer (keyed by image src)
    pub image_protocols: HashMap<String, StatefulProtocol>,
    /// Whether inline/viewer images are enabled
    pub images_enabled: bool,
    /// Directory downloads are saved into
    pub download_dir: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("articles", &self.articles.len())
            .field("selected", &self.selected)
            .field("viewer", &self.viewer.state())
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model from a feed dump.
    pub fn new(
        feeds: Vec<Feed>,
        articles: Vec<Article>,
        base_dir: PathBuf,
        terminal_size: (u16, u16),
    ) -> Self {
        let scroll = ScrollFlag::new();
        Self {
            feeds,
            articles,
            selected: None,
            document: Document::empty(),
            rendered_fingerprint: 0,
            layout: Vec::new(),
            scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            viewer: Viewer::new(scroll.clone()),
            scroll,
            picker: None,
            loader: ImageLoader::new(base_dir),
            image_protocols: HashMap::new(),
            images_enabled: true,
            download_dir: None,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
        }
    }

    /// Set the image picker.
    #[must_use]
    pub fn with_picker(mut self, picker: Option<Picker>) -> Self {
        self.picker = picker;
        self
    }

    /// Select an article and mount its rendered content.
    ///
    /// Out-of-range indices are ignored.
    pub fn select_article(&mut self, index: usize) {
        if index >= self.articles.len() {
            return;
        }
        self.selected = Some(index);
        self.mount();
    }

    /// Index of the article with id `id`, if present.
    pub fn article_index(&self, id: u64) -> Option<usize> {
        self.articles.iter().position(|a| a.id == id)
    }

    /// The currently selected article.
    pub fn selected_article(&self) -> Option<&Article> {
        self.selected.and_then(|i| self.articles.get(i))
    }

    /// Render the selected article and rebuild the image snapshot.
    ///
    /// The viewer is invalidated first so it can never navigate images
    /// from the previous article, then the fresh index is installed
    /// against the new content's fingerprint.
    pub(super) fn mount(&mut self) {
        let raw = self.selected_article().and_then(|a| a.content.clone());
        self.document = Document::render(raw.as_deref());
        self.viewer.set_images(Vec::new());
        self.image_protocols.clear();
        self.loader.clear_cache();
        self.scroll_offset = 0;

        let fingerprint = self.document.fingerprint();
        let images = collect_images(&self.document);
        self.install_images(images, fingerprint);
        self.reflow_layout();
    }

    /// Install an image snapshot built for content with `fingerprint`.
    ///
    /// A snapshot whose fingerprint no longer matches the mounted content
    /// is discarded: it was scanned from markup we are no longer showing.
    pub fn install_images(&mut self, images: Vec<crate::gallery::ImageEntry>, fingerprint: u64) {
        if fingerprint != self.document.fingerprint() {
            tracing::debug!(
                expected = self.document.fingerprint(),
                got = fingerprint,
                "discarding stale image snapshot"
            );
            return;
        }
        self.rendered_fingerprint = fingerprint;
        self.viewer.set_images(images);
    }

    pub const fn rendered_fingerprint(&self) -> u64 {
        self.rendered_fingerprint
    }

    /// Whether reading-surface scrolling is currently allowed.
    pub fn can_scroll(&self) -> bool {
        !self.scroll.is_locked()
    }

    pub(super) fn scroll_up(&mut self, n: usize) {
        if self.can_scroll() {
            self.scroll_offset = self.scroll_offset.saturating_sub(n);
        }
    }

    pub(super) fn scroll_down(&mut self, n: usize) {
        if self.can_scroll() {
            self.scroll_offset = (self.scroll_offset + n).min(self.max_scroll_offset());
        }
    }

    pub(super) fn page_rows(&self) -> usize {
        self.content_rows().saturating_sub(1).max(1)
    }

    pub(super) fn go_to_top(&mut self) {
        if self.can_scroll() {
            self.scroll_offset = 0;
        }
    }

    pub(super) fn go_to_bottom(&mut self) {
        if self.can_scroll() {
            self.scroll_offset = self.max_scroll_offset();
        }
    }

    /// Rows available to the reading surface (frame minus status bar).
    pub fn content_rows(&self) -> usize {
        self.height.saturating_sub(1) as usize
    }

    pub(super) fn max_scroll_offset(&self) -> usize {
        self.layout.len().saturating_sub(self.content_rows())
    }

    /// Rebuild layout lines for the current width.
    pub(super) fn reflow_layout(&mut self) {
        let width = crate::ui::content_width(self.width);
        self.layout = build_layout(self.selected_article(), &self.document, width);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Decode the viewer's current image into a render protocol if needed.
    ///
    /// Runs before each draw; a miss leaves the overlay on its textual
    /// placeholder.
    pub fn ensure_viewer_protocol(&mut self) {
        if !self.images_enabled {
            return;
        }
        let Some(picker) = &self.picker else { return };
        let Some(src) = self.viewer.current().map(|e| e.src.clone()) else {
            return;
        };
        if self.image_protocols.contains_key(&src) {
            return;
        }
        let Some(img) = self.loader.load(&src) else {
            return;
        };
        let protocol = picker.new_resize_protocol(img);
        self.image_protocols.insert(src, protocol);
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), PathBuf::from("."), (80, 24))
    }
}
