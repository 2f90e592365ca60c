use crate::app::Model;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Reading surface
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of article
    GoToTop,
    /// Go to end of article
    GoToBottom,

    // Articles
    /// Select and mount the article at an index
    SelectArticle(usize),
    /// Select the next article in the list
    NextArticle,
    /// Select the previous article in the list
    PrevArticle,

    // Image viewer
    /// Open the viewer at an image ordinal
    OpenImage(usize),
    /// Close the viewer
    ViewerClose,
    /// Step to the previous image
    ViewerPrevious,
    /// Step to the next image
    ViewerNext,
    /// Jump to an image ordinal (thumbnail selection)
    ViewerNavigate(usize),
    /// Save the current image to the download directory
    ViewerDownload,

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Reading surface
        Message::ScrollUp(n) => model.scroll_up(n),
        Message::ScrollDown(n) => model.scroll_down(n),
        Message::PageUp => {
            let rows = model.page_rows();
            model.scroll_up(rows);
        }
        Message::PageDown => {
            let rows = model.page_rows();
            model.scroll_down(rows);
        }
        Message::GoToTop => model.go_to_top(),
        Message::GoToBottom => model.go_to_bottom(),

        // Articles
        Message::SelectArticle(index) => model.select_article(index),
        Message::NextArticle => {
            let next = model.selected.map_or(0, |i| i + 1);
            model.select_article(next);
        }
        Message::PrevArticle => {
            if let Some(i) = model.selected
                && i > 0
            {
                model.select_article(i - 1);
            }
        }

        // Image viewer
        Message::OpenImage(index) => {
            if let Err(err) = model.viewer.open(index) {
                tracing::debug!(%err, "ignoring image open");
            }
        }
        Message::ViewerNavigate(index) => {
            if let Err(err) = model.viewer.navigate(index) {
                tracing::debug!(%err, "ignoring image navigate");
            }
        }
        Message::ViewerClose => model.viewer.close(),
        Message::ViewerPrevious => model.viewer.previous(),
        Message::ViewerNext => model.viewer.next(),
        // ViewerDownload: handled in effects (filesystem side effect)
        // Redraw: no state change needed
        Message::ViewerDownload | Message::Redraw => {}

        // Overlays
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.reflow_layout();
            model.image_protocols.clear();
        }

        // Application
        Message::Quit => model.should_quit = true,
    }
    model
}
