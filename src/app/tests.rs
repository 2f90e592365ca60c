use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::feed::{Article, Feed};
use crate::gallery::ViewerState;
use crate::ui::LineKind;

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, update};

fn article(id: u64, title: &str, content: Option<&str>) -> Article {
    Article {
        id,
        feed_id: 1,
        title: title.to_string(),
        link: None,
        content: content.map(ToOwned::to_owned),
        author: Some("Sam".to_string()),
        published_at: Some("2026-08-01".to_string()),
        is_read: false,
        is_starred: false,
    }
}

fn feed() -> Feed {
    Feed {
        id: 1,
        title: "Daily Rust".to_string(),
        url: "https://example.com/rss".to_string(),
        description: None,
    }
}

const GALLERY: &str = concat!(
    "<p>Intro text.</p>\n",
    "<img src=\"a.png\" alt=\"First\">\n",
    "<figure><img src=\"b.png\" alt=\"Second\"><figcaption>A caption</figcaption></figure>\n",
    "<img src=\"c.png\">\n",
);

fn create_test_model() -> Model {
    let articles = vec![
        article(10, "With images", Some(GALLERY)),
        article(11, "Plain", Some("<p>Just text.</p>")),
        article(12, "Empty", None),
    ];
    let mut model = Model::new(vec![feed()], articles, PathBuf::from("."), (80, 24));
    model.select_article(0);
    model
}

fn create_long_test_model() -> Model {
    let mut content = String::new();
    for i in 1..=80 {
        content.push_str(&format!("<p>Line {i} of content.</p>\n"));
    }
    let articles = vec![article(10, "Long", Some(&content))];
    let mut model = Model::new(vec![feed()], articles, PathBuf::from("."), (80, 24));
    model.select_article(0);
    model
}

fn key_message(model: &Model, code: KeyCode) -> Option<Message> {
    modified_key_message(model, code, KeyModifiers::NONE)
}

fn modified_key_message(model: &Model, code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    let mut debouncer = ResizeDebouncer::new(100);
    App::handle_event(
        &Event::Key(KeyEvent::new(code, modifiers)),
        model,
        0,
        &mut debouncer,
    )
}

fn mouse_message(model: &Model, kind: MouseEventKind, column: u16, row: u16) -> Option<Message> {
    let mut debouncer = ResizeDebouncer::new(100);
    App::handle_event(
        &Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }),
        model,
        0,
        &mut debouncer,
    )
}

fn click_message(model: &Model, column: u16, row: u16) -> Option<Message> {
    mouse_message(model, MouseEventKind::Up(MouseButton::Left), column, row)
}

fn image_line_index(model: &Model, ordinal: usize) -> usize {
    model
        .layout
        .iter()
        .position(|line| line.kind == LineKind::Image(ordinal))
        .expect("image line in layout")
}

#[test]
fn test_mount_builds_image_snapshot_in_document_order() {
    let model = create_test_model();
    let images = model.viewer.images();
    assert_eq!(images.len(), 3);
    assert_eq!(images[0].src, "a.png");
    assert_eq!(images[1].src, "b.png");
    assert_eq!(images[1].caption.as_deref(), Some("A caption"));
    assert_eq!(images[2].src, "c.png");
}

#[test]
fn test_snapshot_fingerprint_matches_mounted_content() {
    let model = create_test_model();
    assert_eq!(model.rendered_fingerprint(), model.document.fingerprint());
}

#[test]
fn test_stale_snapshot_is_discarded() {
    let mut model = create_test_model();
    let stale_fingerprint = model.document.fingerprint();
    let stale_images = model.viewer.images().to_vec();

    model.select_article(1);
    model.install_images(stale_images, stale_fingerprint);
    assert!(model.viewer.images().is_empty());
}

#[test]
fn test_scroll_down_updates_offset() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.scroll_offset, 5);
}

#[test]
fn test_scroll_up_saturates_at_top() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollUp(3));
    assert_eq!(model.scroll_offset, 0);
}

#[test]
fn test_scroll_down_clamps_to_bottom() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(10_000));
    assert_eq!(
        model.scroll_offset,
        model.layout.len() - model.content_rows()
    );
}

#[test]
fn test_page_down_then_go_to_top() {
    let model = create_long_test_model();
    let model = update(model, Message::PageDown);
    assert!(model.scroll_offset > 0);
    let model = update(model, Message::GoToTop);
    assert_eq!(model.scroll_offset, 0);
}

#[test]
fn test_open_image_locks_scrolling() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(0));
    assert_eq!(model.viewer.state(), ViewerState::Open(0));
    assert!(!model.can_scroll());

    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.scroll_offset, 0);

    let model = update(model, Message::ViewerClose);
    assert!(model.can_scroll());
}

#[test]
fn test_viewer_navigation_has_no_wraparound() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(2));
    let model = update(model, Message::ViewerNext);
    assert_eq!(model.viewer.state(), ViewerState::Open(2));

    let model = update(model, Message::ViewerNavigate(0));
    let model = update(model, Message::ViewerPrevious);
    assert_eq!(model.viewer.state(), ViewerState::Open(0));
}

#[test]
fn test_open_image_out_of_range_is_ignored() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(7));
    assert_eq!(model.viewer.state(), ViewerState::Closed);
}

#[test]
fn test_article_change_closes_viewer_and_releases_lock() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(1));
    assert!(!model.can_scroll());

    let model = update(model, Message::NextArticle);
    assert_eq!(model.viewer.state(), ViewerState::Closed);
    assert!(model.can_scroll());
    assert!(model.viewer.images().is_empty());
}

#[test]
fn test_next_article_past_end_is_ignored() {
    let mut model = create_test_model();
    model.select_article(2);
    let model = update(model, Message::NextArticle);
    assert_eq!(model.selected, Some(2));
}

#[test]
fn test_prev_article_at_start_is_ignored() {
    let model = create_test_model();
    let model = update(model, Message::PrevArticle);
    assert_eq!(model.selected, Some(0));
}

#[test]
fn test_article_without_content_mounts_empty_document() {
    let mut model = create_test_model();
    model.select_article(2);
    assert!(model.document.is_empty());
    assert!(model.viewer.images().is_empty());
}

#[test]
fn test_resize_reflows_layout() {
    let model = create_long_test_model();
    let before = model.layout.len();
    let model = update(model, Message::Resize(40, 24));
    assert_eq!(model.width, 40);
    assert!(model.layout.len() >= before);
}

#[test]
fn test_toggle_help() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_sets_flag() {
    let model = create_test_model();
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_reading_keymap() {
    let model = create_test_model();
    assert_eq!(
        key_message(&model, KeyCode::Char('j')),
        Some(Message::ScrollDown(1))
    );
    assert_eq!(
        key_message(&model, KeyCode::Enter),
        Some(Message::OpenImage(0))
    );
    assert_eq!(
        key_message(&model, KeyCode::Char('n')),
        Some(Message::NextArticle)
    );
    assert_eq!(
        key_message(&model, KeyCode::Char('?')),
        Some(Message::ToggleHelp)
    );
    assert_eq!(key_message(&model, KeyCode::Char('q')), Some(Message::Quit));
}

#[test]
fn test_open_key_ignored_without_images() {
    let mut model = create_test_model();
    model.select_article(1);
    assert_eq!(key_message(&model, KeyCode::Enter), None);
    assert_eq!(key_message(&model, KeyCode::Char('i')), None);
}

#[test]
fn test_viewer_keymap() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(0));
    assert_eq!(key_message(&model, KeyCode::Esc), Some(Message::ViewerClose));
    assert_eq!(
        key_message(&model, KeyCode::Char('q')),
        Some(Message::ViewerClose)
    );
    assert_eq!(
        key_message(&model, KeyCode::Left),
        Some(Message::ViewerPrevious)
    );
    assert_eq!(
        key_message(&model, KeyCode::Right),
        Some(Message::ViewerNext)
    );
    assert_eq!(
        key_message(&model, KeyCode::Char('d')),
        Some(Message::ViewerDownload)
    );
}

#[test]
fn test_viewer_digit_jump_respects_snapshot_length() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(0));
    assert_eq!(
        key_message(&model, KeyCode::Char('2')),
        Some(Message::ViewerNavigate(1))
    );
    assert_eq!(key_message(&model, KeyCode::Char('9')), None);
}

#[test]
fn test_ctrl_c_quits_even_while_viewer_open() {
    let model = create_test_model();
    let model = update(model, Message::OpenImage(0));
    assert_eq!(
        modified_key_message(&model, KeyCode::Char('c'), KeyModifiers::CONTROL),
        Some(Message::Quit)
    );
}

#[test]
fn test_click_on_image_line_opens_that_image() {
    let model = create_test_model();
    let row = image_line_index(&model, 1) as u16;
    assert_eq!(click_message(&model, 4, row), Some(Message::OpenImage(1)));
}

#[test]
fn test_click_on_text_line_is_ignored() {
    let model = create_test_model();
    // row 0 is the article title
    assert_eq!(click_message(&model, 4, 0), None);
}

#[test]
fn test_click_hit_test_follows_scroll_offset() {
    let mut content = String::new();
    for i in 1..=60 {
        content.push_str(&format!("<p>Line {i}.</p>\n"));
    }
    content.push_str(GALLERY);
    let articles = vec![article(10, "Long gallery", Some(&content))];
    let mut model = Model::new(vec![feed()], articles, PathBuf::from("."), (80, 24));
    model.select_article(0);

    let model = update(model, Message::GoToBottom);
    assert!(model.scroll_offset > 0);
    let row = (image_line_index(&model, 2) - model.scroll_offset) as u16;
    assert_eq!(click_message(&model, 4, row), Some(Message::OpenImage(2)));
}

#[test]
fn test_mouse_wheel_scrolls_when_closed_and_navigates_when_open() {
    let model = create_test_model();
    assert_eq!(
        mouse_message(&model, MouseEventKind::ScrollDown, 0, 0),
        Some(Message::ScrollDown(3))
    );

    let model = update(model, Message::OpenImage(0));
    assert_eq!(
        mouse_message(&model, MouseEventKind::ScrollDown, 0, 0),
        Some(Message::ViewerNext)
    );
    assert_eq!(
        mouse_message(&model, MouseEventKind::ScrollUp, 0, 0),
        Some(Message::ViewerPrevious)
    );
}

#[test]
fn test_resize_debouncer_waits_for_delay() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 40, 0);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(50), None);
    assert_eq!(debouncer.take_ready(100), Some((100, 40)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_keeps_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 40, 0);
    debouncer.queue(120, 50, 10);
    assert_eq!(debouncer.take_ready(200), Some((120, 50)));
}
