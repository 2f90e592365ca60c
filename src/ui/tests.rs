use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::{Message, Model, update};
use crate::content::Document;
use crate::feed::{Article, Feed};

use super::*;

fn article(content: &str) -> Article {
    Article {
        id: 10,
        feed_id: 1,
        title: "Release notes".to_string(),
        link: None,
        content: Some(content.to_string()),
        author: Some("Sam".to_string()),
        published_at: Some("2026-08-01".to_string()),
        is_read: false,
        is_starred: false,
    }
}

fn model_with(content: &str) -> Model {
    let feed = Feed {
        id: 1,
        title: "Daily Rust".to_string(),
        url: "https://example.com/rss".to_string(),
        description: None,
    };
    let mut model = Model::new(vec![feed], vec![article(content)], PathBuf::from("."), (80, 24));
    model.select_article(0);
    model
}

fn render_to_text(model: &mut Model) -> String {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_layout_starts_with_title_and_meta() {
    let model = model_with("<p>Body.</p>");
    assert_eq!(model.layout[0].kind, LineKind::Title);
    assert_eq!(model.layout[0].text, "Release notes");
    assert_eq!(model.layout[1].kind, LineKind::Meta);
    assert_eq!(model.layout[1].text, "Sam \u{00b7} 2026-08-01");
    assert_eq!(model.layout[2].kind, LineKind::Separator);
}

#[test]
fn test_layout_image_lines_carry_snapshot_ordinals() {
    let model = model_with(concat!(
        "<img src=\"a.png\" alt=\"First\">\n",
        "<figure><img src=\"b.png\"><figcaption>Cap</figcaption></figure>\n",
    ));
    let image_lines: Vec<_> = model
        .layout
        .iter()
        .filter_map(|l| match l.kind {
            LineKind::Image(ordinal) => Some((ordinal, l.text.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(image_lines.len(), 2);
    assert_eq!(image_lines[0], (0, "[Image: First]".to_string()));
    assert_eq!(image_lines[1], (1, "[Image: b.png]".to_string()));
    assert!(
        model
            .layout
            .iter()
            .any(|l| l.kind == LineKind::Caption && l.text == "Cap")
    );
}

#[test]
fn test_layout_callout_lines_styled_by_kind() {
    let model = model_with("[!warning] Be careful\nThe body.\n");
    let kinds: Vec<_> = model.layout.iter().map(|l| l.kind).collect();
    assert!(kinds.contains(&LineKind::CalloutTitle(crate::content::CalloutKind::Warning)));
    assert!(kinds.contains(&LineKind::CalloutBody(crate::content::CalloutKind::Warning)));
}

#[test]
fn test_layout_empty_article() {
    let doc = Document::empty();
    let lines = build_layout(Some(&article("")), &doc, 40);
    assert!(lines.iter().any(|l| l.kind == LineKind::EmptyState));
}

#[test]
fn test_layout_no_article_selected() {
    let doc = Document::empty();
    let lines = build_layout(None, &doc, 40);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].kind, LineKind::EmptyState);
}

#[test]
fn test_layout_wraps_to_width() {
    let long = format!("<p>{}</p>", "word ".repeat(50));
    let model = model_with(&long);
    let width = content_width(80) as usize;
    assert!(
        model
            .layout
            .iter()
            .all(|l| unicode_width::UnicodeWidthStr::width(l.text.as_str()) <= width)
    );
}

#[test]
fn test_render_shows_title_and_status_bar() {
    let mut model = model_with("<p>Hello terminal.</p>");
    let text = render_to_text(&mut model);
    assert!(text.contains("Release notes"));
    assert!(text.contains("Hello terminal."));
    assert!(text.contains("?:help"));
}

#[test]
fn test_render_viewer_overlay_counter_and_caption() {
    let model = model_with(concat!(
        "<img src=\"a.png\" alt=\"First\">\n",
        "<figure><img src=\"b.png\"><figcaption>Sunset over the bay</figcaption></figure>\n",
    ));
    let mut model = update(model, Message::OpenImage(1));
    let text = render_to_text(&mut model);
    assert!(text.contains("Image 2 / 2"));
    assert!(text.contains("Sunset over the bay"));
    assert!(text.contains("Esc close"));
}

#[test]
fn test_render_viewer_placeholder_without_picker() {
    let model = model_with("<img src=\"a.png\" alt=\"First\">");
    let mut model = update(model, Message::OpenImage(0));
    let text = render_to_text(&mut model);
    assert!(text.contains("[Image: First]"));
}

#[test]
fn test_render_help_overlay() {
    let model = model_with("<p>Body.</p>");
    let mut model = update(model, Message::ToggleHelp);
    let text = render_to_text(&mut model);
    assert!(text.contains("Help"));
    assert!(text.contains("Save image"));
}

#[test]
fn test_status_bar_counts_images() {
    let mut model = model_with("<img src=\"a.png\"><img src=\"b.png\">");
    let text = render_to_text(&mut model);
    assert!(text.contains("2 images"));
}
