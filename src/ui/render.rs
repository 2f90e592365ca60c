use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::content::{Block, CalloutKind, Document, strip_tags};
use crate::feed::Article;

use super::{READING_LEFT_PADDING, overlays, style};

/// What a layout line shows, used for styling and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Meta,
    Separator,
    Text,
    CalloutTitle(CalloutKind),
    CalloutBody(CalloutKind),
    /// Image placeholder line, carrying the image's ordinal
    Image(usize),
    Caption,
    Empty,
    EmptyState,
}

/// One wrapped line of the reading surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub kind: LineKind,
}

impl LayoutLine {
    fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    fn empty() -> Self {
        Self::new("", LineKind::Empty)
    }
}

/// Columns available for article text.
pub fn content_width(total_width: u16) -> u16 {
    total_width.saturating_sub(READING_LEFT_PADDING).max(1)
}

/// Build the wrapped layout for an article's rendered document.
///
/// Image lines carry ordinals matching the viewer's snapshot, including
/// images nested inside figures.
pub fn build_layout(article: Option<&Article>, doc: &Document, width: u16) -> Vec<LayoutLine> {
    let Some(article) = article else {
        return vec![LayoutLine::new("No article selected", LineKind::EmptyState)];
    };

    let width = width.max(1) as usize;
    let mut lines = Vec::new();

    for text in wrap_text(&article.title, width) {
        lines.push(LayoutLine::new(text, LineKind::Title));
    }
    let meta = article_meta(article);
    if !meta.is_empty() {
        lines.push(LayoutLine::new(meta, LineKind::Meta));
    }
    lines.push(LayoutLine::new("\u{2500}".repeat(width), LineKind::Separator));
    lines.push(LayoutLine::empty());

    if doc.is_empty() {
        lines.push(LayoutLine::new(
            "This article has no content.",
            LineKind::EmptyState,
        ));
        return lines;
    }

    let mut ordinal = 0;
    push_blocks(doc.blocks(), width, &mut ordinal, &mut lines);

    while lines.last().is_some_and(|l| l.kind == LineKind::Empty) {
        lines.pop();
    }
    lines
}

fn push_blocks(blocks: &[Block], width: usize, ordinal: &mut usize, lines: &mut Vec<LayoutLine>) {
    for block in blocks {
        match block {
            Block::Raw(raw) => {
                let text = strip_tags(raw);
                if text.trim().is_empty() {
                    continue;
                }
                for wrapped in wrap_text(text.trim(), width) {
                    lines.push(LayoutLine::new(wrapped, LineKind::Text));
                }
                lines.push(LayoutLine::empty());
            }
            Block::Callout(callout) => {
                let kind = callout.kind;
                let heading = format!("{} {}", kind.as_str().to_uppercase(), callout.title);
                for wrapped in wrap_text(&heading, width) {
                    lines.push(LayoutLine::new(wrapped, LineKind::CalloutTitle(kind)));
                }
                if let Some(body) = &callout.body {
                    let text = strip_tags(body);
                    for wrapped in wrap_text(text.trim(), width) {
                        lines.push(LayoutLine::new(
                            format!("  {wrapped}"),
                            LineKind::CalloutBody(kind),
                        ));
                    }
                }
                lines.push(LayoutLine::empty());
            }
            Block::Image(img) => {
                push_image_line(img.alt.as_deref(), &img.src, *ordinal, lines);
                *ordinal += 1;
                lines.push(LayoutLine::empty());
            }
            Block::Figure(figure) => {
                push_blocks(&figure.children, width, ordinal, lines);
                if let Some(caption) = &figure.caption {
                    // Drop the blank line between the image and its caption
                    if lines.last().is_some_and(|l| l.kind == LineKind::Empty) {
                        lines.pop();
                    }
                    for wrapped in wrap_text(caption, width) {
                        lines.push(LayoutLine::new(wrapped, LineKind::Caption));
                    }
                    lines.push(LayoutLine::empty());
                }
            }
        }
    }
}

fn push_image_line(alt: Option<&str>, src: &str, ordinal: usize, lines: &mut Vec<LayoutLine>) {
    let label = alt.filter(|a| !a.is_empty()).unwrap_or(src);
    lines.push(LayoutLine::new(
        format!("[Image: {label}]"),
        LineKind::Image(ordinal),
    ));
}

fn article_meta(article: &Article) -> String {
    let mut parts = Vec::new();
    if let Some(author) = article.author.as_deref().filter(|a| !a.is_empty()) {
        parts.push(author.to_string());
    }
    if let Some(date) = article.published_at.as_deref().filter(|d| !d.is_empty()) {
        parts.push(date.to_string());
    }
    parts.join(" \u{00b7} ")
}

/// Greedy word wrap by display width, breaking overlong words.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line_width > 0 && line_width + 1 + word_width > width {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if word_width > width {
                for chunk in break_word(word, width, &mut line, &mut line_width) {
                    out.push(chunk);
                }
                continue;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        if !line.is_empty() || paragraph.is_empty() {
            out.push(line);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Split a word wider than the line into width-sized chunks, leaving the
/// trailing chunk in `line` so following words can join it.
fn break_word(word: &str, width: usize, line: &mut String, line_width: &mut usize) -> Vec<String> {
    let mut chunks = Vec::new();
    for ch in word.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if *line_width + ch_width > width {
            chunks.push(std::mem::take(line));
            *line_width = 0;
        }
        line.push(ch);
        *line_width += ch_width;
    }
    chunks
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let content = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let status = Rect::new(
        area.x,
        area.y + content.height,
        area.width,
        area.height.saturating_sub(content.height),
    );

    render_reading_surface(model, frame, content);
    render_status_bar(model, frame, status);

    if model.viewer.is_open() {
        overlays::render_viewer_overlay(model, frame, area);
    }
    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_reading_surface(model: &Model, frame: &mut Frame, area: Rect) {
    let visible = area.height as usize;
    let start = model.scroll_offset.min(model.layout.len());
    let end = (start + visible).min(model.layout.len());

    let lines: Vec<Line> = model.layout[start..end]
        .iter()
        .map(|line| {
            Line::styled(
                format!("{:pad$}{}", "", line.text, pad = READING_LEFT_PADDING as usize),
                style::style_for_line_kind(line.kind),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let title = model.selected_article().map_or_else(
        || "lectern".to_string(),
        |a| {
            let feed = model.feeds.iter().find(|f| f.id == a.feed_id);
            match feed {
                Some(f) => format!("{} · {}", f.title, a.title),
                None => a.title.clone(),
            }
        },
    );

    let position = if model.layout.is_empty() {
        String::new()
    } else {
        let bottom = (model.scroll_offset + model.content_rows()).min(model.layout.len());
        format!("  [{}%]", bottom * 100 / model.layout.len())
    };

    let images = match model.viewer.len() {
        0 => String::new(),
        1 => "  1 image".to_string(),
        n => format!("  {n} images"),
    };

    let status = format!(" {title}{position}{images}  ?:help");
    let bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}
