use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use ratatui_image::StatefulImage;

use crate::app::Model;

use super::style::callout_color;
use crate::content::CalloutKind;

/// Render the full-screen image viewer popup.
pub fn render_viewer_overlay(model: &mut Model, frame: &mut Frame, area: Rect) {
    let Some(entry) = model.viewer.current().cloned() else {
        return;
    };
    let total = model.viewer.len();

    let popup = centered_popup_rect(
        area.width.saturating_sub(8).max(40),
        area.height.saturating_sub(4).max(12),
        area,
    );

    let block = Block::default()
        .title(format!(" Image {} / {} ", entry.index + 1, total))
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Bottom rows: caption, thumbnail strip, hints
    let caption_rows = u16::from(entry.caption.is_some());
    let footer_rows = caption_rows + 2;
    let image_area = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_rows),
    );

    match model.image_protocols.get_mut(&entry.src) {
        Some(protocol) => {
            frame.render_stateful_widget(StatefulImage::default(), image_area, protocol);
        }
        None => {
            let label = entry.alt.as_deref().filter(|a| !a.is_empty()).map_or_else(
                || format!("[Image: {}]", entry.src),
                |alt| format!("[Image: {alt}]"),
            );
            let placeholder = Paragraph::new(label)
                .style(Style::default().fg(Color::Indexed(245)))
                .alignment(Alignment::Center);
            let row = Rect::new(
                image_area.x,
                image_area.y + image_area.height / 2,
                image_area.width,
                1.min(image_area.height),
            );
            frame.render_widget(placeholder, row);
        }
    }

    let mut y = inner.y + image_area.height;
    if let Some(caption) = &entry.caption {
        let line = Paragraph::new(caption.as_str())
            .style(Style::default().fg(Color::Indexed(250)).italic())
            .alignment(Alignment::Center);
        frame.render_widget(line, Rect::new(inner.x, y, inner.width, 1));
        y += 1;
    }

    render_thumbnail_strip(model, frame, Rect::new(inner.x, y, inner.width, 1));
    let hints = Paragraph::new("\u{2190}/\u{2192} navigate \u{00b7} 1-9 jump \u{00b7} d save \u{00b7} Esc close")
        .style(Style::default().fg(Color::Indexed(245)))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(inner.x, y + 1, inner.width, 1));
}

/// Numbered strip of all images with the current one highlighted.
fn render_thumbnail_strip(model: &Model, frame: &mut Frame, area: Rect) {
    let current = model.viewer.current().map(|e| e.index);
    let spans: Vec<Span> = model
        .viewer
        .images()
        .iter()
        .map(|entry| {
            let label = format!(" {} ", entry.index + 1);
            if Some(entry.index) == current {
                Span::styled(label, Style::default().fg(Color::Black).bg(Color::White))
            } else {
                Span::styled(label, Style::default().fg(Color::Indexed(245)))
            }
        })
        .collect();
    let strip = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(strip, area);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Reading", section_style));
    all_lines.push(Line::raw("  j/k or Up/Down      Scroll"));
    all_lines.push(Line::raw("  Space/PageDown      Page down"));
    all_lines.push(Line::raw("  b/PageUp            Page up"));
    all_lines.push(Line::raw("  g / G               Top / bottom"));
    all_lines.push(Line::raw("  n / p               Next / previous article"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Images", section_style));
    all_lines.push(Line::raw("  i / Enter / click   Open image viewer"));
    all_lines.push(Line::raw("  Left/Right or h/l   Previous / next image"));
    all_lines.push(Line::raw("  1-9                 Jump to image"));
    all_lines.push(Line::raw("  d                   Save image"));
    all_lines.push(Line::raw("  Esc / q / click     Close viewer"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Callouts", section_style));
    let mut callout_spans = vec![Span::raw("  ")];
    for kind in [
        CalloutKind::Note,
        CalloutKind::Tip,
        CalloutKind::Warning,
        CalloutKind::Danger,
    ] {
        callout_spans.push(Span::styled(
            format!("{} ", kind.as_str()),
            Style::default().fg(callout_color(kind)),
        ));
    }
    all_lines.push(Line::from(callout_spans));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  q / Ctrl-c          Quit"));
    all_lines.push(Line::raw("  ? / F1              Toggle help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(Paragraph::new(all_lines), inner);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
