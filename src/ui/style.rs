//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::content::CalloutKind;

use super::render::LineKind;

/// Accent color for a callout kind.
pub const fn callout_color(kind: CalloutKind) -> Color {
    match kind {
        CalloutKind::Note => Color::Blue,
        CalloutKind::Info => Color::Cyan,
        CalloutKind::Tip | CalloutKind::Success => Color::Green,
        CalloutKind::Warning => Color::Yellow,
        CalloutKind::Danger => Color::Red,
        CalloutKind::Question => Color::Magenta,
        CalloutKind::Quote => Color::Indexed(245),
    }
}

/// Get the style for a given layout line kind.
pub fn style_for_line_kind(kind: LineKind) -> Style {
    match kind {
        LineKind::Title => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineKind::Meta => Style::default().fg(Color::Indexed(245)),
        LineKind::Separator => Style::default().fg(Color::DarkGray),
        LineKind::CalloutTitle(kind) => Style::default()
            .fg(callout_color(kind))
            .add_modifier(Modifier::BOLD),
        LineKind::CalloutBody(kind) => Style::default().fg(callout_color(kind)),
        LineKind::Image(_) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
        LineKind::Caption => Style::default()
            .fg(Color::Indexed(245))
            .add_modifier(Modifier::ITALIC),
        LineKind::EmptyState => Style::default().fg(Color::Indexed(245)),
        LineKind::Text | LineKind::Empty => Style::default(),
    }
}
