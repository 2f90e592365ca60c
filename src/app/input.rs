use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::ui::LineKind;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q' | '?') | KeyCode::F(1) => Some(Message::HideHelp),
                _ => None,
            };
        }

        if model.viewer.is_open() {
            return Self::handle_viewer_key(key, model);
        }

        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('n') => Some(Message::NextArticle),
            KeyCode::Char('p') => Some(Message::PrevArticle),
            KeyCode::Char('i') | KeyCode::Enter if !model.viewer.is_empty() => {
                Some(Message::OpenImage(0))
            }
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            _ => None,
        }
    }

    fn handle_viewer_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::ViewerClose),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::ViewerPrevious),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::ViewerNext),
            KeyCode::Char('d') => Some(Message::ViewerDownload),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                (index < model.viewer.len()).then_some(Message::ViewerNavigate(index))
            }
            _ => None,
        }
    }

    fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                return Some(Message::HideHelp);
            }
            return None;
        }

        // Any click outside the viewer's own controls closes it (backdrop)
        if model.viewer.is_open() {
            return match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) => Some(Message::ViewerClose),
                MouseEventKind::ScrollUp => Some(Message::ViewerPrevious),
                MouseEventKind::ScrollDown => Some(Message::ViewerNext),
                _ => None,
            };
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(3)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(3)),
            MouseEventKind::Up(MouseButton::Left) => {
                let line = layout_line_for_row(model, mouse.row)?;
                match model.layout.get(line)?.kind {
                    LineKind::Image(ordinal) => Some(Message::OpenImage(ordinal)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Map a screen row to a layout line index, if within the reading surface.
fn layout_line_for_row(model: &Model, row: u16) -> Option<usize> {
    if row as usize >= model.content_rows() {
        return None;
    }
    let line = model.scroll_offset + row as usize;
    (line < model.layout.len()).then_some(line)
}
