//! # Title Dialog
//!
//! Centered modal for naming a new list or renaming an existing one.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum DialogPurpose {
    Create,
    Rename(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    Confirm(DialogPurpose, String),
    Dismiss,
}

pub struct TitleDialogState {
    pub purpose: DialogPurpose,
    pub buffer: String,
}

impl TitleDialogState {
    pub fn create() -> Self {
        Self {
            purpose: DialogPurpose::Create,
            buffer: String::new(),
        }
    }

    /// Rename dialog prefilled with the current title.
    pub fn rename(id: String, current_title: &str) -> Self {
        Self {
            purpose: DialogPurpose::Rename(id),
            buffer: current_title.to_string(),
        }
    }
}

impl EventHandler for TitleDialogState {
    type Event = DialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DialogEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                // Titles are single-line
                self.buffer.push_str(&text.replace(['\r', '\n'], " "));
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            TuiEvent::Submit => {
                let title = self.buffer.trim();
                if title.is_empty() {
                    return None;
                }
                Some(DialogEvent::Confirm(self.purpose.clone(), title.to_string()))
            }
            TuiEvent::Escape => Some(DialogEvent::Dismiss),
            _ => None,
        }
    }
}

pub struct TitleDialog<'a> {
    state: &'a TitleDialogState,
}

impl<'a> TitleDialog<'a> {
    pub fn new(state: &'a TitleDialogState) -> Self {
        Self { state }
    }
}

impl Component for TitleDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 5, area);
        frame.render_widget(Clear, overlay);

        let title = match self.state.purpose {
            DialogPurpose::Create => " New List ",
            DialogPurpose::Rename(_) => " Rename List ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(" Enter Save  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        let inner = block.inner(overlay);
        frame.render_widget(Paragraph::new(self.state.buffer.as_str()).block(block), overlay);

        let cursor_x = inner.x + (self.state.buffer.chars().count() as u16).min(inner.width);
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// Horizontally centered by percentage, vertically centered with a fixed height.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
