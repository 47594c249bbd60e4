//! # List Browser Component
//!
//! Left-hand panel listing every todo list by title.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListBrowserState` lives in `TuiState`
//! - `ListBrowser` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::model::TodoList;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the list browser.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    Open(String),
    New,
    Rename(String),
    Delete(String),
    /// Close the open list.
    Close,
    Quit,
}

/// Persistent state for the list browser.
pub struct ListBrowserState {
    /// List ids in display order (synced from App each frame).
    pub ids: Vec<String>,
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl Default for ListBrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListBrowserState {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            selected: 0,
            confirm_delete: false,
            list_state: ListState::default(),
        }
    }

    /// Replace the known ids, keeping the selection on the same list if it
    /// still exists.
    pub fn sync(&mut self, ids: Vec<String>) {
        if ids == self.ids {
            return;
        }
        let current = self.selected_id().map(str::to_string);
        self.ids = ids;
        self.selected = current
            .and_then(|id| self.ids.iter().position(|i| *i == id))
            .unwrap_or(self.selected)
            .min(self.ids.len().saturating_sub(1));
        self.list_state
            .select((!self.ids.is_empty()).then_some(self.selected));
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.ids.get(self.selected).map(String::as_str)
    }

    pub fn select_id(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.selected = pos;
            self.list_state.select(Some(pos));
        }
    }
}

impl EventHandler for ListBrowserState {
    type Event = BrowserEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<BrowserEvent> {
        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::CursorUp => {
                if !self.ids.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.ids.is_empty() {
                    self.selected = (self.selected + 1).min(self.ids.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self.selected_id().map(|id| BrowserEvent::Open(id.to_string())),
            TuiEvent::InputChar('n') => Some(BrowserEvent::New),
            TuiEvent::InputChar('r') => self
                .selected_id()
                .map(|id| BrowserEvent::Rename(id.to_string())),
            TuiEvent::InputChar('q') => Some(BrowserEvent::Quit),
            TuiEvent::Escape => Some(BrowserEvent::Close),
            TuiEvent::InputChar('d') => {
                let id = self.selected_id()?.to_string();
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(BrowserEvent::Delete(id))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the browser panel.
pub struct ListBrowser<'a> {
    state: &'a mut ListBrowserState,
    lists: Vec<&'a TodoList>,
    active_id: Option<&'a str>,
    focused: bool,
}

impl<'a> ListBrowser<'a> {
    pub fn new(
        state: &'a mut ListBrowserState,
        lists: Vec<&'a TodoList>,
        active_id: Option<&'a str>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            lists,
            active_id,
            focused,
        }
    }
}

impl Component for ListBrowser<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.confirm_delete {
            " Press d again to delete "
        } else {
            " n New  r Rename  d Delete "
        };
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" My Todo Lists ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.lists.is_empty() {
            let empty = Paragraph::new("No todo lists yet. Create one to get started!")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .lists
            .iter()
            .enumerate()
            .map(|(i, list)| {
                let is_active = self.active_id == Some(list.id.as_str());
                let marker = if is_active { "▸ " } else { "  " };
                let mut style = Style::default().fg(Color::Gray);
                if is_active {
                    style = style.fg(Color::White).add_modifier(Modifier::BOLD);
                }
                if i == self.state.selected && self.focused {
                    style = if self.state.confirm_delete {
                        style.fg(Color::Red).add_modifier(Modifier::REVERSED)
                    } else {
                        style.add_modifier(Modifier::REVERSED)
                    };
                }
                ListItem::new(Line::styled(format!("{}{}", marker, list.title), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
