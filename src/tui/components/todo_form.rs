//! # Todo Form Component
//!
//! Right-hand panel editing the todos of the open list. Every change is
//! emitted as a `FormEvent`; the core form owns the todos and the autosave
//! status, this component only tracks which row is selected.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::form::TodoListForm;
use crate::core::model::Todo;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Add,
    Edit { index: usize, text: String },
    Toggle(usize),
    Delete(usize),
    Back,
}

pub struct TodoFormState {
    /// Copy of the form's todos (synced from App after every action).
    pub todos: Vec<Todo>,
    pub selected: usize,
    pub list_state: ListState,
    focus_new_todo: bool,
}

impl Default for TodoFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoFormState {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            focus_new_todo: false,
        }
    }

    pub fn sync(&mut self, todos: &[Todo]) {
        if self.todos != todos {
            self.todos = todos.to_vec();
        }
        if self.focus_new_todo {
            // New todos land after the last incomplete one
            self.selected = self.todos.iter().rposition(|t| !t.completed).unwrap_or(0);
            self.focus_new_todo = false;
        }
        self.selected = self.selected.min(self.todos.len().saturating_sub(1));
        self.list_state
            .select((!self.todos.is_empty()).then_some(self.selected));
    }

    /// Forget selection when a different list is opened.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn selected_text(&self) -> Option<&str> {
        self.todos.get(self.selected).map(|t| t.text.as_str())
    }

    fn edit(&self, f: impl FnOnce(&mut String)) -> Option<FormEvent> {
        let mut text = self.selected_text()?.to_string();
        f(&mut text);
        if Some(text.as_str()) == self.selected_text() {
            return None;
        }
        Some(FormEvent::Edit {
            index: self.selected,
            text,
        })
    }
}

impl EventHandler for TodoFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if !self.todos.is_empty() {
                    self.selected = (self.selected + 1).min(self.todos.len() - 1);
                }
                None
            }
            TuiEvent::InputChar(c) => self.edit(|text| text.push(*c)),
            TuiEvent::Paste(pasted) => self.edit(|text| {
                text.push_str(&pasted.replace(['\r', '\n'], " "));
            }),
            TuiEvent::Backspace => self.edit(|text| {
                text.pop();
            }),
            TuiEvent::Submit => {
                self.focus_new_todo = true;
                Some(FormEvent::Add)
            }
            TuiEvent::ToggleTodo => self.selected_text().map(|_| FormEvent::Toggle(self.selected)),
            TuiEvent::DeleteTodo => self.selected_text().map(|_| FormEvent::Delete(self.selected)),
            TuiEvent::Escape | TuiEvent::Tab => Some(FormEvent::Back),
            _ => None,
        }
    }
}

/// Transient render wrapper for the open list.
pub struct TodoForm<'a> {
    state: &'a mut TodoFormState,
    form: &'a TodoListForm,
    title: &'a str,
    focused: bool,
}

impl<'a> TodoForm<'a> {
    pub fn new(
        state: &'a mut TodoFormState,
        form: &'a TodoListForm,
        title: &'a str,
        focused: bool,
    ) -> Self {
        Self {
            state,
            form,
            title,
            focused,
        }
    }
}

impl Component for TodoForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));
        if self.form.is_saving() {
            block = block.title(
                Line::styled(" Saving... ", Style::default().fg(Color::Yellow)).right_aligned(),
            );
        }
        if self.focused {
            block = block.title_bottom(
                Line::from(" Enter Add  ^T Toggle  ^D Delete  Esc Back ").centered(),
            );
        }

        let inner = block.inner(area);

        let items: Vec<ListItem> = self
            .form
            .todos
            .iter()
            .enumerate()
            .map(|(i, todo)| todo_row(i, todo, self.focused && i == self.state.selected))
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);

        if self.focused
            && let Some(todo) = self.form.todos.get(self.state.selected)
        {
            let offset = self.state.list_state.offset();
            let row = self.state.selected.saturating_sub(offset) as u16;
            let prefix = row_prefix(self.state.selected, todo).chars().count();
            let x = inner.x + ((prefix + todo.text.chars().count()) as u16).min(inner.width);
            if row < inner.height {
                frame.set_cursor_position((x, inner.y + row));
            }
        }
    }
}

fn row_prefix(index: usize, todo: &Todo) -> String {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    format!("{}. {} ", index + 1, check)
}

fn todo_row(index: usize, todo: &Todo, selected: bool) -> ListItem<'static> {
    let mut text_style = if todo.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    if selected {
        text_style = text_style.bg(Color::Rgb(40, 40, 40));
    }

    let text = if todo.text.is_empty() && !selected {
        Span::styled("Enter todo...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(todo.text.clone(), text_style)
    };

    ListItem::new(Line::from(vec![
        Span::styled(row_prefix(index, todo), Style::default().fg(Color::Gray)),
        text,
    ]))
}
