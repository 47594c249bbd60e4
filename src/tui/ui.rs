use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ListBrowser, TitleBar, TitleDialog, TodoForm};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, snackbar_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(tui.api_url.clone(), app.status_message.clone());
    title_bar.render(frame, title_area);

    if let Some(error_msg) = &app.load_error {
        draw_error_view(frame, main_area, error_msg);
    } else if app.is_loading && app.lists.is_empty() {
        draw_centered(frame, main_area, "Loading todo lists...");
    } else {
        let [browser_area, form_area] =
            Layout::horizontal([Percentage(35), Min(0)]).areas(main_area);

        let lists = app.lists.values().collect();
        ListBrowser::new(
            &mut tui.browser,
            lists,
            app.active_list.as_deref(),
            tui.focus == Focus::Browser && tui.dialog.is_none(),
        )
        .render(frame, browser_area);

        match (&app.form, app.active()) {
            (Some(form), Some(list)) => {
                TodoForm::new(
                    &mut tui.form,
                    form,
                    &list.title,
                    tui.focus == Focus::Form && tui.dialog.is_none(),
                )
                .render(frame, form_area);
            }
            _ => draw_centered(frame, form_area, "Select a list to start editing"),
        }
    }

    draw_snackbar(frame, snackbar_area, app);

    if let Some(dialog) = &tui.dialog {
        TitleDialog::new(dialog).render(frame, frame.area());
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(vec![
        Line::styled(error_msg.to_string(), Style::default().fg(Color::Red)),
        Line::from(""),
        Line::styled("Press r to retry", Style::default().fg(Color::DarkGray)),
    ])
    .block(Block::bordered().title("ERROR"))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn draw_centered(frame: &mut Frame, area: Rect, text: &str) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, middle);
}

/// Bottom line: save errors take priority over banners.
fn draw_snackbar(frame: &mut Frame, area: Rect, app: &App) {
    let message = app
        .form
        .as_ref()
        .and_then(|form| form.error())
        .or(app.banner.as_deref());

    if let Some(message) = message {
        let span = Span::styled(
            format!(" {} ", message),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Paragraph::new(Line::from(span)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::form::SaveStatus;
    use crate::test_support::{sample_list, test_app};
    use crate::tui::components::TitleDialogState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        tui.sync(app);
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn tui() -> TuiState {
        TuiState::new("http://localhost:3001/api".to_string())
    }

    #[test]
    fn test_loading_view() {
        let app = App::new();
        let text = render(&app, &mut tui());
        assert!(text.contains("Loading todo lists..."));
    }

    #[test]
    fn test_load_error_view_offers_retry() {
        let mut app = App::new();
        app.is_loading = false;
        app.load_error = Some("Failed to load todo lists. Please try again later.".to_string());
        let text = render(&app, &mut tui());
        assert!(text.contains("Failed to load todo lists"));
        assert!(text.contains("Press r to retry"));
    }

    #[test]
    fn test_empty_state_message() {
        let app = test_app(vec![]);
        let text = render(&app, &mut tui());
        // Wrapped inside the narrow browser pane
        assert!(text.contains("No todo lists yet."));
        assert!(text.contains("to get started!"));
    }

    #[test]
    fn test_open_list_shows_numbered_todos() {
        let mut app = test_app(vec![
            sample_list("1", "Chores", &["dishes", "laundry"]),
            sample_list("2", "Errands", &[]),
        ]);
        update(&mut app, Action::SelectList("1".to_string()));
        update(&mut app, Action::ToggleTodo(0));

        let text = render(&app, &mut tui());
        assert!(text.contains("Chores"));
        assert!(text.contains("Errands"));
        assert!(text.contains("1. [ ] laundry"));
        assert!(text.contains("2. [x] dishes"));
    }

    #[test]
    fn test_saving_indicator_and_error_snackbar() {
        let mut app = test_app(vec![sample_list("1", "Chores", &["dishes"])]);
        update(&mut app, Action::SelectList("1".to_string()));

        app.form.as_mut().unwrap().status = SaveStatus::Saving;
        assert!(render(&app, &mut tui()).contains("Saving..."));

        app.form.as_mut().unwrap().save_failed();
        assert!(render(&app, &mut tui()).contains("Failed to save changes"));
    }

    #[test]
    fn test_banner_and_dialog_render() {
        let mut app = test_app(vec![sample_list("1", "Chores", &[])]);
        app.banner = Some("Failed to rename list. Please try again.".to_string());
        let mut tui = tui();
        tui.dialog = Some(TitleDialogState::rename("1".to_string(), "Chores"));

        let text = render(&app, &mut tui);
        assert!(text.contains("Failed to rename list. Please try again."));
        assert!(text.contains("Rename List"));
    }
}
