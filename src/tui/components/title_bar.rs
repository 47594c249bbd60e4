//! # TitleBar Component
//!
//! Top status bar showing which server the client talks to and the latest
//! status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(config.api_url.clone(), app.status_message.clone());
//! title_bar.render(frame, area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
pub struct TitleBar {
    /// Base URL of the REST API
    pub api_url: String,
    /// Status message (e.g., "Loading...", "Saved")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(api_url: String, status_message: String) -> Self {
        Self {
            api_url,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("Todo Lists ({})", self.api_url)
        } else {
            format!("Todo Lists ({}) | {}", self.api_url, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
