//! UI rendering module for Ayumi
//!
//! Terminal rendering for the interactive view, using ratatui, plus plain
//! text formatting for `--print`.

pub mod dashboard;
pub mod help_overlay;
pub mod text;

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::gate::DisplayState;

pub use help_overlay::render as render_help_overlay;
pub use text::{devotional_text, plain_text};

/// Renders the UI based on the current display state
pub fn render(frame: &mut Frame, app: &App) {
    match app.display_state() {
        DisplayState::Loading => render_loading(frame),
        DisplayState::Ready => dashboard::render(frame, app),
        DisplayState::Error => render_error(frame),
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Renders a loading message while the dashboard is being resolved
fn render_loading(frame: &mut Frame) {
    let loading_text = Paragraph::new("Preparing today's walk...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, centered_line(frame.area()));
}

fn render_error(frame: &mut Frame) {
    let error_text = Paragraph::new("The path is momentarily obscured. Press r to retry.")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    frame.render_widget(error_text, centered_line(frame.area()));
}

/// Vertically centered band for a short message
fn centered_line(area: Rect) -> Rect {
    centered_rect(area.width, 3, area)
}

/// Rect of at most `width` x `height` centered in `area`
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DelayedProvider;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_screen_before_anything_is_published() {
        let provider = Arc::new(DelayedProvider::new(Duration::from_secs(10), false));
        let app = App::with_provider(provider, Duration::from_millis(1500));

        assert!(draw(&app).contains("Preparing today's walk"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_replaces_loading_screen() {
        let provider = Arc::new(DelayedProvider::new(Duration::from_secs(10), false));
        let app = App::with_provider(provider, Duration::from_millis(1500));

        tokio::time::sleep(Duration::from_millis(1600)).await;

        let text = draw(&app);
        assert!(!text.contains("Preparing today's walk"));
        assert!(text.contains("AYUMI"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_overlay_drawn_on_top() {
        let provider = Arc::new(DelayedProvider::new(Duration::ZERO, false));
        let mut app = App::with_provider(provider, Duration::from_millis(1500));
        app.start(false);
        app.wait_for_resolution().await;
        app.show_help = true;

        assert!(draw(&app).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_centered_rect_is_clamped_and_centered() {
        let area = Rect::new(0, 0, 30, 10);

        let small = centered_rect(10, 4, area);
        assert_eq!(small, Rect::new(10, 3, 10, 4));

        let oversized = centered_rect(50, 16, area);
        assert_eq!(oversized, area);
    }
}
