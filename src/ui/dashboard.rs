//! Dashboard screen rendering
//!
//! Shows one section of the day's dashboard at a time, with section tabs at
//! the top and a status line with key hints and freshness at the bottom.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::App;
use crate::content::{Content, Section};

/// Renders the dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + tabs
            Constraint::Min(3),    // Section body
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    match app.content() {
        Some(content) => render_section(frame, app, &content, chunks[1]),
        None => {
            let empty = Paragraph::new("Nothing to show yet.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, chunks[1]);
        }
    }

    render_status(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Section::ALL
        .iter()
        .map(|section| Line::from(section.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " AYUMI · Walking with God ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .select(app.selected_section)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_section(frame: &mut Frame, app: &App, content: &Content, area: Rect) {
    let section = app.current_section();
    let paragraph = Paragraph::new(section_lines(content, section))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", section.title())),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    frame.render_widget(paragraph, area);
}

/// Builds styled lines for one section
///
/// Labelled entries get a bold label line followed by the body; unlabelled
/// entries are list items.
pub fn section_lines(content: &Content, section: Section) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (label, body) in content.section_lines(section) {
        if label.is_empty() {
            lines.push(Line::from(Span::raw(format!("  {}", body))));
            continue;
        }
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        if !body.is_empty() {
            lines.push(Line::from(body));
        }
    }
    lines
}

/// Renders key hints plus refresh status at the bottom of the screen
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Section  "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if app.is_refreshing() {
        spans.push(Span::styled(
            " │ Refreshing...",
            Style::default().fg(Color::Cyan),
        ));
    } else if let Some(last_refresh) = app.last_refresh {
        let mins_ago = (Local::now() - last_refresh).num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Updated just now".to_string()
        } else {
            format!(" │ Updated {}m ago", mins_ago)
        };
        spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
