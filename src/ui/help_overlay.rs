//! Key binding reference drawn over the current screen

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

/// Groups of (keys, action) shown in the overlay
const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Reading",
        &[
            ("←/h  →/l", "Previous or next section"),
            ("Tab", "Next section"),
            ("↑/k  ↓/j", "Scroll"),
            ("g", "Back to top"),
        ],
    ),
    (
        "Other",
        &[
            ("r", "Fetch a fresh dashboard"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
];

const WIDTH: u16 = 50;

pub fn render(frame: &mut Frame) {
    let lines = overlay_lines();
    // Borders take one row above and below
    let height = lines.len() as u16 + 2;
    let area = centered_rect(WIDTH, height, frame.area());

    let overlay = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(overlay, area);
}

fn overlay_lines() -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::styled("Keyboard Shortcuts", bold.fg(Color::Cyan))];

    for (group, bindings) in BINDINGS {
        lines.push(Line::default());
        lines.push(Line::styled(*group, bold));
        lines.extend(bindings.iter().map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        }));
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_help_overlay_renders() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("Help"), "Should render help title");
        assert!(content.contains("Reading"), "Should show reading section");
        assert!(content.contains("Fetch a fresh dashboard"));
    }

    #[test]
    fn test_every_binding_has_a_line() {
        let lines: Vec<String> = overlay_lines().iter().map(|l| l.to_string()).collect();

        for (_, bindings) in BINDINGS {
            for (_, action) in *bindings {
                assert!(lines.iter().any(|line| line.ends_with(action)), "missing {}", action);
            }
        }
    }
}
