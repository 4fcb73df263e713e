//! Plain text formatting for non-interactive output

use std::fmt::Write;

use crate::content::{Content, Section};

/// Formats every section of the dashboard as plain text
pub fn plain_text(content: &Content) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AYUMI · Walking with God");
    let _ = writeln!(out, "Generated {}", content.date);

    for section in Section::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", section.title());
        for (label, body) in content.section_lines(section) {
            match (label.is_empty(), body.is_empty()) {
                (true, _) => {
                    let _ = writeln!(out, "  {}", body);
                }
                (false, true) => {
                    let _ = writeln!(out, "{}:", label);
                }
                (false, false) => {
                    let _ = writeln!(out, "{}: {}", label, body);
                }
            }
        }
    }
    out
}

/// Formats only the devotional reading
pub fn devotional_text(content: &Content) -> String {
    let view = content.devotional_view();
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "\"{}\" ({})", view.scripture.text, view.scripture.reference);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.reflection);
    let _ = writeln!(out);
    let _ = writeln!(out, "Prayer: {}", view.prayer);
    let _ = writeln!(out, "Step of faith: {}", view.step_of_faith);
    out
}
