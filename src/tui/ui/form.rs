//! # Form UI
//!
//! Appointment fields with their validation messages and the two buttons.

use crate::features::FormField;
use crate::tui::app::{Focus, InputMode};
use crate::tui::ui::{focus_style, titled_block};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the appointment form
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let fields = app.controller.fields();
    let validation = app.controller.validation();
    let mut lines = Vec::new();

    for field in FormField::all() {
        let focused = app.focus == Focus::Field(*field);
        let editing = focused && app.input_mode == InputMode::Editing;

        let marker = if focused { "▶ " } else { "  " };
        let required = if field.is_required() { "*" } else { " " };
        let label = Span::styled(
            format!("{marker}{:<12}{required} ", field.label()),
            focus_style(focused),
        );

        let value = if editing {
            Span::styled(
                format!("{}▏", app.input_buffer),
                Style::default().fg(Color::Cyan),
            )
        } else if fields.get(*field).is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(fields.get(*field))
        };
        lines.push(Line::from(vec![label, value]));

        for issue in validation.issues_for(*field) {
            lines.push(Line::from(Span::styled(
                format!("                 {issue}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    let enabled = app.controller.controls_enabled();
    lines.push(Line::from(vec![
        button("Schedule", app.focus == Focus::Schedule, enabled),
        Span::raw("  "),
        button("Cancel appointment", app.focus == Focus::Cancel, enabled),
    ]));

    let paragraph = Paragraph::new(lines).block(titled_block("Appointment"));
    frame.render_widget(paragraph, area);
}

fn button(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let style = match (enabled, focused) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Black).bg(Color::Gray),
    };
    Span::styled(format!(" {label} "), style)
}
