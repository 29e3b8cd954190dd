//! # TUI UI Components
//!
//! Ratatui-based rendering of the form, the reminder list and the status popup.

mod form;
mod reminders;

pub use form::render_form;
pub use reminders::render_reminders;

use crate::features::StatusKind;
use crate::tui::app::InputMode;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[0]);

    render_form(frame, app, panes[0]);
    render_reminders(frame, app, panes[1]);
    render_status_bar(frame, app, chunks[1]);

    if app.controller.status().is_some() {
        render_status_popup(frame, app);
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let validity = if app.controller.controls_enabled() {
        Span::styled("● Ready", Style::default().fg(Color::Green))
    } else if app.controller.is_pending() {
        Span::styled("● Sending", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("● Incomplete", Style::default().fg(Color::Red))
    };

    let mode_status = match app.input_mode {
        InputMode::Normal => Span::raw(""),
        InputMode::Editing => Span::styled(
            " [EDITING] ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    };

    let message = match &app.error_message {
        Some(err) => Span::styled(format!(" Error: {} ", err), Style::default().fg(Color::Red)),
        None => Span::raw(""),
    };

    let help_hint = Span::styled(
        " Enter:Edit ←→:Unit a:Add d:Delete s:Schedule x:Cancel Esc:Dismiss q:Quit ",
        Style::default().fg(Color::Gray),
    );

    let status_line = Line::from(vec![
        validity,
        Span::raw(" | "),
        mode_status,
        message,
        Span::raw(" "),
        help_hint,
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_status_popup(frame: &mut Frame, app: &App) {
    let Some(status) = app.controller.status() else {
        return;
    };

    let (title, color) = match status.kind {
        StatusKind::Busy => (" Please wait ", Color::Yellow),
        StatusKind::Info => (" Done ", Color::Green),
        StatusKind::Error => (" Error ", Color::Red),
    };
    let hint = match status.kind {
        StatusKind::Busy => "Esc to abort",
        _ => "Esc to dismiss",
    };

    let area = centered_rect(50, 7, frame.area());
    let text = vec![
        Line::from(status.text.as_str()),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Rectangle of `percent_x` width and `height` rows centred in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

/// Style for the focused element
pub fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
