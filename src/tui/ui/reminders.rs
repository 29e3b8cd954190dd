//! # Reminders UI
//!
//! One row per reminder: count, unit selector and a marker for entries that
//! would fire in the past.

use crate::features::{Issue, ReminderEntry};
use crate::tui::app::{Focus, InputMode};
use crate::tui::ui::{focus_style, titled_block};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem};

/// Render the reminder list
pub fn render_reminders(frame: &mut Frame, app: &App, area: Rect) {
    let editor = app.controller.editor();

    let mut items: Vec<ListItem> = editor
        .entries()
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            let focused = app.focus == Focus::Reminder(row);
            let editing = focused && app.input_mode == InputMode::Editing;
            ListItem::new(reminder_line(entry, focused, editing, &app.input_buffer))
        })
        .collect();

    items.push(ListItem::new(Line::from(Span::styled(
        "  + Add reminder",
        focus_style(app.focus == Focus::AddReminder),
    ))));

    if app.controller.validation().has(Issue::RemindersInPast) {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {}", Issue::RemindersInPast),
            Style::default().fg(Color::Red),
        ))));
    }

    let title = format!("Reminders ({})", editor.len());
    let list = List::new(items).block(titled_block(&title));
    frame.render_widget(list, area);
}

fn reminder_line(entry: &ReminderEntry, focused: bool, editing: bool, buffer: &str) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let style = if entry.is_invalid() {
        Style::default().fg(Color::Red)
    } else {
        focus_style(focused)
    };

    let count = if entry.count_locked() {
        Span::styled("   -", Style::default().fg(Color::DarkGray))
    } else if editing {
        Span::styled(format!("{buffer:>4}▏"), Style::default().fg(Color::Cyan))
    } else {
        Span::styled(format!("{:>4}", entry.count()), style)
    };

    let suffix = if entry.unit().is_immediate() { "" } else { " before" };
    Line::from(vec![
        Span::styled(marker, style),
        count,
        Span::styled(format!(" ◂ {} ▸{suffix}", entry.unit().label()), style),
    ])
}
