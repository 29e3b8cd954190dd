//! # TUI Application Core
//!
//! Focus handling and text input on top of the form controller.

use crate::features::{FormController, FormField, SubmitAction};
use anyhow::Result;

/// Focusable elements, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    /// Row index into the reminder list
    Reminder(usize),
    AddReminder,
    Schedule,
    Cancel,
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state
pub struct App {
    pub controller: FormController,
    pub focus: Focus,
    pub input_mode: InputMode,
    /// Input buffer for text entry
    pub input_buffer: String,
    pub should_quit: bool,
    /// Local input error, shown in the status bar
    pub error_message: Option<String>,
}

impl App {
    pub fn new(controller: FormController) -> Self {
        App {
            controller,
            focus: Focus::Field(FormField::Title),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            should_quit: false,
            error_message: None,
        }
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = FormField::all().iter().map(|f| Focus::Field(*f)).collect();
        order.extend((0..self.controller.editor().len()).map(Focus::Reminder));
        order.extend([Focus::AddReminder, Focus::Schedule, Focus::Cancel]);
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        if let Some(index) = order.iter().position(|f| *f == self.focus) {
            if index + 1 < order.len() {
                self.focus = order[index + 1];
            }
        }
    }

    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        if let Some(index) = order.iter().position(|f| *f == self.focus) {
            if index > 0 {
                self.focus = order[index - 1];
            }
        }
    }

    /// Enter or Space on the focused element
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Field(_) | Focus::Reminder(_) => self.start_editing(),
            Focus::AddReminder => self.add_reminder(),
            Focus::Schedule => self.start_submission(SubmitAction::Schedule),
            Focus::Cancel => self.start_submission(SubmitAction::Cancel),
        }
    }

    /// Enter editing mode with the current value preloaded
    pub fn start_editing(&mut self) {
        let current = match self.focus {
            Focus::Field(field) => self.controller.fields().get(field).to_string(),
            Focus::Reminder(row) => match self.controller.editor().entries().get(row) {
                Some(entry) if !entry.count_locked() => entry.count().to_string(),
                Some(_) => {
                    self.error_message = Some("Immediate reminders have no count".to_string());
                    return;
                }
                None => return,
            },
            _ => return,
        };
        self.input_buffer = current;
        self.input_mode = InputMode::Editing;
    }

    /// Commit the input buffer to the focused field or reminder count
    pub fn submit_input(&mut self) {
        let input = self.take_input();
        self.input_mode = InputMode::Normal;

        match self.focus {
            Focus::Field(field) => {
                let result = self.controller.set_field(field, input);
                self.report(result);
            }
            Focus::Reminder(row) => {
                let Some(id) = self.reminder_id(row) else {
                    return;
                };
                match input.trim().parse::<u32>() {
                    Ok(count) => {
                        let result = self.controller.set_reminder_count(id, count);
                        self.report(result);
                    }
                    Err(_) => {
                        self.error_message = Some(format!("'{input}' is not a whole number"));
                    }
                }
            }
            _ => {}
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Get and clear input buffer
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input_buffer)
    }

    /// Step the focused reminder's unit forwards or backwards
    pub fn cycle_unit(&mut self, forward: bool) {
        let Focus::Reminder(row) = self.focus else {
            return;
        };
        let Some(entry) = self.controller.editor().entries().get(row) else {
            return;
        };
        let (id, unit) = (entry.id(), entry.unit());
        let next = if forward { unit.next() } else { unit.previous() };
        let result = self.controller.set_reminder_unit(id, next);
        self.report(result);
    }

    pub fn add_reminder(&mut self) {
        match self.controller.add_reminder() {
            Ok(_) => self.focus = Focus::Reminder(self.controller.editor().len() - 1),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Remove the focused reminder and keep focus on a neighbouring row
    pub fn delete_reminder(&mut self) {
        let Focus::Reminder(row) = self.focus else {
            return;
        };
        let Some(id) = self.reminder_id(row) else {
            return;
        };
        let result = self.controller.remove_reminder(id);
        self.report(result);

        let len = self.controller.editor().len();
        self.focus = if len == 0 {
            Focus::AddReminder
        } else {
            Focus::Reminder(row.min(len - 1))
        };
    }

    pub fn start_submission(&mut self, action: SubmitAction) {
        match self.controller.start_submission(action) {
            Ok(_) => self.error_message = None,
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Esc in normal mode: hide the status popup and abort a pending request
    pub fn dismiss(&mut self) {
        self.controller.cancel_pending();
        self.error_message = None;
    }

    pub fn tick(&mut self) {
        self.controller.tick();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.controller.set_visible(visible);
    }

    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Editing
    }

    fn reminder_id(&self, row: usize) -> Option<crate::features::EntryId> {
        self.controller.editor().entries().get(row).map(|e| e.id())
    }

    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.error_message = None,
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, SystemClock};
    use crate::features::{ApiResponse, AppointmentApi, AppointmentPayload, TimeUnit};
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct OfflineApi;

    #[async_trait]
    impl AppointmentApi for OfflineApi {
        async fn send(&self, _: SubmitAction, _: &AppointmentPayload) -> Result<ApiResponse> {
            Err(anyhow::anyhow!("offline"))
        }
    }

    fn app() -> App {
        let mut controller = FormController::new(
            &Config::default(),
            Box::new(MemoryStore::new()),
            Arc::new(OfflineApi),
            Arc::new(SystemClock),
        );
        controller.restore().unwrap();
        App::new(controller)
    }

    #[test]
    fn test_focus_walks_fields_then_reminders() {
        let mut app = app();
        for _ in 0..FormField::all().len() {
            app.focus_next();
        }
        assert_eq!(app.focus, Focus::Reminder(0));

        app.focus_previous();
        assert_eq!(app.focus, Focus::Field(FormField::ChannelUrl));
    }

    #[test]
    fn test_edit_field() {
        let mut app = app();
        app.activate();
        assert!(app.is_editing());
        for c in "Standup".chars() {
            app.input_char(c);
        }
        app.submit_input();

        assert!(!app.is_editing());
        assert_eq!(app.controller.fields().title, "Standup");
    }

    #[test]
    fn test_edit_reminder_count() {
        let mut app = app();
        app.focus = Focus::Reminder(1);
        app.start_editing();
        assert_eq!(app.input_buffer, "10");

        app.input_backspace();
        app.input_backspace();
        app.input_char('5');
        app.submit_input();
        assert_eq!(app.controller.editor().entries()[1].count(), 5);

        app.start_editing();
        app.input_buffer = "soon".to_string();
        app.submit_input();
        assert!(app.error_message.is_some());
        assert_eq!(app.controller.editor().entries()[1].count(), 5);
    }

    #[test]
    fn test_immediate_row_cannot_be_edited() {
        let mut app = app();
        app.focus = Focus::Reminder(4);
        app.start_editing();
        assert!(!app.is_editing());
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_cycle_unit_and_delete() {
        let mut app = app();
        app.focus = Focus::Reminder(0);
        app.cycle_unit(true);
        assert_eq!(app.controller.editor().entries()[0].unit(), TimeUnit::Minutes);

        let before = app.controller.editor().len();
        app.focus = Focus::Reminder(before - 1);
        app.delete_reminder();
        assert_eq!(app.controller.editor().len(), before - 1);
        assert_eq!(app.focus, Focus::Reminder(before - 2));
    }

    #[test]
    fn test_add_reminder_focuses_new_row() {
        let mut app = app();
        app.focus = Focus::AddReminder;
        app.activate();
        let len = app.controller.editor().len();
        assert_eq!(app.focus, Focus::Reminder(len - 1));
    }

    #[test]
    fn test_submit_blocked_on_empty_form() {
        let mut app = app();
        app.focus = Focus::Schedule;
        app.activate();
        assert!(app.error_message.is_some());
        assert!(!app.controller.is_pending());
    }
}
