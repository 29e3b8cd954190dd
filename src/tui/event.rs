//! # TUI Event Handling
//!
//! Keyboard input, focus changes and tick event handling.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Terminal window gained focus
    FocusGained,
    /// Terminal window lost focus
    FocusLost,
    /// Tick for periodic updates
    Tick,
}

/// Event handler that combines keyboard, focus, and tick events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let input_tx = tx.clone();
        std::thread::spawn(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                    Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                    Ok(CrosstermEvent::FocusGained) => Event::FocusGained,
                    Ok(CrosstermEvent::FocusLost) => Event::FocusLost,
                    _ => continue,
                }
            } else {
                // Send tick on poll timeout
                Event::Tick
            };

            if input_tx.send(event).is_err() {
                break;
            }
        });

        (EventHandler { rx }, tx)
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    /// Move focus up
    Up,
    /// Move focus down
    Down,
    /// Edit the focused field or press the focused button
    Select,
    /// Dismiss the status popup, aborting a request in flight
    Back,
    /// Previous time unit on the focused reminder
    UnitPrevious,
    /// Next time unit on the focused reminder
    UnitNext,
    AddReminder,
    /// Remove the focused reminder
    Delete,
    Schedule,
    CancelAppointment,
    SubmitInput,
    CancelInput,
    Char(char),
    Backspace,
}

/// Map a key event to an action
pub fn map_key_event(key: KeyEvent, in_edit_mode: bool) -> KeyAction {
    if in_edit_mode {
        match key.code {
            KeyCode::Esc => KeyAction::CancelInput,
            KeyCode::Enter => KeyAction::SubmitInput,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(c) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    } else {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::BackTab, _) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Select,
            (KeyCode::Esc, _) => KeyAction::Back,

            // Reminder rows
            (KeyCode::Left, KeyModifiers::NONE) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                KeyAction::UnitPrevious
            }
            (KeyCode::Right, KeyModifiers::NONE) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                KeyAction::UnitNext
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::AddReminder,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,

            // Requests
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::Schedule,
            (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::CancelAppointment,

            _ => KeyAction::None,
        }
    }
}
