//! # Reminder Form TUI
//!
//! Terminal front end for scheduling and cancelling appointment reminders.
//!
//! Usage: `cargo run --features tui --bin reminder-tui`

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use reminder_form::tui::event::{map_key_event, KeyAction};
use reminder_form::tui::{App, Event, EventHandler};
use reminder_form::{
    Config, FormController, HttpAppointmentApi, SqliteStore, SubmitAction, SystemClock,
};

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("Starting reminder form TUI...");

    let config = Config::from_env()?;

    let store = SqliteStore::open(&config.store_path)?;
    let api = HttpAppointmentApi::new(&config)?;
    let mut controller = FormController::new(
        &config,
        Box::new(store),
        Arc::new(api),
        Arc::new(SystemClock),
    );
    controller.restore()?;
    controller.start_sweep();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);
    let (mut events, _event_tx) = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    app.controller.stop_sweep();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {}", e);
        return Err(e);
    }

    info!("Reminder form TUI shutdown complete");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            reminder_form::tui::ui::render(frame, app);
        })?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = map_key_event(key, app.is_editing());
                    handle_action(app, action);
                }
                Event::Tick => app.tick(),
                Event::FocusGained => app.set_visible(true),
                Event::FocusLost => app.set_visible(false),
                Event::Resize(_, _) => {
                    // Terminal will redraw automatically
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: KeyAction) {
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::Up => app.focus_previous(),
        KeyAction::Down => app.focus_next(),
        KeyAction::Select => app.activate(),
        KeyAction::Back => app.dismiss(),
        KeyAction::UnitPrevious => app.cycle_unit(false),
        KeyAction::UnitNext => app.cycle_unit(true),
        KeyAction::AddReminder => app.add_reminder(),
        KeyAction::Delete => app.delete_reminder(),
        KeyAction::Schedule => app.start_submission(SubmitAction::Schedule),
        KeyAction::CancelAppointment => app.start_submission(SubmitAction::Cancel),
        KeyAction::SubmitInput => app.submit_input(),
        KeyAction::CancelInput => app.cancel_input(),
        KeyAction::Char(c) => app.input_char(c),
        KeyAction::Backspace => app.input_backspace(),
        KeyAction::None => {}
    }
}
