// Core layer - configuration, clock and error types
pub mod core;

// Features layer - reminder editor and appointment form
pub mod features;

// Persistence layer - key/value store for form fields
pub mod storage;

// TUI layer - terminal user interface (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

pub use core::{Clock, Config, SystemClock};

pub use features::{
    // Appointment form
    AppointmentApi, FormController, FormField, HttpAppointmentApi, SubmitAction, SubmitOutcome,
    // Reminders
    ReminderEditor, TimeUnit,
};

pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
