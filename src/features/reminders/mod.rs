//! # Reminders Feature
//!
//! Lead-time reminder entries and the editor that keeps them valid against
//! the appointment start.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod editor;
pub mod entry;
pub mod unit;

pub use editor::{EditorAttribute, ReminderChange, ReminderEditor};
pub use entry::{EntryId, ReminderEntry, ReminderSpec, DEFAULT_REMINDERS};
pub use unit::TimeUnit;
