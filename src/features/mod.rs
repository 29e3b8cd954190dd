//! # Features
//!
//! | Feature | Module |
//! |---------|--------|
//! | Reminder editor | [`reminders`] |
//! | Appointment form | [`appointment`] |

pub mod appointment;
pub mod reminders;

pub use appointment::{
    ApiResponse, AppointmentApi, AppointmentPayload, FormController, FormField, FormFields,
    FormValidation, HttpAppointmentApi, Issue, StatusKind, StatusMessage, SubmitAction,
    SubmitOutcome,
};
pub use reminders::{
    EditorAttribute, EntryId, ReminderChange, ReminderEditor, ReminderEntry, ReminderSpec,
    TimeUnit, DEFAULT_REMINDERS,
};
