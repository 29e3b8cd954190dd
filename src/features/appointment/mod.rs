//! # Appointment Feature
//!
//! The appointment form: fields, whole-form validation, the request payload
//! and the controller that submits it to the reminder service.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Abortable requests with per-action timeouts
//! - 1.1.0: Cancel requests and the validity sweep
//! - 1.0.0: Initial release

pub mod api;
pub mod controller;
pub mod fields;
pub mod payload;
pub mod status;
pub mod sweep;
pub mod validation;

pub use api::{
    interpret_response, ApiResponse, AppointmentApi, HttpAppointmentApi, SubmitAction,
    SubmitOutcome,
};
pub use controller::FormController;
pub use fields::{FormField, FormFields, REMINDERS_STORAGE_KEY};
pub use payload::AppointmentPayload;
pub use status::{StatusKind, StatusMessage};
pub use sweep::ValiditySweep;
pub use validation::{validate_fields, FormValidation, Issue};
