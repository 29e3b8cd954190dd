//! # Core Module
//!
//! Configuration, the shared clock and typed errors.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add clock module so validation and the sweep share one "now"
//! - 1.0.0: Initial creation with config module

pub mod clock;
pub mod config;
pub mod error;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CancelMode, Config};
pub use error::{EditorError, SubmitError};
