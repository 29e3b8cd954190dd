//! # TUI Module
//!
//! Terminal front end for the appointment form and its reminder editor.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Pause the validity sweep while the terminal is unfocused
//! - 1.0.0: Initial form and reminder list screens

pub mod app;
pub mod event;
pub mod ui;

pub use app::{App, Focus, InputMode};
pub use event::{Event, EventHandler};
