//! Error kinds callers branch on. Everything else travels as `anyhow::Error`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no reminder with id {0}")]
    UnknownEntry(Uuid),
    #[error("reminder {0} fires immediately, its count cannot be edited")]
    CountLocked(Uuid),
    #[error("malformed reminder list: {0}")]
    MalformedList(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Invalid(String),
    #[error("submit and cancel are disabled")]
    ControlsDisabled,
    #[error("no request is in flight")]
    NothingPending,
}
