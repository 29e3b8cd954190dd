use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// A request is in flight
    Busy,
    /// Confirmation, dismissed automatically
    Info,
    Error,
}

impl StatusKind {
    /// Busy and confirmation statuses keep submit and cancel disabled
    pub fn blocks_controls(self) -> bool {
        matches!(self, StatusKind::Busy | StatusKind::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub dismiss_at: Option<Instant>,
}

impl StatusMessage {
    pub fn busy(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Busy,
            dismiss_at: None,
        }
    }

    pub fn info_until(text: impl Into<String>, dismiss_at: Instant) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
            dismiss_at: Some(dismiss_at),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
            dismiss_at: None,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.dismiss_at.is_some_and(|at| now >= at)
    }
}
