//! # Appointment Service Client
//!
//! Sends schedule and cancel requests to the local reminder service and turns
//! its replies into a [`SubmitOutcome`].
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Accept list-valued `error` fields and `DELETE`-based cancel
//! - 1.0.0: Initial release

use crate::core::{CancelMode, Config};
use crate::features::appointment::payload::AppointmentPayload;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Schedule,
    Cancel,
}

impl SubmitAction {
    pub fn busy_text(self) -> &'static str {
        match self {
            SubmitAction::Schedule => "Scheduling reminders...",
            SubmitAction::Cancel => "Cancelling appointment...",
        }
    }

    fn rejected_text(self) -> &'static str {
        match self {
            SubmitAction::Schedule => "Scheduling reminders failed",
            SubmitAction::Cancel => "Cancelling the appointment failed",
        }
    }
}

/// Status code and raw body of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait AppointmentApi: Send + Sync {
    /// Issue exactly one request. Timeouts and aborts are applied by the caller.
    async fn send(&self, action: SubmitAction, payload: &AppointmentPayload) -> Result<ApiResponse>;
}

pub struct HttpAppointmentApi {
    client: reqwest::Client,
    schedule_url: String,
    cancel_url: String,
    cancel_mode: CancelMode,
}

impl HttpAppointmentApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("reminder-form/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpAppointmentApi {
            client,
            schedule_url: config.schedule_url.clone(),
            cancel_url: config.cancel_url.clone(),
            cancel_mode: config.cancel_mode,
        })
    }
}

#[async_trait]
impl AppointmentApi for HttpAppointmentApi {
    async fn send(&self, action: SubmitAction, payload: &AppointmentPayload) -> Result<ApiResponse> {
        let request = match (action, self.cancel_mode) {
            (SubmitAction::Schedule, _) => self.client.post(&self.schedule_url),
            (SubmitAction::Cancel, CancelMode::Post) => self.client.post(&self.cancel_url),
            (SubmitAction::Cancel, CancelMode::Delete) => self.client.delete(&self.schedule_url),
        };

        debug!("Sending {action:?} request with {} reminders", payload.reminders.len());

        let response = request.json(payload).send().await.map_err(|e| {
            if e.is_connect() {
                anyhow!("Could not connect to the reminder service")
            } else {
                anyhow!("HTTP request failed: {e}")
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Terminal result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// `removed` counts cancelled reminders on a cancel request
    Succeeded {
        action: SubmitAction,
        removed: Option<usize>,
    },
    /// 2xx reply with `success: false`
    Rejected { action: SubmitAction, message: String },
    /// Non-2xx reply carrying an error message
    HttpError {
        action: SubmitAction,
        status: u16,
        message: String,
    },
    /// Reply body could not be understood
    Malformed { action: SubmitAction, status: u16 },
    TransportFailed { action: SubmitAction, message: String },
    TimedOut { action: SubmitAction, after: Duration },
    Aborted { action: SubmitAction },
}

impl SubmitOutcome {
    pub fn action(&self) -> SubmitAction {
        match self {
            SubmitOutcome::Succeeded { action, .. }
            | SubmitOutcome::Rejected { action, .. }
            | SubmitOutcome::HttpError { action, .. }
            | SubmitOutcome::Malformed { action, .. }
            | SubmitOutcome::TransportFailed { action, .. }
            | SubmitOutcome::TimedOut { action, .. }
            | SubmitOutcome::Aborted { action } => *action,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded { .. })
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            SubmitOutcome::Succeeded {
                action: SubmitAction::Schedule,
                ..
            } => "Reminders scheduled.".to_string(),
            SubmitOutcome::Succeeded {
                action: SubmitAction::Cancel,
                removed: Some(n),
            } if *n > 0 => format!("Appointment cancelled, {n} reminder(s) removed."),
            SubmitOutcome::Succeeded { .. } => {
                "No scheduled reminders found for this appointment.".to_string()
            }
            SubmitOutcome::Rejected { action, message } => {
                format!("{}: {message}", action.rejected_text())
            }
            SubmitOutcome::HttpError {
                status, message, ..
            } => format!("Request failed with code {status}: {message}"),
            SubmitOutcome::Malformed { status, .. } => {
                format!("Request failed with code {status}.")
            }
            SubmitOutcome::TransportFailed { message, .. } => format!("Sending failed: {message}"),
            SubmitOutcome::TimedOut { after, .. } => {
                format!("Sending failed: no reply within {} s", after.as_secs())
            }
            SubmitOutcome::Aborted { .. } => "Sending cancelled.".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<ErrorField>,
    #[serde(default)]
    reminders: Option<Vec<serde_json::Value>>,
}

/// The service reports errors as a string, a list of strings, or `{message}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    List(Vec<String>),
    Detailed { message: String },
}

impl ErrorField {
    fn message(self) -> String {
        match self {
            ErrorField::Text(text) => text,
            ErrorField::List(items) => items.join("; "),
            ErrorField::Detailed { message } => message,
        }
    }
}

pub fn interpret_response(action: SubmitAction, response: &ApiResponse) -> SubmitOutcome {
    let status = response.status;
    let parsed = serde_json::from_str::<ReplyBody>(&response.body);

    if !response.is_success() {
        return match parsed.ok().and_then(|body| body.error) {
            Some(error) => SubmitOutcome::HttpError {
                action,
                status,
                message: error.message(),
            },
            None => {
                error!(
                    "Unreadable error reply (HTTP {status}) for {action:?}: {}",
                    response.body
                );
                SubmitOutcome::Malformed { action, status }
            }
        };
    }

    match parsed {
        Ok(body) if body.success => SubmitOutcome::Succeeded {
            action,
            removed: match action {
                SubmitAction::Cancel => Some(body.reminders.map_or(0, |r| r.len())),
                SubmitAction::Schedule => None,
            },
        },
        Ok(body) => SubmitOutcome::Rejected {
            action,
            message: body
                .error
                .map(ErrorField::message)
                .unwrap_or_else(|| "unknown error".to_string()),
        },
        Err(e) => {
            error!("Unreadable reply (HTTP {status}) for {action:?}: {e}");
            SubmitOutcome::Malformed { action, status }
        }
    }
}
