use crate::features::appointment::fields::FormFields;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Request body shared by schedule and cancel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentPayload {
    #[serde(serialize_with = "serialize_utc")]
    pub begin_datetime: DateTime<Utc>,
    #[serde(serialize_with = "serialize_utc")]
    pub end_datetime: DateTime<Utc>,
    pub title: String,
    pub message: String,
    pub channel_url: String,
    /// Seconds before the start; -1 fires immediately
    pub reminders: Vec<i64>,
}

impl AppointmentPayload {
    /// `None` while the date or either time does not parse
    pub fn build(fields: &FormFields, reminders: Vec<i64>) -> Option<Self> {
        Some(AppointmentPayload {
            begin_datetime: fields.start_instant()?,
            end_datetime: fields.end_instant()?,
            title: fields.title.clone(),
            message: fields.message.clone(),
            channel_url: fields.channel_url.clone(),
            reminders,
        })
    }
}

/// `2026-10-17T07:00:00.000Z`
fn serialize_utc<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
