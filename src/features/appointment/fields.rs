use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::str::FromStr;

/// Storage key of the serialized reminder list
pub const REMINDERS_STORAGE_KEY: &str = "teams-reminder-reminders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Message,
    Date,
    StartTime,
    EndTime,
    ChannelUrl,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Title,
            FormField::Message,
            FormField::Date,
            FormField::StartTime,
            FormField::EndTime,
            FormField::ChannelUrl,
        ]
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            FormField::Title => "teams-reminder-title",
            FormField::Message => "teams-reminder-message",
            FormField::Date => "teams-reminder-date",
            FormField::StartTime => "teams-reminder-start-time",
            FormField::EndTime => "teams-reminder-end-time",
            FormField::ChannelUrl => "teams-reminder-channel-url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Message => "Message",
            FormField::Date => "Date",
            FormField::StartTime => "Start",
            FormField::EndTime => "End",
            FormField::ChannelUrl => "Channel URL",
        }
    }

    /// Input hint shown next to empty fields
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Date => "YYYY-MM-DD",
            FormField::StartTime | FormField::EndTime => "HH:MM",
            FormField::ChannelUrl => "https://...",
            _ => "",
        }
    }

    pub fn is_required(self) -> bool {
        self != FormField::Message
    }
}

impl FromStr for FormField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "message" => Ok(FormField::Message),
            "date" => Ok(FormField::Date),
            "start" | "start-time" => Ok(FormField::StartTime),
            "end" | "end-time" => Ok(FormField::EndTime),
            "channel" | "channel-url" => Ok(FormField::ChannelUrl),
            other => Err(anyhow::anyhow!("Unknown field '{other}'")),
        }
    }
}

/// Raw field values exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub message: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub channel_url: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Message => &self.message,
            FormField::Date => &self.date,
            FormField::StartTime => &self.start_time,
            FormField::EndTime => &self.end_time,
            FormField::ChannelUrl => &self.channel_url,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Message => &mut self.message,
            FormField::Date => &mut self.date,
            FormField::StartTime => &mut self.start_time,
            FormField::EndTime => &mut self.end_time,
            FormField::ChannelUrl => &mut self.channel_url,
        };
        *slot = value;
    }

    pub fn date_value(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Appointment start as an instant, from the local date and start time
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        local_instant(self.date_value()?, parse_time(&self.start_time)?)
    }

    pub fn end_instant(&self) -> Option<DateTime<Utc>> {
        local_instant(self.date_value()?, parse_time(&self.end_time)?)
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Resolve a local wall-clock time. Ambiguous times (DST fall-back) take the
/// earlier instant; times skipped by DST do not exist and give `None`.
pub fn local_instant(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_date("2026-03-01"), NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(parse_date("01.03.2026"), None);
        assert_eq!(parse_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_time("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn test_start_instant_is_local() {
        let fields = FormFields {
            date: "2026-06-15".to_string(),
            start_time: "09:00".to_string(),
            ..FormFields::default()
        };
        let instant = fields.start_instant().unwrap();
        let local = instant.with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 6, 15).unwrap());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_parts_give_no_instant() {
        let fields = FormFields {
            date: "2026-06-15".to_string(),
            ..FormFields::default()
        };
        assert_eq!(fields.start_instant(), None);
        assert_eq!(fields.end_instant(), None);
    }

    #[test]
    fn test_get_set() {
        let mut fields = FormFields::default();
        for field in FormField::all() {
            fields.set(*field, field.label().to_string());
        }
        assert_eq!(fields.get(FormField::ChannelUrl), "Channel URL");
        assert_eq!(fields.title, "Title");
    }

    #[test]
    fn test_field_names() {
        assert_eq!("start".parse::<FormField>().unwrap(), FormField::StartTime);
        assert_eq!("Channel".parse::<FormField>().unwrap(), FormField::ChannelUrl);
        assert!("location".parse::<FormField>().is_err());
    }
}
