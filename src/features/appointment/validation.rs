//! Whole-form field checks. The reminder list is checked by the editor and
//! folded in by the controller as [`Issue::RemindersInPast`].

use crate::features::appointment::fields::{parse_date, parse_time, FormField, FormFields};
use chrono::{DateTime, Local, Utc};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    Required(FormField),
    Malformed(FormField),
    DateInPast,
    StartInPast,
    EndInPast,
    StartNotBeforeEnd,
    RemindersInPast,
}

impl Issue {
    /// Field the issue is annotated on, if any
    pub fn field(&self) -> Option<FormField> {
        match self {
            Issue::Required(field) | Issue::Malformed(field) => Some(*field),
            Issue::DateInPast => Some(FormField::Date),
            Issue::StartInPast | Issue::StartNotBeforeEnd => Some(FormField::StartTime),
            Issue::EndInPast => Some(FormField::EndTime),
            Issue::RemindersInPast => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Required(field) => write!(f, "{} is required", field.label()),
            Issue::Malformed(field) => match field {
                FormField::ChannelUrl => write!(f, "Channel URL must be an http(s) link"),
                _ => write!(f, "{} must look like {}", field.label(), field.placeholder()),
            },
            Issue::DateInPast => write!(f, "Date is in the past"),
            Issue::StartInPast => write!(f, "Start time is in the past"),
            Issue::EndInPast => write!(f, "End time is in the past"),
            Issue::StartNotBeforeEnd => write!(f, "Start must be before the end"),
            Issue::RemindersInPast => write!(f, "A reminder would fire in the past"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    issues: Vec<Issue>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn has(&self, issue: Issue) -> bool {
        self.issues.contains(&issue)
    }

    pub fn issues_for(&self, field: FormField) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.field() == Some(field))
    }

    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(Issue::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// http(s) scheme followed by a non-empty host
pub fn is_valid_channel_url(url: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(url.trim()))
}

/// Check every field against `now`. Calendar comparisons use the local date
/// of `now`; time comparisons use instants.
pub fn validate_fields(fields: &FormFields, now: DateTime<Utc>) -> FormValidation {
    let mut validation = FormValidation::default();

    for field in FormField::all() {
        if field.is_required() && fields.get(*field).trim().is_empty() {
            validation.push(Issue::Required(*field));
        }
    }

    let date = parse_date(&fields.date);
    let start = parse_time(&fields.start_time);
    let end = parse_time(&fields.end_time);

    if !fields.date.trim().is_empty() && date.is_none() {
        validation.push(Issue::Malformed(FormField::Date));
    }
    if !fields.start_time.trim().is_empty() && start.is_none() {
        validation.push(Issue::Malformed(FormField::StartTime));
    }
    if !fields.end_time.trim().is_empty() && end.is_none() {
        validation.push(Issue::Malformed(FormField::EndTime));
    }
    if !fields.channel_url.trim().is_empty() && !is_valid_channel_url(&fields.channel_url) {
        validation.push(Issue::Malformed(FormField::ChannelUrl));
    }

    // Wall-clock times skipped by a DST shift have no instant
    if let Some(date) = date {
        if start.is_some() && fields.start_instant().is_none() {
            validation.push(Issue::Malformed(FormField::StartTime));
        }
        if end.is_some() && fields.end_instant().is_none() {
            validation.push(Issue::Malformed(FormField::EndTime));
        }

        let today = now.with_timezone(&Local).date_naive();
        if date < today {
            validation.push(Issue::DateInPast);
        } else if date == today {
            if fields.start_instant().is_some_and(|t| t < now) {
                validation.push(Issue::StartInPast);
            }
            if fields.end_instant().is_some_and(|t| t < now) {
                validation.push(Issue::EndInPast);
            }
        }
    }

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            validation.push(Issue::StartNotBeforeEnd);
        }
    }

    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fields_on(date: &str, start: &str, end: &str) -> FormFields {
        FormFields {
            title: "Planning".to_string(),
            message: String::new(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            channel_url: "https://teams.example.com/l/channel/abc".to_string(),
        }
    }

    /// 10:00 local on a fixed mid-June day
    fn morning() -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2026, 6, 15, 10, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn tomorrow(now: DateTime<Utc>) -> String {
        (now.with_timezone(&Local) + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_complete_form_is_valid() {
        let now = morning();
        let validation = validate_fields(&fields_on(&tomorrow(now), "09:00", "10:00"), now);
        assert!(validation.is_valid(), "{}", validation.summary());
    }

    #[test]
    fn test_required_fields() {
        let validation = validate_fields(&FormFields::default(), morning());
        assert!(validation.has(Issue::Required(FormField::Title)));
        assert!(validation.has(Issue::Required(FormField::ChannelUrl)));
        assert!(!validation.has(Issue::Required(FormField::Message)));
    }

    #[test]
    fn test_start_equal_to_end_fails() {
        let now = morning();
        let validation = validate_fields(&fields_on(&tomorrow(now), "09:00", "09:00"), now);
        assert!(validation.has(Issue::StartNotBeforeEnd));
        assert_eq!(
            validation.issues_for(FormField::StartTime).count(),
            1
        );
    }

    #[test]
    fn test_date_in_past() {
        let now = morning();
        let yesterday = (now.with_timezone(&Local) - Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let validation = validate_fields(&fields_on(&yesterday, "09:00", "10:00"), now);
        assert!(validation.has(Issue::DateInPast));
    }

    #[test]
    fn test_start_in_past_today() {
        let now = morning();
        let local = now.with_timezone(&Local);
        let earlier = local - Duration::minutes(1);
        let fields = fields_on(
            &local.format("%Y-%m-%d").to_string(),
            &earlier.format("%H:%M").to_string(),
            "23:59",
        );
        let validation = validate_fields(&fields, now);
        assert!(validation.has(Issue::StartInPast));
    }

    #[test]
    fn test_malformed_inputs() {
        let now = morning();
        let mut fields = fields_on("next week", "9 am", "10:00");
        fields.channel_url = "teams channel".to_string();
        let validation = validate_fields(&fields, now);

        assert!(validation.has(Issue::Malformed(FormField::Date)));
        assert!(validation.has(Issue::Malformed(FormField::StartTime)));
        assert!(validation.has(Issue::Malformed(FormField::ChannelUrl)));
        assert!(!validation.has(Issue::Malformed(FormField::EndTime)));
    }

    #[test]
    fn test_channel_url_needs_host() {
        assert!(is_valid_channel_url("https://teams.microsoft.com/l/channel/19%3a"));
        assert!(is_valid_channel_url("http://localhost:8080"));
        assert!(!is_valid_channel_url("https://"));
        assert!(!is_valid_channel_url("mailto:someone@example.org"));
    }
}
