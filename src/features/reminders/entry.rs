use crate::core::EditorError;
use crate::features::reminders::TimeUnit;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row handle of a reminder entry
pub type EntryId = Uuid;

/// Serialized form of one reminder: `{"n": 10, "unit": "m"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSpec {
    #[serde(rename = "n")]
    pub count: i64,
    pub unit: TimeUnit,
}

impl ReminderSpec {
    pub const fn new(count: i64, unit: TimeUnit) -> Self {
        ReminderSpec { count, unit }
    }
}

/// Seeded when nothing has been persisted yet
pub const DEFAULT_REMINDERS: [ReminderSpec; 5] = [
    ReminderSpec::new(30, TimeUnit::Seconds),
    ReminderSpec::new(10, TimeUnit::Minutes),
    ReminderSpec::new(1, TimeUnit::Hours),
    ReminderSpec::new(24, TimeUnit::Hours),
    ReminderSpec::new(0, TimeUnit::Immediate),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEntry {
    id: EntryId,
    count: u32,
    unit: TimeUnit,
    /// Count restored when the unit leaves Immediate
    last_explicit_count: Option<u32>,
    /// Set by the last validity check
    invalid: bool,
}

impl ReminderEntry {
    pub fn new(count: u32, unit: TimeUnit) -> Self {
        let (count, last_explicit_count) = if unit.is_immediate() {
            (0, None)
        } else {
            (count, Some(count))
        };

        ReminderEntry {
            id: Uuid::new_v4(),
            count,
            unit,
            last_explicit_count,
            invalid: false,
        }
    }

    /// Build an entry from its serialized form. A negative count is the
    /// legacy spelling of Immediate.
    pub fn from_spec(spec: ReminderSpec) -> Result<Self, EditorError> {
        if spec.count < 0 {
            return Ok(Self::new(0, TimeUnit::Immediate));
        }
        let count = u32::try_from(spec.count).map_err(|_| {
            EditorError::MalformedList(format!("count {} is out of range", spec.count))
        })?;
        Ok(Self::new(count, spec.unit))
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// The count field is disabled while the unit is Immediate
    pub fn count_locked(&self) -> bool {
        self.unit.is_immediate()
    }

    /// Signed seconds before the reference instant; -1 for Immediate
    pub fn offset_seconds(&self) -> i64 {
        if self.unit.is_immediate() {
            TimeUnit::IMMEDIATE_SCALE
        } else {
            i64::from(self.count) * self.unit.scale()
        }
    }

    /// `None` when the offset reaches outside the representable calendar
    pub fn fire_time(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        reference.checked_sub_signed(Duration::try_seconds(self.offset_seconds())?)
    }

    pub fn spec(&self) -> ReminderSpec {
        ReminderSpec::new(i64::from(self.count), self.unit)
    }

    pub(crate) fn set_count(&mut self, count: u32) -> Result<(), EditorError> {
        if self.count_locked() {
            return Err(EditorError::CountLocked(self.id));
        }
        self.count = count;
        self.last_explicit_count = Some(count);
        Ok(())
    }

    pub(crate) fn set_unit(&mut self, unit: TimeUnit) {
        match (self.unit.is_immediate(), unit.is_immediate()) {
            (false, true) => {
                self.last_explicit_count = Some(self.count);
                self.count = 0;
            }
            (true, false) => {
                self.count = self.last_explicit_count.unwrap_or(1);
            }
            _ => {}
        }
        self.unit = unit;
    }

    pub(crate) fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(ReminderEntry::new(10, TimeUnit::Minutes).offset_seconds(), 600);
        assert_eq!(ReminderEntry::new(24, TimeUnit::Hours).offset_seconds(), 86400);
        assert_eq!(ReminderEntry::new(2, TimeUnit::Days).offset_seconds(), 172800);
        assert_eq!(ReminderEntry::new(7, TimeUnit::Immediate).offset_seconds(), -1);
    }

    #[test]
    fn test_immediate_pins_count() {
        let entry = ReminderEntry::new(7, TimeUnit::Immediate);
        assert_eq!(entry.count(), 0);
        assert!(entry.count_locked());
    }

    #[test]
    fn test_legacy_negative_count_is_immediate() {
        let entry = ReminderEntry::from_spec(ReminderSpec::new(-1, TimeUnit::Seconds)).unwrap();
        assert_eq!(entry.unit(), TimeUnit::Immediate);
        assert_eq!(entry.offset_seconds(), -1);
    }

    #[test]
    fn test_count_out_of_range() {
        let result = ReminderEntry::from_spec(ReminderSpec::new(i64::MAX, TimeUnit::Seconds));
        assert!(matches!(result, Err(EditorError::MalformedList(_))));
    }

    #[test]
    fn test_unit_toggle_restores_count() {
        let mut entry = ReminderEntry::new(5, TimeUnit::Hours);
        entry.set_unit(TimeUnit::Immediate);
        assert_eq!(entry.count(), 0);

        entry.set_unit(TimeUnit::Minutes);
        assert_eq!(entry.count(), 5);
        assert!(!entry.count_locked());
    }

    #[test]
    fn test_fire_time() {
        let reference = Utc::now();
        let entry = ReminderEntry::new(90, TimeUnit::Seconds);
        assert_eq!(entry.fire_time(reference), Some(reference - Duration::seconds(90)));

        let immediate = ReminderEntry::new(0, TimeUnit::Immediate);
        assert_eq!(immediate.fire_time(reference), Some(reference + Duration::seconds(1)));
    }

    #[test]
    fn test_fire_time_out_of_calendar() {
        let entry = ReminderEntry::new(4_000_000_000, TimeUnit::Days);
        assert_eq!(entry.fire_time(Utc::now()), None);
    }
}
