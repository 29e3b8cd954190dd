//! # Reminder Editor
//!
//! Editable list of "fire N units before the appointment starts" entries.
//! Keeps every row's validity in sync with the appointment start and hands
//! the derived offsets to the form.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Change notifications over channels instead of a single callback
//! - 1.1.0: Remember the explicit count across Immediate toggles
//! - 1.0.0: Initial release

use crate::core::{Clock, EditorError};
use crate::features::reminders::{EntryId, ReminderEntry, ReminderSpec, TimeUnit};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Externally driven configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAttribute {
    /// Serialized reminder list, rebuilds every entry
    Reminders,
    /// ISO-8601 appointment start, triggers a validity recheck
    DateTime,
}

impl EditorAttribute {
    pub fn name(self) -> &'static str {
        match self {
            EditorAttribute::Reminders => "reminders",
            EditorAttribute::DateTime => "date-time",
        }
    }
}

impl FromStr for EditorAttribute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminders" => Ok(EditorAttribute::Reminders),
            "date-time" => Ok(EditorAttribute::DateTime),
            other => Err(anyhow::anyhow!("Unknown editor attribute '{other}'")),
        }
    }
}

/// Sent after every user edit of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderChange {
    pub offsets: Vec<i64>,
}

pub struct ReminderEditor {
    /// Rows in display order
    entries: Vec<ReminderEntry>,
    reference_instant: Option<DateTime<Utc>>,
    valid: bool,
    clock: Arc<dyn Clock>,
    listeners: Vec<mpsc::UnboundedSender<ReminderChange>>,
}

impl ReminderEditor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        ReminderEditor {
            entries: Vec::new(),
            reference_instant: None,
            valid: true,
            clock,
            listeners: Vec::new(),
        }
    }

    /// Receive a [`ReminderChange`] for every add, remove and field edit
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ReminderChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        rx
    }

    /// Dispatch an attribute update to the matching operation
    pub fn on_config_changed(
        &mut self,
        attribute: EditorAttribute,
        value: &str,
    ) -> Result<(), EditorError> {
        debug!("Editor attribute {} changed", attribute.name());
        match attribute {
            EditorAttribute::Reminders => self.set_reminders(value),
            EditorAttribute::DateTime => {
                self.set_reference_instant(value);
                Ok(())
            }
        }
    }

    /// Replace every entry from a serialized `[{"n":..,"unit":..}]` list.
    ///
    /// Counts as state restoration, so no change notification is sent.
    pub fn set_reminders(&mut self, serialized: &str) -> Result<(), EditorError> {
        let specs: Vec<ReminderSpec> = serde_json::from_str(serialized)
            .map_err(|e| EditorError::MalformedList(e.to_string()))?;
        self.replace_entries(&specs)
    }

    pub fn replace_entries(&mut self, specs: &[ReminderSpec]) -> Result<(), EditorError> {
        let entries = specs
            .iter()
            .map(|spec| ReminderEntry::from_spec(*spec))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Rebuilt reminder list with {} entries", entries.len());
        self.entries = entries;
        self.check_validity();
        Ok(())
    }

    /// Update the appointment start from an ISO-8601 string. Unparsable input
    /// clears the reference, which makes every entry invalid.
    pub fn set_reference_instant(&mut self, iso: &str) {
        let reference = match DateTime::parse_from_rfc3339(iso) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                warn!("Ignoring unparsable reference instant '{iso}': {e}");
                None
            }
        };
        self.set_reference(reference);
    }

    pub fn set_reference(&mut self, reference: Option<DateTime<Utc>>) {
        self.reference_instant = reference;
        self.check_validity();
    }

    /// Append a one-minute-before entry
    pub fn add_entry(&mut self) -> EntryId {
        self.add_entry_with(1, TimeUnit::Minutes)
    }

    pub fn add_entry_with(&mut self, count: u32, unit: TimeUnit) -> EntryId {
        let entry = ReminderEntry::new(count, unit);
        let id = entry.id();
        self.entries.push(entry);
        self.check_validity();
        self.notify();
        id
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Result<(), EditorError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or(EditorError::UnknownEntry(id))?;
        self.entries.remove(index);
        self.check_validity();
        self.notify();
        Ok(())
    }

    pub fn update_entry_count(&mut self, id: EntryId, count: u32) -> Result<(), EditorError> {
        self.entry_mut(id)?.set_count(count)?;
        self.check_validity();
        self.notify();
        Ok(())
    }

    /// Change a row's unit. Immediate pins the count to 0; leaving Immediate
    /// restores the last explicit count (1 if there was none).
    pub fn update_entry_unit(&mut self, id: EntryId, unit: TimeUnit) -> Result<(), EditorError> {
        self.entry_mut(id)?.set_unit(unit);
        self.check_validity();
        self.notify();
        Ok(())
    }

    pub fn check_validity(&mut self) -> bool {
        let now = self.clock.now();
        self.check_validity_at(now)
    }

    /// Mark rows whose fire time is not strictly after `now`. Without a
    /// reference instant every row is invalid, as is a row whose fire time
    /// cannot be represented.
    pub fn check_validity_at(&mut self, now: DateTime<Utc>) -> bool {
        let reference = self.reference_instant;
        let mut ok = true;

        for entry in &mut self.entries {
            let valid = match reference {
                Some(reference) => entry.fire_time(reference).is_some_and(|at| at > now),
                None => false,
            };
            entry.set_invalid(!valid);
            ok &= valid;
        }

        self.valid = ok;
        ok
    }

    /// Aggregate result of the last validity check
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Offsets in row order, as sent to the service
    pub fn reminder_offsets(&self) -> Vec<i64> {
        self.entries.iter().map(ReminderEntry::offset_seconds).collect()
    }

    /// Serialized list suitable for [`ReminderEditor::set_reminders`]
    pub fn serialize_entries(&self) -> serde_json::Result<String> {
        let specs: Vec<ReminderSpec> = self.entries.iter().map(ReminderEntry::spec).collect();
        serde_json::to_string(&specs)
    }

    pub fn entries(&self) -> &[ReminderEntry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&ReminderEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn reference_instant(&self) -> Option<DateTime<Utc>> {
        self.reference_instant
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut ReminderEntry, EditorError> {
        self.entries
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(EditorError::UnknownEntry(id))
    }

    fn notify(&mut self) {
        let change = ReminderChange {
            offsets: self.reminder_offsets(),
        };
        self.listeners.retain(|tx| tx.send(change.clone()).is_ok());
    }
}
