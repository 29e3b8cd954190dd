//! # Form Controller
//!
//! Bridges the appointment fields and the reminder editor to persistence,
//! validation and the two outbound requests.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Requests run on a spawned task; outcomes are applied on the UI thread
//! - 1.1.0: Visibility-aware validity sweep
//! - 1.0.0: Initial release

use crate::core::{Clock, Config, SubmitError};
use crate::features::appointment::api::{
    interpret_response, AppointmentApi, SubmitAction, SubmitOutcome,
};
use crate::features::appointment::fields::{FormField, FormFields, REMINDERS_STORAGE_KEY};
use crate::features::appointment::payload::AppointmentPayload;
use crate::features::appointment::status::StatusMessage;
use crate::features::appointment::sweep::ValiditySweep;
use crate::features::appointment::validation::{validate_fields, FormValidation, Issue};
use crate::features::reminders::{
    EditorAttribute, EntryId, ReminderChange, ReminderEditor, TimeUnit, DEFAULT_REMINDERS,
};
use crate::storage::KeyValueStore;
use anyhow::Result;
use chrono::SecondsFormat;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

struct PendingSubmission {
    id: u64,
    action: SubmitAction,
    abort: oneshot::Sender<()>,
}

pub struct FormController {
    fields: FormFields,
    editor: ReminderEditor,
    editor_changes: mpsc::UnboundedReceiver<ReminderChange>,
    store: Box<dyn KeyValueStore>,
    api: Arc<dyn AppointmentApi>,
    clock: Arc<dyn Clock>,
    schedule_timeout: Duration,
    cancel_timeout: Duration,
    status_timeout: Duration,
    validation: FormValidation,
    status: Option<StatusMessage>,
    pending: Option<PendingSubmission>,
    next_submission: u64,
    outcome_tx: mpsc::UnboundedSender<(u64, SubmitOutcome)>,
    outcome_rx: mpsc::UnboundedReceiver<(u64, SubmitOutcome)>,
    sweep: ValiditySweep,
}

impl FormController {
    pub fn new(
        config: &Config,
        store: Box<dyn KeyValueStore>,
        api: Arc<dyn AppointmentApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut editor = ReminderEditor::new(clock.clone());
        let editor_changes = editor.subscribe();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        FormController {
            fields: FormFields::default(),
            editor,
            editor_changes,
            store,
            api,
            clock,
            schedule_timeout: config.schedule_timeout(),
            cancel_timeout: config.cancel_timeout(),
            status_timeout: config.status_timeout(),
            validation: FormValidation::default(),
            status: None,
            pending: None,
            next_submission: 1,
            outcome_tx,
            outcome_rx,
            sweep: ValiditySweep::new(config.sweep_interval()),
        }
    }

    /// Load persisted fields and reminders. Falls back to the default
    /// reminder preset when nothing usable is stored.
    pub fn restore(&mut self) -> Result<()> {
        for field in FormField::all() {
            if let Some(value) = self.store.get(field.storage_key())? {
                self.fields.set(*field, value);
            }
        }

        let restored = match self.store.get(REMINDERS_STORAGE_KEY)? {
            Some(serialized) => {
                match self
                    .editor
                    .on_config_changed(EditorAttribute::Reminders, &serialized)
                {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Discarding stored reminders: {e}");
                        false
                    }
                }
            }
            None => false,
        };
        if !restored {
            self.editor.replace_entries(&DEFAULT_REMINDERS)?;
        }

        self.sync_reference();
        self.validate();
        info!(
            "Restored form with {} reminders ({})",
            self.editor.len(),
            if self.validation.is_valid() { "valid" } else { "incomplete" }
        );
        Ok(())
    }

    /// Apply a field edit: re-derive the appointment start, validate, persist
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.store.set(field.storage_key(), &value)?;
        self.fields.set(field, value);
        self.sync_reference();
        self.validate();
        Ok(())
    }

    /// Replace the reminder list wholesale and persist it
    pub fn set_reminders(&mut self, serialized: &str) -> Result<()> {
        self.editor
            .on_config_changed(EditorAttribute::Reminders, serialized)?;
        self.persist_reminders()?;
        self.validate();
        Ok(())
    }

    pub fn add_reminder(&mut self) -> Result<EntryId> {
        let id = self.editor.add_entry();
        self.process_editor_changes()?;
        Ok(id)
    }

    pub fn remove_reminder(&mut self, id: EntryId) -> Result<()> {
        self.editor.remove_entry(id)?;
        self.process_editor_changes()
    }

    pub fn set_reminder_count(&mut self, id: EntryId, count: u32) -> Result<()> {
        self.editor.update_entry_count(id, count)?;
        self.process_editor_changes()
    }

    pub fn set_reminder_unit(&mut self, id: EntryId, unit: TimeUnit) -> Result<()> {
        self.editor.update_entry_unit(id, unit)?;
        self.process_editor_changes()
    }

    /// Drain editor notifications; persist and re-validate if there were any
    pub fn process_editor_changes(&mut self) -> Result<()> {
        let mut changed = false;
        while let Ok(change) = self.editor_changes.try_recv() {
            debug!("Reminder offsets now {:?}", change.offsets);
            changed = true;
        }

        if changed {
            self.persist_reminders()?;
            self.validate();
        }
        Ok(())
    }

    /// Whole-form validation against the clock; updates the enabled state
    pub fn validate(&mut self) -> bool {
        let now = self.clock.now();
        let mut validation = validate_fields(&self.fields, now);
        if !self.editor.check_validity_at(now) {
            validation.push(Issue::RemindersInPast);
        }

        if validation != self.validation {
            if validation.is_valid() {
                debug!("Form is valid");
            } else {
                debug!("Form is invalid: {}", validation.summary());
            }
        }
        self.validation = validation;
        self.validation.is_valid()
    }

    /// Submit and cancel are usable
    pub fn controls_enabled(&self) -> bool {
        self.validation.is_valid()
            && self.pending.is_none()
            && !self
                .status
                .as_ref()
                .is_some_and(|s| s.kind.blocks_controls())
    }

    pub fn payload(&self) -> Option<AppointmentPayload> {
        AppointmentPayload::build(&self.fields, self.editor.reminder_offsets())
    }

    /// Disable the form and send one request on a background task. The
    /// outcome arrives through [`FormController::poll_outcomes`] or
    /// [`FormController::next_outcome`].
    pub fn start_submission(&mut self, action: SubmitAction) -> Result<u64, SubmitError> {
        if !self.validate() {
            return Err(SubmitError::Invalid(self.validation.summary()));
        }
        if !self.controls_enabled() {
            return Err(SubmitError::ControlsDisabled);
        }
        let payload = self
            .payload()
            .ok_or_else(|| SubmitError::Invalid("date or time is missing".to_string()))?;

        let id = self.next_submission;
        self.next_submission += 1;
        let budget = match action {
            SubmitAction::Schedule => self.schedule_timeout,
            SubmitAction::Cancel => self.cancel_timeout,
        };

        let (abort_tx, abort_rx) = oneshot::channel();
        self.pending = Some(PendingSubmission {
            id,
            action,
            abort: abort_tx,
        });
        self.status = Some(StatusMessage::busy(action.busy_text()));
        info!(
            "Submitting {action:?} request {id} with reminders {:?}",
            payload.reminders
        );

        let api = self.api.clone();
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = run_submission(api, action, payload, budget, abort_rx).await;
            if outcome_tx.send((id, outcome)).is_err() {
                debug!("Form closed before request {id} finished");
            }
        });

        Ok(id)
    }

    /// Start a submission and wait for its outcome
    pub async fn submit(&mut self, action: SubmitAction) -> Result<SubmitOutcome, SubmitError> {
        self.start_submission(action)?;
        self.next_outcome().await.ok_or(SubmitError::NothingPending)
    }

    /// Wait for the in-flight request to finish and apply its outcome
    pub async fn next_outcome(&mut self) -> Option<SubmitOutcome> {
        while self.pending.is_some() {
            let (id, outcome) = self.outcome_rx.recv().await?;
            if self.apply_outcome(id, outcome.clone(), Instant::now()) {
                return Some(outcome);
            }
        }
        None
    }

    /// Apply finished requests without waiting. Returns how many were applied.
    pub fn poll_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((id, outcome)) = self.outcome_rx.try_recv() {
            if self.apply_outcome(id, outcome, Instant::now()) {
                applied += 1;
            }
        }
        applied
    }

    /// Dismiss gesture: hide the status and abort the in-flight request.
    /// Works while the controls are disabled.
    pub fn cancel_pending(&mut self) {
        self.status = None;
        if let Some(pending) = self.pending.take() {
            if pending.abort.send(()).is_ok() {
                info!("{:?} request {} aborted", pending.action, pending.id);
            } else {
                debug!("Request {} already finished", pending.id);
            }
        }
        self.validate();
    }

    pub fn tick(&mut self) {
        self.poll_outcomes();
        self.tick_at(Instant::now());
    }

    /// Expire confirmations and run the validity sweep when due
    pub fn tick_at(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            debug!("Status dismissed");
            self.status = None;
            self.validate();
        }

        if self.sweep.poll(now) {
            self.validate();
        }
    }

    pub fn start_sweep(&mut self) {
        self.sweep.start(Instant::now());
    }

    pub fn stop_sweep(&mut self) {
        self.sweep.stop();
    }

    /// Pause the sweep while the form cannot be seen
    pub fn set_visible(&mut self, visible: bool) {
        self.sweep.set_visible(visible);
    }

    pub fn sweep_active(&self) -> bool {
        self.sweep.is_active()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn editor(&self) -> &ReminderEditor {
        &self.editor
    }

    pub fn validation(&self) -> &FormValidation {
        &self.validation
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_action(&self) -> Option<SubmitAction> {
        self.pending.as_ref().map(|p| p.action)
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn sync_reference(&mut self) {
        match self.fields.start_instant() {
            Some(start) => {
                let iso = start.to_rfc3339_opts(SecondsFormat::Millis, true);
                if let Err(e) = self
                    .editor
                    .on_config_changed(EditorAttribute::DateTime, &iso)
                {
                    warn!("Could not update reminder reference: {e}");
                }
            }
            None => self.editor.set_reference(None),
        }
    }

    fn persist_reminders(&mut self) -> Result<()> {
        let serialized = self.editor.serialize_entries()?;
        self.store.set(REMINDERS_STORAGE_KEY, &serialized)
    }

    fn apply_outcome(&mut self, id: u64, outcome: SubmitOutcome, now: Instant) -> bool {
        if !self.pending.as_ref().is_some_and(|p| p.id == id) {
            debug!("Ignoring outcome of request {id}, no longer pending");
            return false;
        }
        self.pending = None;

        let text = outcome.user_message();
        self.status = Some(if outcome.is_success() {
            info!("Request {id} succeeded: {text}");
            StatusMessage::info_until(text, now + self.status_timeout)
        } else {
            warn!("Request {id} failed: {text}");
            StatusMessage::error(text)
        });
        self.validate();
        true
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.abort.send(());
        }
    }
}

async fn run_submission(
    api: Arc<dyn AppointmentApi>,
    action: SubmitAction,
    payload: AppointmentPayload,
    budget: Duration,
    abort: oneshot::Receiver<()>,
) -> SubmitOutcome {
    // A dropped sender means nobody can abort any more, not an abort
    let aborted = async move {
        if abort.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = aborted => SubmitOutcome::Aborted { action },
        result = tokio::time::timeout(budget, api.send(action, &payload)) => match result {
            Err(_) => SubmitOutcome::TimedOut { action, after: budget },
            Ok(Err(e)) => SubmitOutcome::TransportFailed {
                action,
                message: e.to_string(),
            },
            Ok(Ok(response)) => interpret_response(action, &response),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::appointment::api::ApiResponse;
    use crate::features::appointment::status::StatusKind;
    use crate::storage::MemoryStore;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedApi {
        replies: Mutex<VecDeque<Result<ApiResponse>>>,
        calls: Mutex<Vec<(SubmitAction, AppointmentPayload)>>,
        delay: Duration,
    }

    impl ScriptedApi {
        fn new(replies: Vec<Result<ApiResponse>>) -> Arc<Self> {
            Self::delayed(replies, Duration::ZERO)
        }

        fn delayed(replies: Vec<Result<ApiResponse>>, delay: Duration) -> Arc<Self> {
            Arc::new(ScriptedApi {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
                delay,
            })
        }

        fn calls(&self) -> Vec<(SubmitAction, AppointmentPayload)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AppointmentApi for ScriptedApi {
        async fn send(
            &self,
            action: SubmitAction,
            payload: &AppointmentPayload,
        ) -> Result<ApiResponse> {
            self.calls.lock().unwrap().push((action, payload.clone()));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let reply = self.replies.lock().unwrap().pop_front();
            reply.unwrap_or_else(|| Err(anyhow!("no scripted reply")))
        }
    }

    fn test_config() -> Config {
        Config {
            schedule_timeout_ms: 200,
            cancel_timeout_ms: 100,
            status_timeout_ms: 2_000,
            ..Config::default()
        }
    }

    fn controller(
        api: Arc<ScriptedApi>,
        store: MemoryStore,
    ) -> (FormController, Arc<ManualClock>) {
        controller_with_config(api, store, test_config())
    }

    fn controller_with_config(
        api: Arc<ScriptedApi>,
        store: MemoryStore,
        config: Config,
    ) -> (FormController, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(early_morning()));
        let mut controller = FormController::new(&config, Box::new(store), api, clock.clone());
        controller.restore().unwrap();
        (controller, clock)
    }

    /// 06:00 local, so every default reminder before a 09:00 start tomorrow
    /// still lies ahead
    fn early_morning() -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2026, 6, 15, 6, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn tomorrow(now: DateTime<Utc>) -> String {
        (now.with_timezone(&Local) + chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn fill(controller: &mut FormController, clock: &ManualClock, start: &str, end: &str) {
        controller.set_field(FormField::Title, "Planning").unwrap();
        controller
            .set_field(FormField::Message, "Starts in %t")
            .unwrap();
        controller
            .set_field(FormField::Date, tomorrow(clock.now()))
            .unwrap();
        controller.set_field(FormField::StartTime, start).unwrap();
        controller.set_field(FormField::EndTime, end).unwrap();
        controller
            .set_field(FormField::ChannelUrl, "https://teams.example.com/l/channel/1")
            .unwrap();
    }

    #[test]
    fn test_restore_defaults() {
        let (controller, _clock) = controller(ScriptedApi::new(vec![]), MemoryStore::new());
        assert_eq!(controller.editor().reminder_offsets(), vec![30, 600, 3600, 86400, -1]);
        assert!(!controller.controls_enabled());
    }

    #[test]
    fn test_restore_persisted_fields() {
        let store = MemoryStore::with_values([
            (FormField::Title.storage_key(), "Retro"),
            (FormField::Date.storage_key(), "2026-12-01"),
            (REMINDERS_STORAGE_KEY, r#"[{"n":15,"unit":"m"}]"#),
        ]);
        let (controller, _clock) = controller(ScriptedApi::new(vec![]), store);

        assert_eq!(controller.fields().title, "Retro");
        assert_eq!(controller.fields().date, "2026-12-01");
        assert_eq!(controller.editor().reminder_offsets(), vec![900]);
    }

    #[test]
    fn test_restore_discards_malformed_reminders() {
        let store = MemoryStore::with_values([(REMINDERS_STORAGE_KEY, "[600, 60]")]);
        let (controller, _clock) = controller(ScriptedApi::new(vec![]), store);
        assert_eq!(controller.editor().len(), DEFAULT_REMINDERS.len());
    }

    #[test]
    fn test_restore_out_of_calendar_reminder() {
        let store = MemoryStore::with_values([(
            REMINDERS_STORAGE_KEY,
            r#"[{"n":4000000000,"unit":"d"}]"#,
        )]);
        let (mut controller, clock) = controller(ScriptedApi::new(vec![]), store);
        fill(&mut controller, &clock, "09:00", "10:00");

        assert!(controller.validation().has(Issue::RemindersInPast));
        assert!(!controller.controls_enabled());
    }

    #[test]
    fn test_field_edits_persist_and_sync_reference() {
        let (mut controller, clock) = controller(ScriptedApi::new(vec![]), MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        assert_eq!(
            controller
                .store()
                .get(FormField::StartTime.storage_key())
                .unwrap()
                .as_deref(),
            Some("09:00")
        );
        assert_eq!(
            controller.editor().reference_instant(),
            controller.fields().start_instant()
        );
        assert!(controller.controls_enabled());
    }

    #[test]
    fn test_reminder_edits_persist() {
        let (mut controller, clock) = controller(ScriptedApi::new(vec![]), MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");
        controller.set_reminders("[]").unwrap();

        let id = controller.add_reminder().unwrap();
        controller.set_reminder_unit(id, TimeUnit::Hours).unwrap();
        controller.set_reminder_count(id, 2).unwrap();

        let stored = controller.store().get(REMINDERS_STORAGE_KEY).unwrap();
        assert_eq!(stored.as_deref(), Some(r#"[{"n":2,"unit":"h"}]"#));

        controller.remove_reminder(id).unwrap();
        let stored = controller.store().get(REMINDERS_STORAGE_KEY).unwrap();
        assert_eq!(stored.as_deref(), Some("[]"));
        assert!(controller.remove_reminder(id).is_err());
    }

    #[test]
    fn test_reminder_in_past_disables_controls() {
        let (mut controller, clock) = controller(ScriptedApi::new(vec![]), MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");
        assert!(controller.controls_enabled());

        let id = controller.add_reminder().unwrap();
        controller.set_reminder_unit(id, TimeUnit::Days).unwrap();
        controller.set_reminder_count(id, 3).unwrap();

        assert!(controller.validation().has(Issue::RemindersInPast));
        assert!(!controller.controls_enabled());
    }

    #[tokio::test]
    async fn test_schedule_scenario() {
        let api = ScriptedApi::new(vec![Ok(ApiResponse::new(200, r#"{"success":true}"#))]);
        let (mut controller, clock) = controller(api.clone(), MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");
        controller.set_reminders(r#"[{"n":10,"unit":"m"}]"#).unwrap();

        let outcome = controller.submit(SubmitAction::Schedule).await.unwrap();
        assert!(outcome.is_success());

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SubmitAction::Schedule);
        assert_eq!(calls[0].1.reminders, vec![600]);
        assert_eq!(calls[0].1.title, "Planning");

        let status = controller.status().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert!(!controller.controls_enabled());

        controller.tick_at(Instant::now() + Duration::from_millis(2_100));
        assert!(controller.status().is_none());
        assert!(controller.controls_enabled());
    }

    #[tokio::test]
    async fn test_equal_start_and_end_sends_nothing() {
        let api = ScriptedApi::new(vec![]);
        let (mut controller, clock) = controller(api.clone(), MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "09:00");

        let result = controller.start_submission(SubmitAction::Schedule);
        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert!(!controller.is_pending());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_reenables_form() {
        let api = ScriptedApi::new(vec![Ok(ApiResponse::new(
            403,
            r#"{"error":{"message":"forbidden"}}"#,
        ))]);
        let (mut controller, clock) = controller(api, MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        let outcome = controller.submit(SubmitAction::Cancel).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::HttpError { status: 403, .. }));

        let status = controller.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Request failed with code 403: forbidden");
        assert!(controller.controls_enabled());
    }

    #[tokio::test]
    async fn test_domain_failure_shown_verbatim() {
        let api = ScriptedApi::new(vec![Ok(ApiResponse::new(
            200,
            r#"{"success":false,"error":"timer already expired"}"#,
        ))]);
        let (mut controller, clock) = controller(api, MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        controller.submit(SubmitAction::Cancel).await.unwrap();
        assert_eq!(
            controller.status().unwrap().text,
            "Cancelling the appointment failed: timer already expired"
        );
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let api = ScriptedApi::new(vec![Err(anyhow!("connection refused"))]);
        let (mut controller, clock) = controller(api, MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        let outcome = controller.submit(SubmitAction::Schedule).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::TransportFailed { .. }));
        assert!(controller.controls_enabled());
    }

    #[tokio::test]
    async fn test_timeout_budget_per_action() {
        let api = ScriptedApi::delayed(
            vec![Ok(ApiResponse::new(200, r#"{"success":true}"#))],
            Duration::from_secs(5),
        );
        let (mut controller, clock) = controller(api, MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        let outcome = controller.submit(SubmitAction::Cancel).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::TimedOut {
                action: SubmitAction::Cancel,
                after: Duration::from_millis(100)
            }
        );
        assert_eq!(controller.status().unwrap().kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn test_cancel_pending_aborts_request() {
        let api = ScriptedApi::delayed(
            vec![Ok(ApiResponse::new(200, r#"{"success":true}"#))],
            Duration::from_secs(5),
        );
        let (mut controller, clock) = controller(api, MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        controller.start_submission(SubmitAction::Schedule).unwrap();
        assert!(controller.is_pending());
        assert_eq!(controller.status().unwrap().kind, StatusKind::Busy);
        assert!(!controller.controls_enabled());
        assert_eq!(
            controller.start_submission(SubmitAction::Schedule),
            Err(SubmitError::ControlsDisabled)
        );

        controller.cancel_pending();
        assert!(!controller.is_pending());
        assert!(controller.status().is_none());
        assert!(controller.controls_enabled());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(controller.poll_outcomes(), 0);
        assert!(controller.status().is_none());
    }

    #[test]
    fn test_sweep_catches_reminder_drifting_into_past() {
        let (mut controller, clock) = controller(ScriptedApi::new(vec![]), MemoryStore::new());
        fill(&mut controller, &clock, "09:00", "10:00");

        let start = controller.fields().start_instant().unwrap();
        let lead = (start - clock.now()).num_seconds() - 30;
        controller
            .set_reminders(&format!(r#"[{{"n":{lead},"unit":"s"}}]"#))
            .unwrap();
        assert!(controller.controls_enabled());

        controller.start_sweep();
        clock.advance(chrono::Duration::seconds(60));
        assert!(controller.controls_enabled());

        controller.set_visible(false);
        controller.tick_at(Instant::now() + Duration::from_secs(10));
        assert!(controller.controls_enabled());

        controller.set_visible(true);
        controller.tick_at(Instant::now() + Duration::from_secs(11));
        assert!(!controller.controls_enabled());
        assert!(controller.validation().has(Issue::RemindersInPast));
    }

    #[test]
    fn test_stop_sweep() {
        let (mut controller, _clock) = controller(ScriptedApi::new(vec![]), MemoryStore::new());
        controller.start_sweep();
        assert!(controller.sweep_active());
        controller.stop_sweep();
        assert!(!controller.sweep_active());
    }
}
