//! Periodic re-validation. Catches reminders that drift into the past while
//! nobody is typing. Paused while the form is not visible.

use log::debug;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ValiditySweep {
    interval: Duration,
    running: bool,
    visible: bool,
    last_run: Option<Instant>,
}

impl ValiditySweep {
    pub fn new(interval: Duration) -> Self {
        ValiditySweep {
            interval,
            running: false,
            visible: true,
            last_run: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.last_run = Some(now);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_run = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_active(&self) -> bool {
        self.running && self.visible
    }

    /// Regaining visibility makes the next poll run immediately
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            debug!("Validity sweep resumed");
            self.last_run = None;
        } else if !visible && self.visible {
            debug!("Validity sweep paused");
        }
        self.visible = visible;
    }

    /// True when a sweep is due; records the run
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }
        let due = match self.last_run {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if due {
            self.last_run = Some(now);
        }
        due
    }
}
