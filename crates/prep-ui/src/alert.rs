//! Transient notifications.
//!
//! Every call to [`AlertPresenter::show`] adds a new entry; nothing is
//! deduplicated. Entries expire [`ALERT_TIMEOUT`] after they were raised
//! unless dismissed first.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info};

/// How long an alert stays visible.
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Unique, strictly increasing alert identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AlertId(u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

impl Alert {
    pub fn expires_at(&self) -> Instant {
        self.raised_at + ALERT_TIMEOUT
    }
}

type Listener = Box<dyn FnMut(&Alert)>;

/// Stack of visible alerts.
#[derive(Default)]
pub struct AlertPresenter {
    next_id: u64,
    visible: Vec<Alert>,
    errors_raised: usize,
    listener: Option<Listener>,
}

impl fmt::Debug for AlertPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertPresenter")
            .field("next_id", &self.next_id)
            .field("visible", &self.visible)
            .field("errors_raised", &self.errors_raised)
            .finish_non_exhaustive()
    }
}

impl AlertPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `listener` for every alert as it is raised.
    #[must_use]
    pub fn with_listener(mut self, listener: impl FnMut(&Alert) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> AlertId {
        self.show_at(message, severity, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> AlertId {
        self.next_id += 1;
        let alert = Alert {
            id: AlertId(self.next_id),
            message: message.into(),
            severity,
            raised_at: now,
        };
        match severity {
            Severity::Error => {
                self.errors_raised += 1;
                error!(id = %alert.id, message = %alert.message, "alert raised");
            }
            Severity::Info | Severity::Success => {
                info!(id = %alert.id, severity = severity.label(), message = %alert.message, "alert raised");
            }
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(&alert);
        }
        let id = alert.id;
        self.visible.push(alert);
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> AlertId {
        self.show(message, Severity::Info)
    }

    pub fn success(&mut self, message: impl Into<String>) -> AlertId {
        self.show(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> AlertId {
        self.show(message, Severity::Error)
    }

    /// Remove an alert early. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: AlertId) -> bool {
        let before = self.visible.len();
        self.visible.retain(|alert| alert.id != id);
        self.visible.len() != before
    }

    /// Drop every alert whose timeout has elapsed at `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<Alert> {
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .visible
            .drain(..)
            .partition(|alert| alert.expires_at() <= now);
        self.visible = kept;
        expired
    }

    /// Alerts currently on screen, oldest first.
    pub fn visible(&self) -> &[Alert] {
        &self.visible
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.visible.last()
    }

    /// Number of error alerts raised so far, including expired ones.
    pub fn errors_raised(&self) -> usize {
        self.errors_raised
    }
}
