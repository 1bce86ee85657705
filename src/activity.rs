//! Activity notifications emitted by mutating operations
//!
//! Every operation that changes an exercise, a session, or the manager hands a
//! human-readable description to an [`ActivitySink`] owned by the caller. The
//! embedding application decides whether to keep, print, or drop them.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::logging::ACTIVITY_TARGET;

/// Receiver of activity descriptions
pub trait ActivitySink {
    fn record(&mut self, description: String);
}

/// Plain list of descriptions, without timestamps
impl ActivitySink for Vec<String> {
    fn record(&mut self, description: String) {
        self.push(description);
    }
}

/// A single logged activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// When the activity was recorded
    pub logged_at: DateTime<Local>,

    /// What happened
    pub description: String,
}

impl ActivityEvent {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            logged_at: Local::now(),
            description: description.into(),
        }
    }
}

impl fmt::Display for ActivityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}",
            self.logged_at.format("%a %b %d %H:%M:%S %Y"),
            self.description
        )
    }
}

/// Append-only, timestamped activity log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    events: Vec<ActivityEvent>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Descriptions in recording order
    pub fn descriptions(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.description.as_str()).collect()
    }
}

impl ActivitySink for ActivityLog {
    fn record(&mut self, description: String) {
        tracing::info!(target: ACTIVITY_TARGET, "{}", description);
        self.events.push(ActivityEvent::new(description));
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a ActivityEvent;
    type IntoIter = std::slice::Iter<'a, ActivityEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
