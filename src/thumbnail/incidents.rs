// SPDX-License-Identifier: MPL-2.0
//! Bounded record of the failures a thumbnail handled.
//!
//! Every handled failure is logged through `log` and also kept here, oldest
//! first. When the log is full the oldest entry is evicted.

use std::collections::VecDeque;

/// Default number of incidents kept per thumbnail.
pub const DEFAULT_INCIDENT_CAPACITY: usize = 16;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentKind {
    /// The media surface refused to start playback.
    PlaybackRejected,
    /// The poster image could not be loaded.
    PosterFailed,
    /// The media surface reported a decode or network error.
    MediaError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub kind: IncidentKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct IncidentLog {
    data: VecDeque<Incident>,
    capacity: usize,
}

impl Default for IncidentLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INCIDENT_CAPACITY)
    }
}

impl IncidentLog {
    /// Creates a log holding at most `capacity` incidents (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records an incident, evicting the oldest if at capacity.
    pub fn record(&mut self, kind: IncidentKind, message: impl Into<String>) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(Incident {
            kind,
            message: message.into(),
        });
    }

    /// Incidents in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Incident> {
        self.data.iter()
    }

    #[must_use]
    pub fn count(&self, kind: IncidentKind) -> usize {
        self.data.iter().filter(|i| i.kind == kind).count()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Incident> {
        self.data.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
