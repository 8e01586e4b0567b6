use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::check_in::AttendanceStatus;
use super::presenter::TeamSummary;

/// What the check-in screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StationView {
    Idle,
    Loading {
        code: String,
    },
    Found {
        code: String,
        team: TeamSummary,
        attendance: AttendanceStatus,
    },
    Failed {
        code: String,
        error: String,
    },
}

pub const CANCELLED_MESSAGE: &str = "Check-in was interrupted. Please try again.";

/// Issued by [`CheckInStation::begin`]; only the newest ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// A lookup in progress. If dropped before [`PendingLookup::publish`], e.g.
/// because the request was cancelled, the display falls back to a retryable
/// failure instead of staying on `Loading`.
#[derive(Debug)]
pub struct PendingLookup<'a> {
    station: &'a CheckInStation,
    ticket: LookupTicket,
    code: String,
    published: bool,
}

impl PendingLookup<'_> {
    pub fn publish(mut self, view: StationView) -> bool {
        self.published = true;
        self.station.finish(self.ticket, view)
    }
}

impl Drop for PendingLookup<'_> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        let view = StationView::Failed {
            code: std::mem::take(&mut self.code),
            error: CANCELLED_MESSAGE.to_string(),
        };
        if self.station.finish(self.ticket, view) {
            log::warn!("Lookup abandoned before completing; station shows retry");
        }
    }
}

#[derive(Debug)]
struct Display {
    generation: u64,
    view: StationView,
}

#[derive(Debug)]
pub struct CheckInStation {
    display: Mutex<Display>,
}

impl Default for CheckInStation {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckInStation {
    pub fn new() -> Self {
        Self {
            display: Mutex::new(Display {
                generation: 0,
                view: StationView::Idle,
            }),
        }
    }

    pub fn current(&self) -> StationView {
        self.lock().view.clone()
    }

    /// Clear whatever is displayed and mark `code` as loading. Any lookup
    /// started before this call is superseded.
    pub fn begin(&self, code: &str) -> LookupTicket {
        let mut display = self.lock();
        display.generation += 1;
        display.view = StationView::Loading {
            code: code.to_string(),
        };
        LookupTicket(display.generation)
    }

    /// [`begin`](Self::begin) wrapped in a guard that resolves the display
    /// on every exit path.
    pub fn track(&self, code: &str) -> PendingLookup<'_> {
        PendingLookup {
            station: self,
            ticket: self.begin(code),
            code: code.to_string(),
            published: false,
        }
    }

    /// Publish a finished lookup. Returns false, leaving the display alone,
    /// when a newer lookup or a reset happened in the meantime.
    pub fn finish(&self, ticket: LookupTicket, view: StationView) -> bool {
        let mut display = self.lock();
        if display.generation != ticket.0 {
            log::debug!(
                "Discarding stale lookup result (ticket {}, current {})",
                ticket.0,
                display.generation
            );
            return false;
        }
        display.view = view;
        true
    }

    /// "Check another team".
    pub fn reset(&self) {
        let mut display = self.lock();
        display.generation += 1;
        display.view = StationView::Idle;
    }

    fn lock(&self) -> MutexGuard<'_, Display> {
        // Every write replaces the whole view, so a poisoned lock is still usable.
        self.display.lock().unwrap_or_else(|e| e.into_inner())
    }
}
