//! Canonical filter state for the recall directory.
//!
//! [`RecallQuery`] is the single source of truth for "what is currently
//! being asked for". Every mutator is pure: it takes the current value and
//! returns the next one. Publishing that value anywhere (a shareable link,
//! an outbound request) goes through [`codec`], a separate explicit step,
//! so the two can be tested independently.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::{ConfidenceLevel, Region};

pub mod codec;

pub use codec::{decode, encode};

/// The normalized, deduplicated representation of all active filters,
/// independent of its URL-encoded form.
///
/// Invariants, upheld by every constructor and mutator:
/// - `free_text` is never `Some("")` (and never padded with whitespace);
/// - when both dates are present, `end_date >= start_date`;
/// - the sets are canonical (sorted, no duplicates) by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RecallQuery {
    /// Raw search term; substring match is performed server-side.
    pub free_text: Option<String>,
    /// Single-select region; `None` means all regions.
    pub region: Option<Region>,
    /// Inclusive lower bound of the date range.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound; `None` means "through now".
    pub end_date: Option<NaiveDate>,
    /// Status multi-select; empty means no status filter.
    pub statuses: BTreeSet<ConfidenceLevel>,
    /// Signal-type multi-select; opaque case-sensitive tags, empty means
    /// no signal filter.
    pub signal_types: BTreeSet<String>,
}

impl RecallQuery {
    /// Toggle a status in or out of the multi-select (symmetric difference).
    #[must_use]
    pub fn toggle_status(mut self, status: ConfidenceLevel) -> Self {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
        self
    }

    /// Toggle a signal-type tag in or out of the multi-select. Blank
    /// (empty or whitespace-only) tags are ignored so the canonical form
    /// never holds an unencodable member.
    #[must_use]
    pub fn toggle_signal(mut self, signal: &str) -> Self {
        if signal.trim().is_empty() {
            return self;
        }
        if !self.signal_types.remove(signal) {
            self.signal_types.insert(signal.to_string());
        }
        self
    }

    /// Single-select replace; `None` clears the region.
    #[must_use]
    pub fn set_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    /// Replace the search term. Trims; empty or whitespace-only input
    /// clears it, keeping the canonical form free of `Some("")`.
    #[must_use]
    pub fn set_free_text(mut self, text: Option<&str>) -> Self {
        self.free_text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// Set the inclusive lower bound. If an end is already present and
    /// earlier than the new start, the end is dragged up to the start so
    /// a malformed range is never representable.
    #[must_use]
    pub fn set_start_date(mut self, start: Option<NaiveDate>) -> Self {
        self.start_date = start;
        if let (Some(s), Some(e)) = (self.start_date, self.end_date) {
            if e < s {
                self.end_date = Some(s);
            }
        }
        self
    }

    /// Set the inclusive upper bound, clamped to the start when one is
    /// present.
    #[must_use]
    pub fn set_end_date(mut self, end: Option<NaiveDate>) -> Self {
        self.end_date = match (self.start_date, end) {
            (Some(s), Some(e)) if e < s => Some(s),
            (_, e) => e,
        };
        self
    }

    /// Apply a "last N days" preset: `start = today - days`, `end = today`.
    /// Absolute replace — any prior range is overwritten, never merged.
    ///
    /// `today` is an explicit argument; only the binary reads the clock.
    #[must_use]
    pub fn apply_preset(mut self, days: u32, today: NaiveDate) -> Self {
        self.start_date = today.checked_sub_days(Days::new(u64::from(days)));
        self.end_date = Some(today);
        self
    }

    /// Clear statuses, signal types, and the date range.
    ///
    /// Region and free text are deliberately preserved: they are primary
    /// navigation, not refinements.
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.statuses.clear();
        self.signal_types.clear();
        self.start_date = None;
        self.end_date = None;
        self
    }

    /// Number of active refinements, for the filter badge: one per selected
    /// status, one per selected signal type, one per present date bound.
    /// Region and free text do not count.
    pub fn active_filter_count(&self) -> usize {
        self.statuses.len()
            + self.signal_types.len()
            + usize::from(self.start_date.is_some())
            + usize::from(self.end_date.is_some())
    }

    /// True when the query asks for everything (no term, no region, no
    /// refinements).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
