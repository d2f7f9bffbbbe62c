#![forbid(unsafe_code)]

//! Debounced note search.
//!
//! A query edit does not produce results immediately. Non-blank queries put
//! the search into a loading state and schedule one pending computation,
//! identified by a [`SearchTicket`], that becomes due after the configured
//! delay. Scheduling always replaces the previous pending computation, so a
//! completion for an outdated ticket is ignored and never overwrites the
//! results of a newer query.
//!
//! Two ways to deliver completions are supported:
//!
//! - **Timer hosts** (web) arm a platform timer per ticket and call
//!   [`SearchState::complete`] when it fires.
//! - **Polling hosts** (terminal, tests) call [`SearchState::poll`] with the
//!   current monotonic time.
//!
//! Blank queries (empty after trimming) clear the results at once, with no
//! loading state in between.

use std::fmt;
use std::time::Duration;

use crate::record::{Record, TREASURE_NOTES};

/// Identifies one scheduled search computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    /// Raw ticket number. Tickets increase monotonically per [`SearchState`].
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Rebuild a ticket from a raw number handed back by a host timer.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SearchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSearch {
    ticket: SearchTicket,
    due: Duration,
}

/// Outcome of a query edit, telling a timer host what to arm or disarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryChange {
    /// Pending computation that was superseded, if any.
    pub cancelled: Option<SearchTicket>,
    /// Newly scheduled computation and its delay, if any.
    pub scheduled: Option<(SearchTicket, Duration)>,
}

/// Query, results, and loading flag of the search box.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    results: Vec<Record>,
    is_loading: bool,
    pending: Option<PendingSearch>,
    next_ticket: u64,
}

impl SearchState {
    /// Empty query, no results, not loading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query with `query` as typed (no trimming).
    ///
    /// `now` is the host's monotonic time; the pending computation becomes
    /// due at `now + delay`. Setting the current query again changes nothing.
    pub fn set_query(
        &mut self,
        query: impl Into<String>,
        now: Duration,
        delay: Duration,
    ) -> QueryChange {
        let query = query.into();
        if query == self.query {
            return QueryChange::default();
        }
        self.query = query;
        let cancelled = self.pending.take().map(|p| p.ticket);

        if self.query.trim().is_empty() {
            self.results.clear();
            self.is_loading = false;
            crate::debug!(cancelled = ?cancelled, "blank query, results cleared");
            return QueryChange {
                cancelled,
                scheduled: None,
            };
        }

        self.next_ticket += 1;
        let ticket = SearchTicket(self.next_ticket);
        self.pending = Some(PendingSearch {
            ticket,
            due: now.saturating_add(delay),
        });
        self.is_loading = true;
        crate::debug!(%ticket, delay_ms = delay.as_millis() as u64, "search scheduled");

        QueryChange {
            cancelled,
            scheduled: Some((ticket, delay)),
        }
    }

    /// Deliver a timer completion for `ticket`.
    ///
    /// Returns `false` (and changes nothing) when `ticket` is not the
    /// currently pending computation.
    pub fn complete(&mut self, ticket: SearchTicket) -> bool {
        match self.pending {
            Some(p) if p.ticket == ticket => {
                self.pending = None;
                self.results = matching_records(&self.query);
                self.is_loading = false;
                crate::debug!(%ticket, results = self.results.len(), "search completed");
                true
            }
            _ => {
                crate::trace!(%ticket, "stale search completion ignored");
                false
            }
        }
    }

    /// Complete the pending computation if it is due at `now`.
    ///
    /// Returns `true` when results changed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending {
            Some(p) if now >= p.due => self.complete(p.ticket),
            _ => false,
        }
    }

    /// Current raw query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results of the last completed search.
    #[must_use]
    pub fn results(&self) -> &[Record] {
        &self.results
    }

    /// Whether a search is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Ticket of the pending computation.
    #[must_use]
    pub fn pending_ticket(&self) -> Option<SearchTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// When the pending computation becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|p| p.due)
    }

    /// Whether the "nothing found" message should be shown.
    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        !self.is_loading && !self.query.is_empty() && self.results.is_empty()
    }
}

/// Records whose note contains `query`, ignoring case, in list order.
///
/// The query is matched as given; callers decide what a blank query means.
#[must_use]
pub fn matching_records(query: &str) -> Vec<Record> {
    let needle = query.to_lowercase();
    TREASURE_NOTES
        .iter()
        .filter(|record| record.note.to_lowercase().contains(&needle))
        .copied()
        .collect()
}
