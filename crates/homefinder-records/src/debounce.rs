//! Debounced queries and the stale-response guard.
//!
//! A view issues a new query for every keystroke or filter change. Older
//! queries are not cancelled at the transport level; instead every query
//! takes a [`QueryTicket`] and its result is only accepted if no newer
//! ticket has been issued since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Identity of one issued query. Tickets from the same sequencer are
/// strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues query tickets and decides whether a response is still current.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: AtomicU64,
}

impl QuerySequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every earlier one.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` if no newer ticket has been issued.
    #[must_use]
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Passes `value` through if `ticket` is current and drops it otherwise.
    pub fn accept<T>(&self, ticket: QueryTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding stale query response"
            );
            None
        }
    }
}

/// Delays a query until its input has been stable for the configured delay.
///
/// A call that is superseded by a newer call during its delay resolves to
/// `None` and the caller skips the query.
#[derive(Debug)]
pub struct DebouncedQuery {
    delay: Duration,
    sequencer: QuerySequencer,
}

impl DebouncedQuery {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sequencer: QuerySequencer::new(),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the delay and returns `input` unless a newer call arrived
    /// in the meantime.
    pub async fn settle<T>(&self, input: T) -> Option<T> {
        self.settle_ticketed(input).await.map(|(_, input)| input)
    }

    /// Like [`Self::settle`], but also hands back the ticket so the result
    /// of the query that follows can be checked with [`Self::sequencer`].
    pub async fn settle_ticketed<T>(&self, input: T) -> Option<(QueryTicket, T)> {
        let ticket = self.sequencer.issue();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.sequencer.accept(ticket, input).map(|input| (ticket, input))
    }

    #[must_use]
    pub fn sequencer(&self) -> &QuerySequencer {
        &self.sequencer
    }
}
