//! Latest-request-wins bookkeeping for searches.
//!
//! Each search takes a ticket before it starts. When it finishes, its result
//! is only applied if no newer ticket has been issued in the meantime, so a
//! slow query that resolves late cannot overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct SearchGenerations {
    latest: AtomicU64,
}

impl SearchGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before it.
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation != 0 && generation == self.latest()
    }

    /// Hands `value` back only if `ticket` is still the newest issued.
    pub fn settle<T>(&self, ticket: SearchTicket, value: T) -> Option<T> {
        if self.is_current(ticket.0) {
            Some(value)
        } else {
            None
        }
    }
}
