//! Per-key debouncing for search-as-you-type requests
//!
//! Each key (one client's search box) holds at most one live ticket. Issuing a
//! new ticket supersedes the previous one; a waiting caller holding an old
//! ticket learns it lost and returns without doing any work.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default quiet period before a search runs
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle for one debounced call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct DebounceState {
    next: u64,
    live: HashMap<String, u64>,
}

/// Keeps the latest ticket per key
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    state: Arc<Mutex<DebounceState>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Arc::new(Mutex::new(DebounceState::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Issue a fresh ticket for `key`, invalidating any earlier one
    pub fn issue(&self, key: &str) -> Ticket {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.next += 1;
        let id = state.next;
        state.live.insert(key.to_string(), id);
        Ticket(id)
    }

    /// Drop whatever ticket `key` holds without issuing a new one
    pub fn supersede(&self, key: &str) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.live.remove(key);
    }

    /// Whether `ticket` is still the newest for `key`
    pub fn is_current(&self, key: &str, ticket: Ticket) -> bool {
        let state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.live.get(key) == Some(&ticket.0)
    }

    /// Claim the right to run. Succeeds once, and only for the newest ticket.
    pub fn finish(&self, key: &str, ticket: Ticket) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if state.live.get(key) == Some(&ticket.0) {
            state.live.remove(key);
            true
        } else {
            false
        }
    }

    /// Issue a ticket, wait out the quiet period and report whether this call won
    pub async fn settle(&self, key: &str) -> bool {
        let pending = PendingTicket {
            debouncer: self,
            key,
            ticket: self.issue(key),
        };
        tokio::time::sleep(self.delay).await;
        self.finish(key, pending.ticket)
    }
}

/// Releases a ticket whose caller went away mid-wait, e.g. a dropped request
struct PendingTicket<'a> {
    debouncer: &'a Debouncer,
    key: &'a str,
    ticket: Ticket,
}

impl Drop for PendingTicket<'_> {
    fn drop(&mut self) {
        // no-op once finished or superseded
        self.debouncer.finish(self.key, self.ticket);
    }
}
