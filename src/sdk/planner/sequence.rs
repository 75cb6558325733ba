//! Sequence numbers for outbound calls.
//!
//! Each call takes a ticket on the slot it writes to. A completion is applied
//! only when its ticket is newer than the last one applied to that slot, so a
//! late answer to an old request can never overwrite a newer one.

use super::state::Endpoint;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Start,
    End,
    Route,
}

impl From<Endpoint> for Slot {
    fn from(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Start => Slot::Start,
            Endpoint::End => Slot::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    slot: Slot,
    seq: u64,
}

impl Ticket {
    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct SequenceTracker {
    last_issued: u64,
    last_applied: HashMap<Slot, u64>,
}

impl SequenceTracker {
    pub fn issue(&mut self, slot: Slot) -> Ticket {
        self.last_issued += 1;
        Ticket {
            slot,
            seq: self.last_issued,
        }
    }

    /// Records the ticket as applied if it is the newest seen for its slot.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        let applied = self.last_applied.entry(ticket.slot).or_insert(0);
        if ticket.seq > *applied {
            *applied = ticket.seq;
            true
        } else {
            false
        }
    }

    /// Marks a synchronous write, making every outstanding ticket on the slot stale.
    pub fn supersede(&mut self, slot: Slot) {
        let ticket = self.issue(slot);
        self.accept(ticket);
    }

    pub fn last_applied(&self, slot: Slot) -> Option<u64> {
        self.last_applied.get(&slot).copied()
    }
}
