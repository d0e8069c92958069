use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation counter owned by a screen.
///
/// A request takes a ticket before it starts; leaving the screen bumps the
/// generation so results that resolve afterwards can be recognised and
/// dropped instead of being applied to state nobody is looking at.
#[derive(Debug, Clone, Default)]
pub struct ViewEpoch {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochTicket(u64);

impl ViewEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> EpochTicket {
        EpochTicket(self.generation.load(Ordering::Acquire))
    }

    /// Called when the screen is left or its data is superseded
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: EpochTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_goes_stale_after_invalidate() {
        let epoch = ViewEpoch::new();
        let ticket = epoch.ticket();
        assert!(epoch.is_current(ticket));

        let shared = epoch.clone();
        shared.invalidate();

        assert!(!epoch.is_current(ticket));
        assert!(epoch.is_current(epoch.ticket()));
    }
}
