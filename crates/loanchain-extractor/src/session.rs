//! Upload session state
//!
//! Holds the deal the user is currently looking at. Each upload attempt takes
//! a ticket before extraction starts; when it finishes, its deal is installed
//! only if no newer attempt has begun in the meantime.

use loanchain_domain::Deal;
use tracing::debug;

/// Proof that an upload attempt was started, used to install its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

/// Current deal plus the generation counter guarding it
#[derive(Debug, Default)]
pub struct UploadSession {
    generation: u64,
    current: Option<Deal>,
}

impl UploadSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an upload attempt, making every earlier ticket stale
    pub fn begin(&mut self) -> UploadTicket {
        self.generation += 1;
        UploadTicket(self.generation)
    }

    /// Install `deal` if `ticket` belongs to the latest attempt
    ///
    /// Returns whether the deal was installed. The previous deal is replaced
    /// wholesale.
    pub fn apply(&mut self, ticket: UploadTicket, deal: Deal) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "Discarding result of upload {} (latest is {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.current = Some(deal);
        true
    }

    /// The deal currently installed
    pub fn current(&self) -> Option<&Deal> {
        self.current.as_ref()
    }

    /// Remove and return the installed deal
    pub fn take(&mut self) -> Option<Deal> {
        self.current.take()
    }
}
