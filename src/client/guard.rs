//! In-flight fetch guard

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag allowing at most one fetch at a time
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct FetchGuard {
    in_flight: Arc<AtomicBool>,
}

/// Held for the duration of one fetch; dropping it clears the flag
#[derive(Debug)]
pub struct FetchPermit {
    in_flight: Arc<AtomicBool>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or `None` while another permit is alive
    pub fn try_acquire(&self) -> Option<FetchPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FetchPermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for FetchPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
