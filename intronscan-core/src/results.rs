use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::types::Candidate;

/// Periodic progress report emitted every fixed processed-count interval.
///
/// Consumable by any presentation layer; the scan core makes no assumption
/// about what observes these snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Windows evaluated so far
    pub processed: usize,
    /// Total windows the scan will evaluate
    pub total: usize,
    /// Candidates accepted so far
    pub accepted: usize,
    /// Fraction of the scan completed, in `[0, 1]`
    pub fraction: f64,
    /// Wall-clock time since the scan started
    pub elapsed: Duration,
    /// Linear estimate of remaining time: `elapsed * remaining / processed`
    pub eta: Duration,
    /// Running mean ΔG of accepted candidates, if any were accepted
    pub mean_delta_g: Option<f64>,
}

/// Terminal state of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every planned window was evaluated
    Completed,
    /// Cancellation was observed; the outcome carries partial results
    Cancelled,
}

/// Final (or partial, on cancellation) result of one scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Accepted candidates in evaluation order
    pub candidates: Vec<Candidate>,
    /// Windows evaluated before the scan ended
    pub processed: usize,
    /// Number of accepted candidates
    pub accepted: usize,
    /// Wall-clock duration of the scan
    pub elapsed: Duration,
    /// Whether the scan completed or was cancelled
    pub status: ScanStatus,
}

impl ScanOutcome {
    /// Whether this outcome carries partial results from a cancelled scan.
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.status == ScanStatus::Cancelled
    }
}

/// Externally visible store of accumulated candidates.
///
/// The orchestrator copies its accumulated candidates here at every
/// progress interval, so a cancelled or crashed scan never loses more than
/// one interval's worth of work. Reads and writes are atomic with respect
/// to each other: a concurrent reader never observes the store mid-append.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::results::ResultStore;
///
/// let store = ResultStore::new();
/// let reader = store.clone();
/// assert!(reader.snapshot().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    inner: Arc<Mutex<Vec<Candidate>>>,
}

impl ResultStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the store contents with the current candidate collection.
    pub fn replace(&self, candidates: &[Candidate]) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clear();
        guard.extend_from_slice(candidates);
    }

    /// Removes all candidates from the store.
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns a copy of the store contents at this instant.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Candidate> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of candidates currently visible in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store is currently empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
