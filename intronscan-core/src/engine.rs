use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::ScanConfig;
use crate::filter::evaluate_window;
use crate::fold::FoldOracle;
use crate::results::{ProgressSnapshot, ResultStore, ScanOutcome, ScanStatus};
use crate::types::{Candidate, ScanError};
use crate::windows::{Window, WindowPlan};

/// Cooperative cancellation signal polled by the orchestrator.
///
/// Cancellation is polled, not preemptive: it is checked once per window
/// (or once per batch in parallel mode) and takes effect at the next check
/// point. Clones share the same flag, so a token handed to another thread
/// or a signal handler cancels the scan that holds the original.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::engine::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; takes effect at the orchestrator's next poll.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Resets the token so a new scan can reuse it.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

/// One scan over one genome: the orchestrator of the whole pipeline.
///
/// The session borrows the genome read-only for its lifetime and owns the
/// externally visible [`ResultStore`]. One scan runs
/// `Idle → Running → {Completed, Cancelled}`; a finished session may start
/// a new scan over the same genome.
///
/// Per window, the session drives the sliding-window generator through the
/// acceptance filter (which consults the folding oracle) and, on
/// acceptance, the pattern annotator. Every `progress_interval` windows it
/// emits a [`ProgressSnapshot`] and copies the accumulated candidates into
/// the result store, so an interrupted scan never loses more than one
/// interval's worth of work.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::config::ScanConfig;
/// use intronscan_core::engine::{CancelToken, ScanSession};
/// use intronscan_core::fold::NussinovOracle;
///
/// let genome = format!("GT{}AG{}", "A".repeat(46), "T".repeat(30));
/// let config = ScanConfig {
///     window_size: 50,
///     quiet: true,
///     ..Default::default()
/// };
///
/// let session = ScanSession::new(&genome, config)?;
/// let outcome = session.scan(&NussinovOracle::new(), &CancelToken::new(), |_| {})?;
/// assert!(!outcome.was_cancelled());
/// # Ok::<(), intronscan_core::types::ScanError>(())
/// ```
#[derive(Debug)]
pub struct ScanSession<'g> {
    /// The genome sequence, borrowed read-only for the scan's duration
    genome: &'g str,
    /// Scan parameters, validated when the session is created
    config: ScanConfig,
    /// Externally visible snapshot of accumulated candidates
    store: ResultStore,
}

impl<'g> ScanSession<'g> {
    /// Creates a session over a genome sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotLoaded`] for an empty genome and
    /// [`ScanError::Configuration`] for invalid parameters. Both are raised
    /// here, before any scanning starts.
    pub fn new(genome: &'g str, config: ScanConfig) -> Result<Self, ScanError> {
        if genome.is_empty() {
            return Err(ScanError::NotLoaded);
        }
        config.validate(genome.len())?;
        Ok(Self {
            genome,
            config,
            store: ResultStore::new(),
        })
    }

    /// The configuration this session was created with.
    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// A shared handle to the externally visible result store.
    ///
    /// Safe to read from another thread while a scan is running; readers
    /// see the candidates as of the most recent progress interval.
    #[must_use]
    pub fn result_store(&self) -> ResultStore {
        self.store.clone()
    }

    /// Runs the scan to completion or until cancellation is observed.
    ///
    /// `on_progress` is invoked every `progress_interval` processed windows.
    /// On cancellation the candidates accumulated so far are returned with
    /// [`ScanStatus::Cancelled`] rather than discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if the window plan or the
    /// worker pool cannot be built. Per-window failures, including folding
    /// oracle errors, are handled as rejections and never surface here.
    pub fn scan<O, F>(
        &self,
        oracle: &O,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<ScanOutcome, ScanError>
    where
        O: FoldOracle,
        F: FnMut(&ProgressSnapshot),
    {
        let plan = WindowPlan::new(self.genome.len(), &self.config)?;
        let total = plan.total_window_count();

        let pool = match self.config.num_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        ScanError::Configuration(format!("Failed to configure thread pool: {}", e))
                    })?,
            ),
            None => None,
        };

        self.store.clear();
        if !self.config.quiet {
            eprintln!(
                "Scanning {} bp genome: {} windows to analyze...",
                self.genome.len(),
                total
            );
        }

        let start = Instant::now();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut processed = 0;
        let mut delta_g_sum = 0.0;
        let mut intervals_emitted = 0;
        let mut cancelled = false;

        let mut windows = plan.windows();
        'scan: loop {
            let batch: Vec<Window> = windows.by_ref().take(self.config.batch_size).collect();
            if batch.is_empty() {
                break;
            }

            match &pool {
                Some(pool) => {
                    if cancel.is_cancelled() {
                        cancelled = true;
                        break 'scan;
                    }
                    let accepted: Vec<Candidate> = pool.install(|| {
                        batch
                            .par_iter()
                            .filter_map(|window| {
                                evaluate_window(
                                    self.window_text(window),
                                    self.config.delta_g_threshold,
                                    oracle,
                                )
                            })
                            .collect()
                    });
                    processed += batch.len();
                    delta_g_sum += accepted.iter().map(|c| c.delta_g).sum::<f64>();
                    candidates.extend(accepted);

                    if processed / self.config.progress_interval > intervals_emitted {
                        intervals_emitted = processed / self.config.progress_interval;
                        self.emit_progress(
                            &mut on_progress,
                            &candidates,
                            processed,
                            total,
                            delta_g_sum,
                            start,
                        );
                    }
                }
                None => {
                    for window in &batch {
                        if cancel.is_cancelled() {
                            cancelled = true;
                            break 'scan;
                        }
                        if let Some(candidate) = evaluate_window(
                            self.window_text(window),
                            self.config.delta_g_threshold,
                            oracle,
                        ) {
                            delta_g_sum += candidate.delta_g;
                            candidates.push(candidate);
                        }
                        processed += 1;

                        if processed % self.config.progress_interval == 0 {
                            self.emit_progress(
                                &mut on_progress,
                                &candidates,
                                processed,
                                total,
                                delta_g_sum,
                                start,
                            );
                        }
                    }
                }
            }
        }

        self.store.replace(&candidates);
        let elapsed = start.elapsed();
        let accepted = candidates.len();

        if !self.config.quiet && cancelled {
            eprintln!(
                "Scan stopped after {} windows: {} candidates found",
                processed, accepted
            );
        }

        Ok(ScanOutcome {
            candidates,
            processed,
            accepted,
            elapsed,
            status: if cancelled {
                ScanStatus::Cancelled
            } else {
                ScanStatus::Completed
            },
        })
    }

    /// Materializes the sequence text of one window.
    fn window_text(&self, window: &Window) -> &str {
        &self.genome[window.start..window.start + window.length]
    }

    /// Emits one progress snapshot and refreshes the result store.
    fn emit_progress<F>(
        &self,
        on_progress: &mut F,
        candidates: &[Candidate],
        processed: usize,
        total: usize,
        delta_g_sum: f64,
        start: Instant,
    ) where
        F: FnMut(&ProgressSnapshot),
    {
        self.store.replace(candidates);

        let elapsed = start.elapsed();
        let remaining = total.saturating_sub(processed);
        let eta = if processed > 0 {
            elapsed.mul_f64(remaining as f64 / processed as f64)
        } else {
            Duration::ZERO
        };
        let snapshot = ProgressSnapshot {
            processed,
            total,
            accepted: candidates.len(),
            fraction: if total > 0 {
                (processed as f64 / total as f64).min(1.0)
            } else {
                1.0
            },
            elapsed,
            eta,
            mean_delta_g: if candidates.is_empty() {
                None
            } else {
                Some(delta_g_sum / candidates.len() as f64)
            },
        };
        on_progress(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::{Fold, FoldError, InverseFold};

    /// Oracle returning a fixed energy for every window.
    struct FixedOracle {
        energy: f64,
    }

    impl FoldOracle for FixedOracle {
        fn fold(&self, sequence: &str) -> Result<Fold, FoldError> {
            Ok(Fold {
                structure: ".".repeat(sequence.len()),
                energy: self.energy,
            })
        }

        fn inverse_fold(
            &self,
            sequence: &str,
            _target_structure: &str,
        ) -> Result<InverseFold, FoldError> {
            Ok(InverseFold {
                sequence: sequence.to_string(),
                distance: 0.0,
            })
        }
    }

    /// A 60 bp genome whose only acceptable window is (0, 50).
    fn test_genome() -> String {
        format!("GT{}AG{}", "A".repeat(46), "T".repeat(10))
    }

    fn quiet_config() -> ScanConfig {
        ScanConfig {
            window_size: 50,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_genome_fails_before_scanning() {
        let result = ScanSession::new("", quiet_config());
        assert!(matches!(result, Err(ScanError::NotLoaded)));
    }

    #[test]
    fn test_invalid_config_fails_before_scanning() {
        let genome = test_genome();
        let config = ScanConfig {
            window_size: 500,
            quiet: true,
            ..Default::default()
        };
        let result = ScanSession::new(&genome, config);
        assert!(matches!(result, Err(ScanError::Configuration(_))));
    }

    #[test]
    fn test_full_scan_counts_and_acceptance() {
        let genome = test_genome();
        let session = ScanSession::new(&genome, quiet_config()).unwrap();
        let oracle = FixedOracle { energy: -40.0 };

        let outcome = session
            .scan(&oracle, &CancelToken::new(), |_| {})
            .unwrap();

        // Offsets 0..=10, fan-out 10-o windows each: 55 total
        assert_eq!(outcome.processed, 55);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].sequence, &genome[..50]);
        assert_eq!(outcome.status, ScanStatus::Completed);
        assert!(!outcome.was_cancelled());
    }

    #[test]
    fn test_threshold_rejects_everything() {
        let genome = test_genome();
        let session = ScanSession::new(&genome, quiet_config()).unwrap();
        let oracle = FixedOracle { energy: -10.0 };

        let outcome = session
            .scan(&oracle, &CancelToken::new(), |_| {})
            .unwrap();
        assert_eq!(outcome.accepted, 0);
        assert_eq!(outcome.processed, 55);
    }

    #[test]
    fn test_progress_snapshots() {
        let genome = test_genome();
        let config = ScanConfig {
            progress_interval: 10,
            ..quiet_config()
        };
        let session = ScanSession::new(&genome, config).unwrap();
        let oracle = FixedOracle { energy: -40.0 };

        let mut snapshots = Vec::new();
        let outcome = session
            .scan(&oracle, &CancelToken::new(), |snapshot| {
                snapshots.push(snapshot.clone());
            })
            .unwrap();

        // 55 windows at interval 10: snapshots at 10, 20, 30, 40, 50
        assert_eq!(snapshots.len(), 5);
        assert_eq!(snapshots[0].processed, 10);
        assert_eq!(snapshots[4].processed, 50);
        for snapshot in &snapshots {
            assert_eq!(snapshot.total, 55);
            assert!((snapshot.fraction - snapshot.processed as f64 / 55.0).abs() < 1e-12);
        }
        // The single acceptance happens in the first interval
        assert_eq!(snapshots[0].accepted, 1);
        assert_eq!(snapshots[0].mean_delta_g, Some(-40.0));
        assert_eq!(outcome.accepted, 1);
    }

    #[test]
    fn test_result_store_updated_at_intervals() {
        let genome = test_genome();
        let config = ScanConfig {
            progress_interval: 10,
            ..quiet_config()
        };
        let session = ScanSession::new(&genome, config).unwrap();
        let store = session.result_store();
        let oracle = FixedOracle { energy: -40.0 };

        let mut seen = Vec::new();
        session
            .scan(&oracle, &CancelToken::new(), |snapshot| {
                // Reader view at each interval matches the snapshot count
                seen.push((snapshot.accepted, store.len()));
            })
            .unwrap();

        assert!(seen.iter().all(|(accepted, visible)| accepted == visible));
        // Final store holds the complete result set
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cancellation_returns_partial_results() {
        let genome = test_genome();
        let config = ScanConfig {
            progress_interval: 10,
            ..quiet_config()
        };
        let session = ScanSession::new(&genome, config).unwrap();
        let oracle = FixedOracle { energy: -40.0 };

        let cancel = CancelToken::new();
        let handle = cancel.clone();
        let outcome = session
            .scan(&oracle, &cancel, move |snapshot| {
                if snapshot.processed >= 10 {
                    handle.cancel();
                }
            })
            .unwrap();

        // Cancellation observed at the next per-window poll
        assert!(outcome.was_cancelled());
        assert_eq!(outcome.processed, 10);
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[test]
    fn test_cancelled_before_start_processes_nothing() {
        let genome = test_genome();
        let session = ScanSession::new(&genome, quiet_config()).unwrap();
        let oracle = FixedOracle { energy: -40.0 };

        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = session.scan(&oracle, &cancel, |_| {}).unwrap();

        assert!(outcome.was_cancelled());
        assert_eq!(outcome.processed, 0);
        assert!(outcome.candidates.is_empty());
    }

    #[test]
    fn test_token_reset_allows_rescan() {
        let genome = test_genome();
        let session = ScanSession::new(&genome, quiet_config()).unwrap();
        let oracle = FixedOracle { energy: -40.0 };

        let cancel = CancelToken::new();
        cancel.cancel();
        let first = session.scan(&oracle, &cancel, |_| {}).unwrap();
        assert!(first.was_cancelled());

        cancel.reset();
        let second = session.scan(&oracle, &cancel, |_| {}).unwrap();
        assert!(!second.was_cancelled());
        assert_eq!(second.processed, 55);
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let genome = test_genome();
        let sequential = ScanSession::new(&genome, quiet_config()).unwrap();
        let oracle = FixedOracle { energy: -40.0 };
        let expected = sequential
            .scan(&oracle, &CancelToken::new(), |_| {})
            .unwrap();

        let config = ScanConfig {
            num_threads: Some(2),
            batch_size: 8,
            ..quiet_config()
        };
        let parallel = ScanSession::new(&genome, config).unwrap();
        let outcome = parallel
            .scan(&oracle, &CancelToken::new(), |_| {})
            .unwrap();

        assert_eq!(outcome.processed, expected.processed);
        assert_eq!(outcome.candidates, expected.candidates);
    }

    #[test]
    fn test_session_rescannable() {
        let genome = test_genome();
        let session = ScanSession::new(&genome, quiet_config()).unwrap();
        let oracle = FixedOracle { energy: -40.0 };

        let first = session.scan(&oracle, &CancelToken::new(), |_| {}).unwrap();
        let second = session.scan(&oracle, &CancelToken::new(), |_| {}).unwrap();

        assert_eq!(first.processed, second.processed);
        assert_eq!(first.candidates, second.candidates);
    }
}
