use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_DELTA_G_THRESHOLD, DEFAULT_MAX_INTRON_LENGTH,
    DEFAULT_MIN_INTRON_LENGTH, DEFAULT_PROGRESS_INTERVAL, DEFAULT_SAMPLE_PERCENTAGE,
    DEFAULT_STEP_SIZE, DEFAULT_WINDOW_SIZE,
};
use crate::types::ScanError;

/// Configuration settings for one genome scan.
///
/// Controls window generation, acceptance filtering, sampling, progress
/// reporting, and execution. All parameters are validated before a scan
/// starts; invalid combinations fail with [`ScanError::Configuration`].
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use intronscan_core::config::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.window_size, 100);
/// ```
///
/// ## Sub-sampled scan with a fixed seed
///
/// ```rust
/// use intronscan_core::config::ScanConfig;
///
/// let config = ScanConfig {
///     sample_percentage: 10.0,
///     sample_seed: Some(42),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Base width of the sliding window in nucleotides.
    ///
    /// Each base offset additionally fans out into up to 100 sub-windows of
    /// increasing length starting at this size.
    ///
    /// **Default**: `100`
    pub window_size: usize,

    /// Step between consecutive base offsets.
    ///
    /// A step of 1 examines every position; larger steps trade coverage for
    /// speed on gigabase-scale genomes.
    ///
    /// **Default**: `1`
    pub step_size: usize,

    /// Percentage of base offsets to examine, in `(0, 100]`.
    ///
    /// Below 100, offsets are drawn from the full-density arithmetic
    /// progression without replacement. Set [`sample_seed`](Self::sample_seed)
    /// for a reproducible draw.
    ///
    /// **Default**: `100.0`
    pub sample_percentage: f64,

    /// Folding energy acceptance threshold in kcal/mol.
    ///
    /// A window is accepted only if its predicted energy is strictly below
    /// this value (more negative = more stable).
    ///
    /// **Default**: `-35.0`
    pub delta_g_threshold: f64,

    /// Minimum intron length parameter.
    ///
    /// Accepted for compatibility; the length fan-out is currently fixed at
    /// `window_size..window_size + 100` and this value does not constrain it.
    ///
    /// **Default**: `50`
    pub min_intron_length: usize,

    /// Maximum intron length parameter.
    ///
    /// Accepted for compatibility; currently does not constrain the length
    /// fan-out. See [`min_intron_length`](Self::min_intron_length).
    ///
    /// **Default**: `150`
    pub max_intron_length: usize,

    /// Number of processed windows between progress snapshots.
    ///
    /// Also the interval at which accumulated candidates are copied into the
    /// externally visible result store.
    ///
    /// **Default**: `100`
    pub progress_interval: usize,

    /// Number of windows evaluated per batch in parallel mode.
    ///
    /// Only relevant when [`num_threads`](Self::num_threads) enables the
    /// worker pool; cancellation is polled once per batch.
    ///
    /// **Default**: `500`
    pub batch_size: usize,

    /// Seed for the sub-sampling random number generator.
    ///
    /// When set, sampled scans draw the same offsets on every run.
    ///
    /// **Default**: `None` (seeded from entropy)
    pub sample_seed: Option<u64>,

    /// Number of worker threads for batched window evaluation.
    ///
    /// `None` keeps the scan strictly sequential with per-window
    /// cancellation polling. `Some(n)` evaluates batches across a Rayon
    /// pool of `n` workers.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,

    /// Suppress informational output during processing.
    ///
    /// **Default**: `false`
    pub quiet: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            step_size: DEFAULT_STEP_SIZE,
            sample_percentage: DEFAULT_SAMPLE_PERCENTAGE,
            delta_g_threshold: DEFAULT_DELTA_G_THRESHOLD,
            min_intron_length: DEFAULT_MIN_INTRON_LENGTH,
            max_intron_length: DEFAULT_MAX_INTRON_LENGTH,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            batch_size: DEFAULT_BATCH_SIZE,
            sample_seed: None,
            num_threads: None,
            quiet: false,
        }
    }
}

impl ScanConfig {
    /// Validates the window and sampling parameters against a sequence length.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if:
    /// - `window_size` is zero or exceeds `sequence_length`
    /// - `step_size` is zero
    /// - `sample_percentage` is outside `(0, 100]`
    /// - `progress_interval` or `batch_size` is zero
    pub fn validate(&self, sequence_length: usize) -> Result<(), ScanError> {
        if self.window_size == 0 {
            return Err(ScanError::Configuration(
                "window size must be positive".to_string(),
            ));
        }
        if self.window_size > sequence_length {
            return Err(ScanError::Configuration(format!(
                "window size {} exceeds sequence length {}",
                self.window_size, sequence_length
            )));
        }
        if self.step_size == 0 {
            return Err(ScanError::Configuration(
                "step size must be positive".to_string(),
            ));
        }
        if self.sample_percentage <= 0.0 || self.sample_percentage > 100.0 {
            return Err(ScanError::Configuration(format!(
                "sample percentage {} is outside (0, 100]",
                self.sample_percentage
            )));
        }
        if self.progress_interval == 0 {
            return Err(ScanError::Configuration(
                "progress interval must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ScanError::Configuration(
                "batch size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
