use std::ops::Range;

use rand::rngs::StdRng;
use rand::{seq::index, SeedableRng};

use crate::config::ScanConfig;
use crate::constants::LENGTH_SWEEP;
use crate::types::ScanError;

/// A single unit of scan work: a contiguous substring of the genome.
///
/// Windows are ephemeral; the sequence text is materialized on demand by
/// the orchestrator and only survives inside an accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Start offset within the genome (0-based)
    pub start: usize,
    /// Length of the window in nucleotides
    pub length: usize,
}

/// Base offset enumeration order for one scan.
#[derive(Debug, Clone)]
enum BaseOffsets {
    /// Every offset of the arithmetic progression, in increasing order
    Full,
    /// A without-replacement draw from the progression
    Sampled(Vec<usize>),
}

/// Lazy generator of the (offset, length) window stream for one scan.
///
/// Full-density mode (`sample_percentage == 100`) walks
/// `range(0, sequence_length - window_size + 1, step_size)` in increasing
/// order, deterministic and restartable. Sub-sampled mode draws distinct
/// offsets from that same progression without replacement; the draw is
/// reproducible when [`ScanConfig::sample_seed`] is set.
///
/// Each base offset fans out into sub-windows of increasing length from
/// `window_size` up to (but not including)
/// `min(window_size + 100, sequence_length - offset)`.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::config::ScanConfig;
/// use intronscan_core::windows::WindowPlan;
///
/// let config = ScanConfig {
///     window_size: 100,
///     step_size: 10,
///     ..Default::default()
/// };
/// let plan = WindowPlan::new(1000, &config)?;
/// assert_eq!(plan.base_offset_count(), 91);
/// # Ok::<(), intronscan_core::types::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WindowPlan {
    sequence_length: usize,
    window_size: usize,
    step_size: usize,
    offsets: BaseOffsets,
}

impl WindowPlan {
    /// Builds the window plan for a sequence of the given length.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if the window, step, or sampling
    /// parameters are invalid (see [`ScanConfig::validate`]).
    pub fn new(sequence_length: usize, config: &ScanConfig) -> Result<Self, ScanError> {
        config.validate(sequence_length)?;

        let offsets = if config.sample_percentage < 100.0 {
            let full = full_offset_count(sequence_length, config.window_size, config.step_size);
            // The floor-divided total mirrors the inherited sample-size
            // computation; it can undercount the progression by one.
            let total = (sequence_length - config.window_size + 1) / config.step_size;
            let sample_size = (total as f64 * config.sample_percentage / 100.0).round() as usize;
            let sample_size = sample_size.min(full);

            let mut rng = match config.sample_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let drawn = index::sample(&mut rng, full, sample_size)
                .into_iter()
                .map(|i| i * config.step_size)
                .collect();
            BaseOffsets::Sampled(drawn)
        } else {
            BaseOffsets::Full
        };

        Ok(Self {
            sequence_length,
            window_size: config.window_size,
            step_size: config.step_size,
            offsets,
        })
    }

    /// Number of base offsets this plan will yield.
    #[must_use]
    pub fn base_offset_count(&self) -> usize {
        match &self.offsets {
            BaseOffsets::Full => {
                full_offset_count(self.sequence_length, self.window_size, self.step_size)
            }
            BaseOffsets::Sampled(drawn) => drawn.len(),
        }
    }

    /// Iterates the base offsets in enumeration order.
    pub fn base_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        let (full, sampled) = match &self.offsets {
            BaseOffsets::Full => (
                Some((0..=self.sequence_length - self.window_size).step_by(self.step_size)),
                None,
            ),
            BaseOffsets::Sampled(drawn) => (None, Some(drawn.iter().copied())),
        };
        full.into_iter().flatten().chain(sampled.into_iter().flatten())
    }

    /// The sub-window lengths enumerated for a base offset.
    ///
    /// Empty when the offset sits so close to the sequence end that no
    /// length strictly below `sequence_length - offset` reaches the window
    /// size; in particular the final full-density offset fans out into
    /// nothing.
    #[must_use]
    pub fn length_sweep(&self, offset: usize) -> Range<usize> {
        let end = (self.window_size + LENGTH_SWEEP).min(self.sequence_length - offset);
        self.window_size..end.max(self.window_size)
    }

    /// Iterates every window of the scan: each base offset expanded through
    /// its length sweep, a separate unit of work per (offset, length) pair.
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        self.base_offsets().flat_map(move |start| {
            self.length_sweep(start)
                .map(move |length| Window { start, length })
        })
    }

    /// Total number of windows the plan will produce, for progress totals.
    #[must_use]
    pub fn total_window_count(&self) -> usize {
        self.base_offsets()
            .map(|offset| self.length_sweep(offset).len())
            .sum()
    }
}

/// Count of offsets in `range(0, sequence_length - window_size + 1, step)`.
fn full_offset_count(sequence_length: usize, window_size: usize, step_size: usize) -> usize {
    (sequence_length - window_size + 1).div_ceil(step_size)
}
