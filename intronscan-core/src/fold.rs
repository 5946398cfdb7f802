//! RNA secondary-structure folding oracle.
//!
//! The scan consumes folding as an oracle behind the [`FoldOracle`] trait:
//! `fold` maps a sequence to a dot-bracket structure and a signed energy,
//! `inverse_fold` designs a sequence toward a target structure. Oracle
//! failures are recoverable; the filter maps them to window rejection so a
//! single bad window can never abort a scan.
//!
//! [`NussinovOracle`] is the built-in implementation: base-pair maximization
//! with pair-weighted pseudo-energies. It stands in for an external
//! thermodynamic folder so the CLI and tests run self-contained.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::constants::{
    AT_PAIR_ENERGY, GC_PAIR_ENERGY, INVERSE_FOLD_MAX_ROUNDS, MIN_HAIRPIN_LOOP, WOBBLE_PAIR_ENERGY,
};

/// A predicted secondary structure with its folding energy.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold {
    /// Dot-bracket encoding of the base pairing
    pub structure: String,
    /// Predicted free energy in kcal/mol (more negative = more stable)
    pub energy: f64,
}

/// Result of an inverse folding run.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseFold {
    /// The designed sequence
    pub sequence: String,
    /// Structure distance between the design's fold and the target
    pub distance: f64,
}

/// Errors raised by a folding oracle.
#[derive(Error, Debug)]
pub enum FoldError {
    /// The input sequence was empty
    #[error("Cannot fold an empty sequence")]
    EmptySequence,
    /// Sequence and target structure lengths differ
    #[error("Sequence length {0} does not match structure length {1}")]
    LengthMismatch(usize, usize),
    /// The oracle failed internally
    #[error("Folding failed: {0}")]
    Failed(String),
}

/// Minimum-free-energy folding consumed by the acceptance filter.
///
/// Implementations must be shareable across scan workers (`Sync`); each
/// worker calls the oracle through a shared reference.
pub trait FoldOracle: Sync {
    /// Folds a sequence, returning its structure and energy.
    ///
    /// # Errors
    ///
    /// Returns [`FoldError`] when the sequence cannot be folded. Callers in
    /// the scan pipeline treat any error as a window rejection.
    fn fold(&self, sequence: &str) -> Result<Fold, FoldError>;

    /// Designs a sequence whose fold approximates a target structure.
    ///
    /// # Errors
    ///
    /// Returns [`FoldError`] when the inputs are unusable.
    fn inverse_fold(&self, sequence: &str, target_structure: &str)
        -> Result<InverseFold, FoldError>;
}

/// Built-in folding oracle based on Nussinov base-pair maximization.
///
/// Pairs are weighted (G-C strongest, then A-T/A-U, then the G-T/G-U
/// wobble) and the reported energy is the negated weight sum of the optimal
/// pairing, with a minimum hairpin loop of 3 unpaired bases. Inverse
/// folding is a mutate-and-refold hill climb scored by structure Hamming
/// distance.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::fold::{FoldOracle, NussinovOracle};
///
/// let oracle = NussinovOracle::new();
/// let fold = oracle.fold("GGGGAAAACCCC")?;
/// assert_eq!(fold.structure.len(), 12);
/// assert!(fold.energy < 0.0);
/// # Ok::<(), intronscan_core::fold::FoldError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NussinovOracle {
    /// Seed for the inverse-folding mutation walk
    seed: u64,
}

impl NussinovOracle {
    /// Creates an oracle with the default seed.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: 0 }
    }

    /// Creates an oracle with a custom seed for inverse folding.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for NussinovOracle {
    fn default() -> Self {
        Self::new()
    }
}

/// Weight of pairing two bases, or `None` if they cannot pair.
///
/// Operates on uppercase symbols with U already mapped to T; characters
/// outside the alphabet never pair.
fn pair_energy(a: u8, b: u8) -> Option<f64> {
    match (a, b) {
        (b'G', b'C') | (b'C', b'G') => Some(GC_PAIR_ENERGY),
        (b'A', b'T') | (b'T', b'A') => Some(AT_PAIR_ENERGY),
        (b'G', b'T') | (b'T', b'G') => Some(WOBBLE_PAIR_ENERGY),
        _ => None,
    }
}

impl FoldOracle for NussinovOracle {
    fn fold(&self, sequence: &str) -> Result<Fold, FoldError> {
        if sequence.is_empty() {
            return Err(FoldError::EmptySequence);
        }

        let bases: Vec<u8> = sequence
            .bytes()
            .map(|b| match b.to_ascii_uppercase() {
                b'U' => b'T',
                other => other,
            })
            .collect();
        let n = bases.len();

        // best[i][j]: maximal pairing weight (positive) of bases[i..=j]
        let mut best = vec![vec![0.0f64; n]; n];
        for span in MIN_HAIRPIN_LOOP + 1..n {
            for i in 0..n - span {
                let j = i + span;
                let mut score = best[i + 1][j].max(best[i][j - 1]);
                if let Some(energy) = pair_energy(bases[i], bases[j]) {
                    score = score.max(best[i + 1][j - 1] - energy);
                }
                for k in i + 1..j {
                    score = score.max(best[i][k] + best[k + 1][j]);
                }
                best[i][j] = score;
            }
        }

        // Traceback the optimal pairing into dot-bracket notation
        let mut structure = vec![b'.'; n];
        let mut stack = vec![(0usize, n - 1)];
        while let Some((i, j)) = stack.pop() {
            if i >= j || j - i <= MIN_HAIRPIN_LOOP {
                continue;
            }
            if best[i][j] == best[i + 1][j] {
                stack.push((i + 1, j));
                continue;
            }
            if best[i][j] == best[i][j - 1] {
                stack.push((i, j - 1));
                continue;
            }
            if let Some(energy) = pair_energy(bases[i], bases[j]) {
                if best[i][j] == best[i + 1][j - 1] - energy {
                    structure[i] = b'(';
                    structure[j] = b')';
                    stack.push((i + 1, j - 1));
                    continue;
                }
            }
            for k in i + 1..j {
                if best[i][j] == best[i][k] + best[k + 1][j] {
                    stack.push((i, k));
                    stack.push((k + 1, j));
                    break;
                }
            }
        }

        Ok(Fold {
            structure: String::from_utf8(structure)
                .map_err(|e| FoldError::Failed(e.to_string()))?,
            energy: -best[0][n - 1],
        })
    }

    fn inverse_fold(
        &self,
        sequence: &str,
        target_structure: &str,
    ) -> Result<InverseFold, FoldError> {
        if sequence.is_empty() {
            return Err(FoldError::EmptySequence);
        }
        if sequence.len() != target_structure.len() {
            return Err(FoldError::LengthMismatch(
                sequence.len(),
                target_structure.len(),
            ));
        }

        let alphabet = [b'A', b'C', b'G', b'U'];
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut current: Vec<u8> = sequence.bytes().collect();
        let mut distance = structure_distance(&self.fold(sequence)?.structure, target_structure);

        for _ in 0..INVERSE_FOLD_MAX_ROUNDS {
            if distance == 0 {
                break;
            }
            let position = rng.gen_range(0..current.len());
            let replacement = alphabet[rng.gen_range(0..alphabet.len())];
            let previous = current[position];
            if previous == replacement {
                continue;
            }
            current[position] = replacement;

            let candidate = String::from_utf8_lossy(&current).into_owned();
            let folded = self.fold(&candidate)?;
            let candidate_distance = structure_distance(&folded.structure, target_structure);
            if candidate_distance <= distance {
                distance = candidate_distance;
            } else {
                current[position] = previous;
            }
        }

        Ok(InverseFold {
            sequence: String::from_utf8_lossy(&current).into_owned(),
            distance: distance as f64,
        })
    }
}

/// Hamming distance between two dot-bracket strings.
fn structure_distance(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count() + a.len().abs_diff(b.len())
}
