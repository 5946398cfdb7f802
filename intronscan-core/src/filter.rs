//! Window acceptance filter.
//!
//! Rules apply in order and short-circuit on the first failure: minimum
//! length, boundary signature, fold, energy threshold. The boundary rule
//! (starts GT/GU, ends AG) is a fixed biological convention, not
//! configurable.

use crate::constants::{ACCEPTOR_DINUCLEOTIDE, DONOR_DINUCLEOTIDES, MIN_CANDIDATE_LENGTH};
use crate::fold::FoldOracle;
use crate::motifs::annotate;
use crate::types::Candidate;

/// Returns whether a window carries the donor/acceptor boundary signature.
#[must_use]
pub fn has_boundary_signature(sequence: &str) -> bool {
    DONOR_DINUCLEOTIDES
        .iter()
        .any(|donor| sequence.starts_with(donor))
        && sequence.ends_with(ACCEPTOR_DINUCLEOTIDE)
}

/// G+C content of a sequence as a percentage of its length.
#[must_use]
pub fn gc_content_percent(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc = sequence
        .bytes()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();
    gc as f64 / sequence.len() as f64 * 100.0
}

/// Decides whether one window is a candidate.
///
/// Returns `None` on rejection, or a fully annotated [`Candidate`] on
/// acceptance. Oracle failures are treated as rejections and never
/// propagate; a malformed window must not abort a multi-hour scan.
///
/// Acceptance requires, in order:
/// 1. length ≥ 50,
/// 2. the GT/GU...AG boundary signature,
/// 3. a successful fold with energy strictly below `delta_g_threshold`.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::filter::evaluate_window;
/// use intronscan_core::fold::NussinovOracle;
///
/// let oracle = NussinovOracle::new();
/// let window = format!("GT{}AG", "A".repeat(46));
/// // Unstructured poly-A folds near 0 kcal/mol: rejected at -35.0
/// assert!(evaluate_window(&window, -35.0, &oracle).is_none());
/// ```
#[must_use]
pub fn evaluate_window(
    sequence: &str,
    delta_g_threshold: f64,
    oracle: &dyn FoldOracle,
) -> Option<Candidate> {
    if sequence.len() < MIN_CANDIDATE_LENGTH {
        return None;
    }
    if !has_boundary_signature(sequence) {
        return None;
    }

    let fold = oracle.fold(sequence).ok()?;
    if fold.energy >= delta_g_threshold {
        return None;
    }

    Some(Candidate {
        sequence: sequence.to_string(),
        length: sequence.len(),
        gc_content: gc_content_percent(sequence),
        delta_g: fold.energy,
        structure: fold.structure,
        annotation: annotate(sequence),
    })
}
