//! Literal motif search and per-window pattern annotation.
//!
//! Matching operates on the U→T normalized sequence. Search is plain
//! forward substring scanning with step-by-one advancement, so overlapping
//! and adjacent occurrences are all reported; no regex or fuzzy matching is
//! involved, and downstream count statistics depend on these exact
//! semantics.

use crate::constants::{
    ACCEPTOR_SIGNATURE_LENGTH, DONOR_SIGNATURE_LENGTH, GC_RICH_THRESHOLD, GC_RICH_WINDOW,
    POLYPYRIMIDINE_END_OFFSET, POLYPYRIMIDINE_TRACT_LENGTH,
};
use crate::types::{GcRichRegion, MotifClass, MotifHit, PatternAnnotation};

/// Normalizes a sequence to the uppercase DNA alphabet for matching.
///
/// `U` is rewritten to `T`; all other symbols are uppercased unchanged.
#[must_use]
pub fn normalize(sequence: &str) -> String {
    sequence
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'U' => 'T',
            other => other,
        })
        .collect()
}

/// Finds every occurrence of a literal motif, overlapping matches included.
///
/// After a match at position `p` the scan resumes at `p + 1`, not
/// `p + motif.len()`, so adjacent and overlapping hits are each reported.
/// Positions are returned in ascending order.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::motifs::find_motif_positions;
///
/// assert_eq!(find_motif_positions("AAAA", "AA"), vec![0, 1, 2]);
/// assert_eq!(find_motif_positions("GATTACA", "TT"), vec![2]);
/// assert!(find_motif_positions("GATTACA", "GGG").is_empty());
/// ```
#[must_use]
pub fn find_motif_positions(sequence: &str, motif: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    if motif.is_empty() {
        return positions;
    }
    let mut from = 0;
    while let Some(found) = sequence[from..].find(motif) {
        let position = from + found;
        positions.push(position);
        from = position + 1;
    }
    positions
}

/// Collects every hit for one motif class, ascending by start position.
fn scan_motif_class(sequence: &str, class: MotifClass) -> Vec<MotifHit> {
    let mut hits: Vec<MotifHit> = class
        .patterns()
        .iter()
        .flat_map(|motif| {
            find_motif_positions(sequence, motif)
                .into_iter()
                .map(|position| MotifHit {
                    position,
                    sequence: sequence[position..position + motif.len()].to_string(),
                })
        })
        .collect();
    hits.sort_by_key(|hit| hit.position);
    hits
}

/// Finds every 10-symbol window whose G/C fraction strictly exceeds 0.6.
///
/// Overlapping windows are each reported independently; no merging is
/// performed. The fraction is over the fixed window width.
fn scan_gc_rich_regions(sequence: &str) -> Vec<GcRichRegion> {
    let bytes = sequence.as_bytes();
    if bytes.len() < GC_RICH_WINDOW {
        return Vec::new();
    }
    let mut regions = Vec::new();
    for position in 0..=bytes.len() - GC_RICH_WINDOW {
        let window = &bytes[position..position + GC_RICH_WINDOW];
        let gc = window.iter().filter(|&&b| b == b'G' || b == b'C').count();
        let gc_fraction = gc as f64 / GC_RICH_WINDOW as f64;
        if gc_fraction > GC_RICH_THRESHOLD {
            regions.push(GcRichRegion {
                position,
                sequence: sequence[position..position + GC_RICH_WINDOW].to_string(),
                gc_fraction,
            });
        }
    }
    regions
}

/// Annotates one window with splice signatures and regulatory motifs.
///
/// Pure function of the sequence text: the same input always produces an
/// equal annotation. Callers guarantee a window length of at least 50, which
/// keeps the signature slices and the polypyrimidine tract well defined; for
/// shorter inputs the slices degrade to what is available and the tract
/// score falls back to zero.
///
/// # Examples
///
/// ```rust
/// use intronscan_core::motifs::annotate;
///
/// let sequence = format!("TCCTC{}", "A".repeat(45));
/// let annotation = annotate(&sequence);
/// assert_eq!(annotation.silencers[0].position, 0);
/// assert_eq!(annotation.splice_donor, "TCCTCA");
/// ```
#[must_use]
pub fn annotate(sequence: &str) -> PatternAnnotation {
    let normalized = normalize(sequence);
    let len = normalized.len();

    let splice_donor = normalized[..DONOR_SIGNATURE_LENGTH.min(len)].to_string();
    let splice_acceptor = normalized[len.saturating_sub(ACCEPTOR_SIGNATURE_LENGTH)..].to_string();

    let (polypyrimidine_tract, polypyrimidine_score) = if len >= ACCEPTOR_SIGNATURE_LENGTH {
        let tract = &normalized
            [len - ACCEPTOR_SIGNATURE_LENGTH..len - POLYPYRIMIDINE_END_OFFSET];
        let pyrimidines = tract.bytes().filter(|&b| b == b'C' || b == b'T').count();
        (
            tract.to_string(),
            pyrimidines as f64 / POLYPYRIMIDINE_TRACT_LENGTH as f64,
        )
    } else {
        (String::new(), 0.0)
    };

    PatternAnnotation {
        splice_donor,
        splice_acceptor,
        polypyrimidine_tract,
        polypyrimidine_score,
        branch_points: scan_motif_class(&normalized, MotifClass::BranchPoint),
        enhancers: scan_motif_class(&normalized, MotifClass::Enhancer),
        silencers: scan_motif_class(&normalized, MotifClass::Silencer),
        gc_rich_regions: scan_gc_rich_regions(&normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rna_to_dna() {
        assert_eq!(normalize("gauuaca"), "GATTACA");
        assert_eq!(normalize("ACGU"), "ACGT");
        assert_eq!(normalize("ACGT"), "ACGT");
    }

    #[test]
    fn test_find_motif_positions_overlapping() {
        // Step-by-one advancement reports overlapping hits
        assert_eq!(find_motif_positions("AAAAA", "AAA"), vec![0, 1, 2]);
        assert_eq!(find_motif_positions("TCCTCCTC", "TCCTC"), vec![0, 3]);
    }

    #[test]
    fn test_find_motif_positions_none() {
        assert!(find_motif_positions("ACGTACGT", "TTT").is_empty());
        assert!(find_motif_positions("", "A").is_empty());
        assert!(find_motif_positions("ACGT", "").is_empty());
    }

    #[test]
    fn test_silencer_at_position_zero() {
        let sequence = format!("TCCTC{}", "A".repeat(45));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.silencers.len(), 1);
        assert_eq!(annotation.silencers[0].position, 0);
        assert_eq!(annotation.silencers[0].sequence, "TCCTC");
    }

    #[test]
    fn test_branch_point_patterns_are_literal() {
        // An ACGT-only sequence can never contain the Y/N/R catalogue strings
        let sequence = "GT".to_string() + &"ACGT".repeat(20) + "AG";
        let annotation = annotate(&sequence);
        assert!(annotation.branch_points.is_empty());

        // But the literal string itself does match
        let planted = format!("YNYTRAY{}", "A".repeat(50));
        let annotation = annotate(&planted);
        assert_eq!(annotation.branch_points.len(), 1);
        assert_eq!(annotation.branch_points[0].position, 0);
    }

    #[test]
    fn test_splice_signatures() {
        let sequence = format!("GTAAGT{}TTTTTTTTTTTTCAG", "C".repeat(40));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.splice_donor, "GTAAGT");
        assert_eq!(annotation.splice_acceptor, "TTTTTTTTTTTTCAG");
        assert_eq!(annotation.splice_acceptor.len(), 15);
    }

    #[test]
    fn test_signatures_from_normalized_sequence() {
        let sequence = format!("guaagu{}uuuuuuuuuuuucag", "c".repeat(40));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.splice_donor, "GTAAGT");
        assert_eq!(annotation.splice_acceptor, "TTTTTTTTTTTTCAG");
    }

    #[test]
    fn test_polypyrimidine_score_all_pyrimidine() {
        // Last 15 = TTTTTTTTTTTT + CAG; [-15:-3] slice is all T
        let sequence = format!("{}TTTTTTTTTTTTCAG", "A".repeat(40));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.polypyrimidine_tract, "TTTTTTTTTTTT");
        assert_eq!(annotation.polypyrimidine_score, 1.0);
    }

    #[test]
    fn test_polypyrimidine_score_no_pyrimidine() {
        let sequence = format!("{}AAAAAAAAAAAAGAG", "T".repeat(40));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.polypyrimidine_score, 0.0);
    }

    #[test]
    fn test_polypyrimidine_score_mixed() {
        // 6 of the 12 tract symbols are pyrimidines
        let sequence = format!("{}TCTCTCAAAAAAGAG", "G".repeat(40));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.polypyrimidine_score, 0.5);
    }

    #[test]
    fn test_gc_rich_all_gc_window() {
        let sequence = format!("{}GCGCGCGCGC{}", "A".repeat(20), "A".repeat(20));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.gc_rich_regions.len(), 1);
        assert_eq!(annotation.gc_rich_regions[0].position, 20);
        assert_eq!(annotation.gc_rich_regions[0].gc_fraction, 1.0);
    }

    #[test]
    fn test_gc_rich_threshold_is_strict() {
        // Exactly 6/10 G/C: excluded (threshold is strictly > 0.6)
        let sequence = format!("{}GGGCCCAAAT{}", "T".repeat(20), "T".repeat(20));
        let annotation = annotate(&sequence);
        assert!(annotation.gc_rich_regions.is_empty());

        // 7/10: included
        let sequence = format!("{}GGGCCCGAAT{}", "T".repeat(20), "T".repeat(20));
        let annotation = annotate(&sequence);
        assert!(!annotation.gc_rich_regions.is_empty());
        assert_eq!(annotation.gc_rich_regions[0].gc_fraction, 0.7);
    }

    #[test]
    fn test_gc_rich_overlapping_windows_not_merged() {
        // An 11-long all-GC run yields two overlapping 10-mers
        let sequence = format!("{}GCGCGCGCGCG{}", "A".repeat(20), "A".repeat(20));
        let annotation = annotate(&sequence);
        assert_eq!(annotation.gc_rich_regions.len(), 2);
        assert_eq!(annotation.gc_rich_regions[0].position, 20);
        assert_eq!(annotation.gc_rich_regions[1].position, 21);
    }

    #[test]
    fn test_hits_sorted_ascending() {
        let sequence = format!("TGCATG{}TCCTC{}TCCTC", "A".repeat(20), "A".repeat(20));
        let annotation = annotate(&sequence);
        let positions: Vec<usize> = annotation.silencers.iter().map(|h| h.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_annotate_is_pure() {
        let sequence = format!("GT{}AG", "ACGT".repeat(30));
        let first = annotate(&sequence);
        let second = annotate(&sequence);
        assert_eq!(first, second);
    }
}
