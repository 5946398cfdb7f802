use std::fmt;

use thiserror::Error;

use crate::constants::{BRANCH_POINT_MOTIFS, ENHANCER_MOTIFS, SILENCER_MOTIFS};

/// Classes of regulatory motifs searched in every accepted window.
///
/// Each class maps to a fixed set of literal pattern strings over the
/// {A,C,G,T} alphabet. The catalogue is a process-wide constant; see
/// [`MotifClass::patterns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifClass {
    /// Branch point consensus patterns upstream of the 3' splice site
    BranchPoint,
    /// Exonic/intronic splicing enhancer patterns
    Enhancer,
    /// Exonic/intronic splicing silencer patterns
    Silencer,
}

impl MotifClass {
    /// Literal pattern strings for this motif class.
    ///
    /// Patterns are matched as exact substrings; characters such as `Y`,
    /// `N`, and `R` are not treated as IUPAC wildcards.
    #[must_use]
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::BranchPoint => &BRANCH_POINT_MOTIFS,
            Self::Enhancer => &ENHANCER_MOTIFS,
            Self::Silencer => &SILENCER_MOTIFS,
        }
    }
}

impl fmt::Display for MotifClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BranchPoint => write!(f, "branch_point"),
            Self::Enhancer => write!(f, "enhancer"),
            Self::Silencer => write!(f, "silencer"),
        }
    }
}

/// A single literal motif occurrence within a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifHit {
    /// Start position of the match within the window (0-based)
    pub position: usize,
    /// The matched slice of the normalized sequence
    pub sequence: String,
}

/// A contiguous 10-symbol window whose G/C fraction exceeds the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct GcRichRegion {
    /// Start position of the window (0-based)
    pub position: usize,
    /// The 10-symbol slice of the normalized sequence
    pub sequence: String,
    /// G/C fraction of the window (strictly above 0.6 by construction)
    pub gc_fraction: f64,
}

/// Structured motif annotation for one accepted window.
///
/// Produced once per candidate by the pattern annotator and immutable
/// thereafter. Signature slices are taken from the U→T normalized sequence
/// so they are consistent with motif search results.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternAnnotation {
    /// First 6 symbols of the normalized sequence (5' splice donor signature)
    pub splice_donor: String,
    /// Last 15 symbols of the normalized sequence (3' splice acceptor signature)
    pub splice_acceptor: String,
    /// The `[-15:-3]` slice scored for pyrimidine content
    pub polypyrimidine_tract: String,
    /// Fraction of C/T symbols in the `[-15:-3]` slice (count divided by 12)
    pub polypyrimidine_score: f64,
    /// Branch point matches, ascending by start position
    pub branch_points: Vec<MotifHit>,
    /// Enhancer matches, ascending by start position
    pub enhancers: Vec<MotifHit>,
    /// Silencer matches, ascending by start position
    pub silencers: Vec<MotifHit>,
    /// GC-rich 10-mers, ascending by start position, overlaps not merged
    pub gc_rich_regions: Vec<GcRichRegion>,
}

/// One accepted window: the unit of scan output.
///
/// Appended to the result collection on acceptance and never mutated
/// afterwards. A candidate always has length ≥ 50, satisfies the
/// GT/GU...AG boundary rule, and folds with an energy strictly below the
/// configured threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Window sequence text with original symbols (U is not rewritten)
    pub sequence: String,
    /// Length of the window in nucleotides
    pub length: usize,
    /// G+C content as a percentage of the window length
    pub gc_content: f64,
    /// Predicted minimum free energy of the folded structure, kcal/mol
    pub delta_g: f64,
    /// Predicted secondary structure in dot-bracket notation
    pub structure: String,
    /// Regulatory-motif annotation for this window
    pub annotation: PatternAnnotation,
}

/// Error types that can occur during a scan.
///
/// Only pre-scan validation errors propagate to the caller; per-window
/// failures (including folding oracle errors) are recovered locally as
/// window rejections.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Invalid window, step, or sampling parameters
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// No genome sequence present
    #[error("No genome sequence loaded")]
    NotLoaded,
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    Parse(String),
}
