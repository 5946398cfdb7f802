// =============================================================================
// =============================================================================

/// Version string for intronscan
pub const VERSION: &str = "0.1.0";

// =============================================================================
// =============================================================================

/// Minimum length in nucleotides for a window to be considered a candidate
pub const MIN_CANDIDATE_LENGTH: usize = 50;

/// Splice donor dinucleotides accepted at the start of a candidate (DNA and RNA forms)
pub const DONOR_DINUCLEOTIDES: [&str; 2] = ["GT", "GU"];

/// Splice acceptor dinucleotide required at the end of a candidate
pub const ACCEPTOR_DINUCLEOTIDE: &str = "AG";

/// Length of the reported 5' splice donor signature slice
pub const DONOR_SIGNATURE_LENGTH: usize = 6;

/// Length of the reported 3' splice acceptor signature slice
pub const ACCEPTOR_SIGNATURE_LENGTH: usize = 15;

/// Offset from the 3' end where the polypyrimidine tract slice stops
pub const POLYPYRIMIDINE_END_OFFSET: usize = 3;

/// Fixed length of the polypyrimidine tract slice ([-15:-3])
pub const POLYPYRIMIDINE_TRACT_LENGTH: usize =
    ACCEPTOR_SIGNATURE_LENGTH - POLYPYRIMIDINE_END_OFFSET;

/// Width of the window used for GC-rich region detection
pub const GC_RICH_WINDOW: usize = 10;

/// Strict lower bound on G/C fraction for a window to count as GC-rich
pub const GC_RICH_THRESHOLD: f64 = 0.6;

// =============================================================================
// =============================================================================

/// Number of sub-window lengths enumerated per base offset
pub const LENGTH_SWEEP: usize = 100;

/// Default sliding window size in nucleotides
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Default step between consecutive base offsets
pub const DEFAULT_STEP_SIZE: usize = 1;

/// Default fraction of base offsets examined, in percent
pub const DEFAULT_SAMPLE_PERCENTAGE: f64 = 100.0;

/// Default folding energy acceptance threshold in kcal/mol
pub const DEFAULT_DELTA_G_THRESHOLD: f64 = -35.0;

/// Default minimum intron length parameter
pub const DEFAULT_MIN_INTRON_LENGTH: usize = 50;

/// Default maximum intron length parameter
pub const DEFAULT_MAX_INTRON_LENGTH: usize = 150;

// =============================================================================
// =============================================================================

/// Number of processed windows between progress snapshots
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Number of windows evaluated per batch in parallel mode
pub const DEFAULT_BATCH_SIZE: usize = 500;

// =============================================================================
// =============================================================================

/// Branch point motifs searched literally in normalized (DNA) sequence.
///
/// These are the catalogue strings as inherited; the IUPAC-looking symbols
/// (Y, N, R) are matched as literal characters, not expanded. Downstream
/// count statistics depend on this exact behavior.
pub const BRANCH_POINT_MOTIFS: [&str; 3] = ["YNYTRAY", "YNYYRAY", "YNCTRAC"];

/// Splicing enhancer motifs searched literally in normalized sequence
pub const ENHANCER_MOTIFS: [&str; 2] = ["GGAGG", "YYYYYYYYYY"];

/// Splicing silencer motifs searched literally in normalized sequence
pub const SILENCER_MOTIFS: [&str; 2] = ["TCCTC", "TGCATG"];

// =============================================================================
// =============================================================================

/// Minimum number of unpaired bases inside a hairpin loop for the built-in folder
pub const MIN_HAIRPIN_LOOP: usize = 3;

/// Pseudo-energy contribution of a G-C pair in kcal/mol
pub const GC_PAIR_ENERGY: f64 = -3.0;

/// Pseudo-energy contribution of an A-T / A-U pair in kcal/mol
pub const AT_PAIR_ENERGY: f64 = -2.0;

/// Pseudo-energy contribution of a G-T / G-U wobble pair in kcal/mol
pub const WOBBLE_PAIR_ENERGY: f64 = -1.0;

/// Maximum refinement rounds for inverse folding
pub const INVERSE_FOLD_MAX_ROUNDS: usize = 200;
