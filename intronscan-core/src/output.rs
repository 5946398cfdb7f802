//! Output formatting for accepted candidates.
//!
//! Candidates are written as CSV, one row per candidate, with summary
//! columns for the splice signatures and motif counts. Writers take any
//! [`Write`] sink so the same path serves files, stdout, and test buffers.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use intronscan_core::output::write_csv;
//! use std::fs::File;
//!
//! # let candidates = Vec::new();
//! let mut file = File::create("candidates.csv")?;
//! write_csv(&mut file, &candidates)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;

use crate::types::{Candidate, ScanError};

/// Column order of the CSV output.
pub const CSV_HEADER: &str = "sequence,length,gc_content,delta_g,structure,splice_donor,\
splice_acceptor,polypyrimidine_score,branch_points,enhancers,silencers,gc_rich_regions";

/// Writes candidates as CSV with a header row.
///
/// Motif columns carry occurrence counts; the full hit lists stay on the
/// in-memory [`Candidate`] for callers that need positions.
///
/// # Errors
///
/// Returns [`ScanError::Io`] if the sink cannot be written.
pub fn write_csv<W: Write>(writer: &mut W, candidates: &[Candidate]) -> Result<(), ScanError> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for candidate in candidates {
        writeln!(
            writer,
            "{},{},{:.2},{:.2},{},{},{},{:.2},{},{},{},{}",
            candidate.sequence,
            candidate.length,
            candidate.gc_content,
            candidate.delta_g,
            candidate.structure,
            candidate.annotation.splice_donor,
            candidate.annotation.splice_acceptor,
            candidate.annotation.polypyrimidine_score,
            candidate.annotation.branch_points.len(),
            candidate.annotation.enhancers.len(),
            candidate.annotation.silencers.len(),
            candidate.annotation.gc_rich_regions.len(),
        )?;
    }
    Ok(())
}
