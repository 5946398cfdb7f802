//! # IntronScan - Intron Candidate Discovery
//!
//! A library for scanning genome sequences for intron candidates: windows
//! that carry canonical splice boundaries and fold into stable RNA
//! secondary structures.
//!
//! ## Overview
//!
//! The scan slides fixed-size windows across a genome, fans each window
//! position out over a range of candidate lengths, and accepts a window
//! when it starts with a splice donor (GT/GU), ends with the splice
//! acceptor (AG), and folds below a free-energy threshold. Accepted
//! candidates are annotated with splice-site signatures, branch point,
//! enhancer, and silencer motifs, the polypyrimidine tract, and GC-rich
//! regions.
//!
//! ## Features
//!
//! - **Window Sampling**: Scan every window position or a random sample
//! - **Pluggable Folding**: Any [`fold::FoldOracle`] implementation can
//!   supply structures and energies; [`fold::NussinovOracle`] is built in
//! - **Progress and Cancellation**: Periodic progress snapshots with ETA,
//!   cooperative cancellation with partial results
//! - **Parallel Processing**: Optional multi-threaded window evaluation
//!   using Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use intronscan_core::config::ScanConfig;
//! use intronscan_core::engine::{CancelToken, ScanSession};
//! use intronscan_core::fold::NussinovOracle;
//!
//! let genome = format!("GT{}AG{}", "A".repeat(46), "T".repeat(30));
//! let config = ScanConfig {
//!     window_size: 50,
//!     quiet: true,
//!     ..Default::default()
//! };
//!
//! let session = ScanSession::new(&genome, config)?;
//! let outcome = session.scan(&NussinovOracle::new(), &CancelToken::new(), |progress| {
//!     eprintln!("{}/{} windows", progress.processed, progress.total);
//! })?;
//!
//! println!("Found {} candidates", outcome.accepted);
//! # Ok::<(), intronscan_core::types::ScanError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Scan parameters and validation
//! - [`engine`]: Scan orchestration, progress, and cancellation
//! - [`windows`]: Window plan, sampling, and length fan-out
//! - [`filter`]: Window acceptance rules
//! - [`fold`]: Folding oracle trait and built-in implementation
//! - [`motifs`]: Literal motif search and pattern annotation
//! - [`sequence`]: Genome loading from FASTA and plain-text files
//! - [`results`]: Candidates, progress snapshots, and the result store
//! - [`output`]: CSV output formatting
//! - [`types`]: Core data types and errors
//! - [`constants`]: Biological and algorithmic constants
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, ScanError>`](types::ScanError).
//! Per-window folding failures are not errors at this level; the filter
//! treats them as rejections so one bad window cannot abort a scan.

pub mod config;
pub mod constants;
pub mod engine;
pub mod filter;
pub mod fold;
pub mod motifs;
pub mod output;
pub mod results;
pub mod sequence;
pub mod types;
pub mod windows;

pub use engine::{CancelToken, ScanSession};
