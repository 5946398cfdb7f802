//! # IntronScan CLI - Command-Line Intron Candidate Scanner
//!
//! A command-line interface for scanning genome sequences for intron
//! candidates.
//!
//! ## Usage
//!
//! ```bash
//! # Basic scan with default parameters
//! intronscan -i genome.fasta -o candidates.csv
//!
//! # Scan a random 10% sample of window positions, reproducibly
//! intronscan -i genome.fasta -s 10 --seed 42 -o candidates.csv
//!
//! # Stricter stability threshold, four worker threads
//! intronscan -i genome.fasta -d -45.0 -t 4 -o candidates.csv
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input FASTA or plain-text file, `.gz` accepted
//! - `-o, --output <FILE>`: Output CSV file (default: stdout)
//! - `-w, --window-size <BP>`: Window size in bases (default: 100)
//! - `-p, --step-size <BP>`: Step between window positions (default: 1)
//! - `-s, --sample <PERCENT>`: Percentage of positions to scan (default: 100)
//! - `-d, --delta-g <KCAL>`: Free-energy acceptance threshold (default: -35.0)
//! - `--seed <SEED>`: Seed for reproducible sampling
//! - `-t, --threads <N>`: Worker threads (default: sequential)
//! - `--progress-interval <N>`: Windows between progress reports (default: 100)
//! - `-q, --quiet`: Suppress progress messages

use clap::{Arg, ArgAction, Command};
use intronscan_core::config::ScanConfig;
use intronscan_core::engine::{CancelToken, ScanSession};
use intronscan_core::fold::NussinovOracle;
use intronscan_core::output::write_csv;
use intronscan_core::sequence::load_genome;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Main entry point for the IntronScan CLI application.
///
/// Parses command-line arguments, loads the genome, runs the scan, and
/// writes accepted candidates as CSV.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("intronscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Intron candidate scanner")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .required(true)
                .help("Input FASTA or plain-text sequence file (.gz accepted)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output CSV file (default: stdout)"),
        )
        .arg(
            Arg::new("window-size")
                .short('w')
                .long("window-size")
                .value_name("BP")
                .help("Window size in bases (default: 100)"),
        )
        .arg(
            Arg::new("step-size")
                .short('p')
                .long("step-size")
                .value_name("BP")
                .help("Step between window positions (default: 1)"),
        )
        .arg(
            Arg::new("sample")
                .short('s')
                .long("sample")
                .value_name("PERCENT")
                .help("Percentage of window positions to scan (default: 100)"),
        )
        .arg(
            Arg::new("delta-g")
                .short('d')
                .long("delta-g")
                .value_name("KCAL")
                .allow_negative_numbers(true)
                .help("Free-energy acceptance threshold in kcal/mol (default: -35.0)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for reproducible window sampling"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("N")
                .help("Worker threads (default: sequential)"),
        )
        .arg(
            Arg::new("progress-interval")
                .long("progress-interval")
                .value_name("N")
                .help("Windows between progress reports (default: 100)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
        .get_matches();

    let mut config = ScanConfig {
        quiet: matches.get_flag("quiet"),
        ..Default::default()
    };

    if let Some(value) = matches.get_one::<String>("window-size") {
        config.window_size = value.parse().map_err(|_| "Invalid window size")?;
    }
    if let Some(value) = matches.get_one::<String>("step-size") {
        config.step_size = value.parse().map_err(|_| "Invalid step size")?;
    }
    if let Some(value) = matches.get_one::<String>("sample") {
        config.sample_percentage = value.parse().map_err(|_| "Invalid sample percentage")?;
    }
    if let Some(value) = matches.get_one::<String>("delta-g") {
        config.delta_g_threshold = value.parse().map_err(|_| "Invalid energy threshold")?;
    }
    if let Some(value) = matches.get_one::<String>("seed") {
        config.sample_seed = Some(value.parse().map_err(|_| "Invalid seed")?);
    }
    if let Some(value) = matches.get_one::<String>("threads") {
        config.num_threads = Some(value.parse().map_err(|_| "Invalid thread count")?);
    }
    if let Some(value) = matches.get_one::<String>("progress-interval") {
        config.progress_interval = value.parse().map_err(|_| "Invalid progress interval")?;
    }

    let input = matches
        .get_one::<String>("input")
        .ok_or("Input file is required")?;
    let genome = load_genome(input.as_ref())?;

    let quiet = config.quiet;
    let session = ScanSession::new(&genome, config)?;
    let oracle = NussinovOracle::new();
    let outcome = session.scan(&oracle, &CancelToken::new(), |progress| {
        if !quiet {
            match progress.mean_delta_g {
                Some(mean) => eprintln!(
                    "Processed {}/{} windows ({:.1}%), {} candidates, mean dG {:.2} kcal/mol, ETA {:.0}s",
                    progress.processed,
                    progress.total,
                    progress.fraction * 100.0,
                    progress.accepted,
                    mean,
                    progress.eta.as_secs_f64()
                ),
                None => eprintln!(
                    "Processed {}/{} windows ({:.1}%), no candidates yet, ETA {:.0}s",
                    progress.processed,
                    progress.total,
                    progress.fraction * 100.0,
                    progress.eta.as_secs_f64()
                ),
            }
        }
    })?;

    let mut writer: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output")
    {
        Box::new(BufWriter::new(File::create(output_file)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    write_csv(&mut writer, &outcome.candidates)?;
    writer.flush()?;

    if !quiet {
        eprintln!(
            "Scan complete! Found {} candidates in {} windows ({:.1}s).",
            outcome.accepted,
            outcome.processed,
            outcome.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
