//! Genome loading.
//!
//! A scan runs over one sequence: the first record of a FASTA file, or the
//! whole text of a plain sequence file. Gzip-compressed input is detected
//! by the `.gz` extension and decompressed transparently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;
use flate2::read::GzDecoder;

use crate::types::ScanError;

/// Reads a file into memory, decompressing when the extension is `.gz`.
fn read_to_string(path: &Path) -> Result<String, ScanError> {
    let file = File::open(path)?;
    let mut content = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).read_to_string(&mut content)?;
    } else {
        let mut file = file;
        file.read_to_string(&mut content)?;
    }
    Ok(content)
}

/// Extracts the scan sequence from file content.
///
/// FASTA content yields the first record's sequence; later records are
/// ignored. Anything else is treated as a raw sequence with whitespace
/// stripped. The result is uppercased but not otherwise rewritten, so RNA
/// input stays RNA.
fn parse_sequence(content: &str) -> Result<String, ScanError> {
    let sequence = if content.trim_start().starts_with('>') {
        let reader = fasta::Reader::new(content.trim_start().as_bytes());
        let record = reader
            .records()
            .next()
            .ok_or_else(|| ScanError::Parse("FASTA file contains no records".to_string()))?
            .map_err(|e| ScanError::Parse(e.to_string()))?;
        String::from_utf8_lossy(record.seq()).into_owned()
    } else {
        content.split_whitespace().collect()
    };

    let sequence = sequence.to_ascii_uppercase();
    if sequence.is_empty() {
        return Err(ScanError::Parse("No sequence data in input".to_string()));
    }
    Ok(sequence)
}

/// Loads the genome sequence to scan from a FASTA or plain-text file.
///
/// # Errors
///
/// Returns [`ScanError::Io`] when the file cannot be read and
/// [`ScanError::Parse`] when it contains no usable sequence.
///
/// # Examples
///
/// ```rust,no_run
/// use intronscan_core::sequence::load_genome;
///
/// let genome = load_genome("genome.fa.gz".as_ref())?;
/// assert!(!genome.is_empty());
/// # Ok::<(), intronscan_core::types::ScanError>(())
/// ```
pub fn load_genome(path: &Path) -> Result<String, ScanError> {
    let content = read_to_string(path)?;
    parse_sequence(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::tempdir;

    #[test]
    fn test_parse_fasta_first_record() {
        let content = ">chr1 test\nACGT\nGTAC\n>chr2\nTTTT\n";
        assert_eq!(parse_sequence(content).unwrap(), "ACGTGTAC");
    }

    #[test]
    fn test_parse_raw_sequence() {
        let content = "acgt\ngtac\n";
        assert_eq!(parse_sequence(content).unwrap(), "ACGTGTAC");
    }

    #[test]
    fn test_parse_preserves_rna() {
        let content = ">rna\ngucaug\n";
        assert_eq!(parse_sequence(content).unwrap(), "GUCAUG");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_sequence(""), Err(ScanError::Parse(_))));
        assert!(matches!(parse_sequence("\n\n"), Err(ScanError::Parse(_))));
    }

    #[test]
    fn test_parse_header_only_fasta() {
        assert!(matches!(
            parse_sequence(">chr1\n"),
            Err(ScanError::Parse(_))
        ));
    }

    #[test]
    fn test_load_fasta_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genome.fa");
        std::fs::write(&path, ">seq\nGTAAAAAG\n").unwrap();

        assert_eq!(load_genome(&path).unwrap(), "GTAAAAAG");
    }

    #[test]
    fn test_load_gzip_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genome.fa.gz");

        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b">seq\nGTAAAAAG\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(load_genome(&path).unwrap(), "GTAAAAAG");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_genome("no_such_genome.fa".as_ref());
        assert!(matches!(result, Err(ScanError::Io(_))));
    }
}
