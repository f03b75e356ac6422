//! Extract transfer totals from rsync's console output.
//!
//! # rsync requirements
//!
//! Start rsync with `--verbose` (`-v`) or `--stats` so it prints transfer
//! totals. Do not pass `--human-readable` (`-h`): values like `1.2M` are not
//! parsed. Run rsync under `LC_ALL=C.UTF-8` so big numbers use `,` for
//! grouping and `.` as the fractional point.
//!
//! ```
//! let out = "sent 1,590 bytes  received 18 bytes  3,216.00 bytes/sec\n\
//!            total size is 1,188,046  speedup is 738.83\n";
//! let stats = rsyncstats::parse(out.as_bytes()).unwrap();
//! assert!(stats.found);
//! assert_eq!(stats.total_size, 1188046);
//! assert_eq!(stats.speedup(), Some(738.0));
//! ```

pub mod error;
pub mod extract;
pub mod scan;
pub mod stats;

use std::io::{BufRead, BufReader, Read};

pub use error::{LineKind, NumberError, ParseError};
pub use stats::Stats;

/// Scan `reader` line by line and return the transfer totals found in it.
///
/// Reaching the end of the stream without seeing a summary line is not an
/// error: the returned record has `found == false`.
pub fn parse<R: Read>(reader: R) -> Result<Stats, ParseError> {
    parse_buffered(BufReader::new(reader))
}

/// Like [`parse`], for a reader that is already buffered.
pub fn parse_buffered<R: BufRead>(reader: R) -> Result<Stats, ParseError> {
    let mut stats = Stats::default();
    let mut lines = 0u64;
    for line in scan::LineScanner::new(reader) {
        let line = line?;
        lines += 1;
        tracing::trace!(line = %line, "rsync output line");
        extract::extract_line(&mut stats, &line)?;
    }
    tracing::debug!(lines, found = stats.found, "finished scanning rsync output");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const TRANSCRIPT: &str = "\
sending incremental file list
./
notes/
notes/todo.txt

sent 1,590 bytes  received 18 bytes  3,216.00 bytes/sec
total size is 1,188,046  speedup is 738.83
";

    #[test]
    fn empty_input() {
        let s = parse(&b""[..]).unwrap();
        assert_eq!(s, Stats::default());
        assert!(!s.found);
    }

    #[test]
    fn unrecognized_only_input() {
        let s = parse("building file list ... done\nfoo.txt\n".as_bytes()).unwrap();
        assert_eq!(s, Stats::default());
    }

    #[test]
    fn full_transcript() {
        let s = parse(TRANSCRIPT.as_bytes()).unwrap();
        assert_eq!(
            s,
            Stats {
                found: true,
                total_written: 1590,
                total_read: 18,
                bytes_per_second: 3216.0,
                total_size: 1_188_046,
            }
        );
        assert_eq!(s.speedup(), Some(738.0));
    }

    #[test]
    fn crlf_transcript() {
        let crlf = TRANSCRIPT.replace('\n', "\r\n");
        let s = parse(crlf.as_bytes()).unwrap();
        assert_eq!(s.total_read, 18);
        assert_eq!(s.total_size, 1_188_046);
    }

    #[test]
    fn malformed_sent_line_returns_no_record() {
        let input = "total size is 1,188,046  speedup is 738.83\nsent 1,590 bytes  received 18 bytes\n";
        let err = parse(input.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Format { .. }));
    }

    #[test]
    fn parse_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rsync.log");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{TRANSCRIPT}").unwrap();
        drop(f);

        let s = parse(std::fs::File::open(&path).unwrap()).unwrap();
        assert!(s.found);
        assert_eq!(s.total_written, 1590);
    }
}
