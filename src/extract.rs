/// Pattern extraction for rsync's two summary lines:
///
/// ```text
/// sent 1,590 bytes  received 18 bytes  3,216.00 bytes/sec
/// total size is 1,188,046  speedup is 738.83
/// ```
///
/// Numbers are rsync's `do_big_num` output: `,` groups thousands and `.`
/// is the fractional point, which only holds under an unlocalized locale.
use crate::error::{LineKind, NumberError, ParseError};
use crate::stats::Stats;
use regex::Regex;
use std::sync::LazyLock;

static TRANSFER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sent ([0-9,]+) bytes  received ([0-9,]+) bytes  ([0-9,.]+) bytes/sec$").unwrap()
});

static TOTAL_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^total size is ([0-9,]+)  speedup is ([0-9,.]+)$").unwrap());

/// Fold one line of rsync output into `stats`.
///
/// Lines without a recognized prefix are ignored. A line that starts like a
/// summary line but does not match its full shape is an error.
pub fn extract_line(stats: &mut Stats, line: &str) -> Result<(), ParseError> {
    if line.starts_with(LineKind::Transfer.prefix()) {
        let caps = TRANSFER_RE
            .captures(line)
            .ok_or_else(|| mismatch(LineKind::Transfer, line))?;

        stats.found = true;
        stats.total_written = parse_int("total_written", &caps[1])?;
        stats.total_read = parse_int("total_read", &caps[2])?;
        stats.bytes_per_second = parse_float("bytes_per_second", &caps[3])?;
        tracing::debug!(
            written = stats.total_written,
            read = stats.total_read,
            bytes_per_second = stats.bytes_per_second,
            "rsync transfer totals"
        );
    } else if line.starts_with(LineKind::TotalSize.prefix()) {
        let caps = TOTAL_SIZE_RE
            .captures(line)
            .ok_or_else(|| mismatch(LineKind::TotalSize, line))?;

        stats.found = true;
        stats.total_size = parse_int("total_size", &caps[1])?;
        // rsync's own speedup is recomputed on demand by Stats::speedup
        tracing::debug!(
            total_size = stats.total_size,
            reported_speedup = &caps[2],
            "rsync total size"
        );
    }
    Ok(())
}

fn mismatch(kind: LineKind, line: &str) -> ParseError {
    tracing::debug!(%kind, line, "rsync summary line did not match the expected format");
    ParseError::Format {
        kind,
        line: line.to_string(),
    }
}

/// Remove thousands separators.
fn strip_grouping(raw: &str) -> String {
    raw.replace(',', "")
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, ParseError> {
    strip_grouping(raw)
        .parse()
        .map_err(|e| ParseError::Number {
            field,
            value: raw.to_string(),
            source: NumberError::Int(e),
        })
}

fn parse_float(field: &'static str, raw: &str) -> Result<f64, ParseError> {
    strip_grouping(raw)
        .parse()
        .map_err(|e| ParseError::Number {
            field,
            value: raw.to_string(),
            source: NumberError::Float(e),
        })
}
