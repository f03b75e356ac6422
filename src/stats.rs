/// Transfer totals extracted from rsync output.
use serde::Serialize;

/// All data found in one pass over rsync output.
///
/// A record with `found == false` means no summary line was seen; every
/// numeric field is then zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    /// At least one recognized summary line was processed.
    pub found: bool,
    /// Bytes sent by the local side.
    pub total_written: i64,
    /// Bytes received by the local side.
    pub total_read: i64,
    /// Transfer rate as reported by rsync.
    pub bytes_per_second: f64,
    /// Logical size of the synchronized data set.
    pub total_size: i64,
}

impl Stats {
    /// Speed-up of using rsync over copying the data as-is.
    ///
    /// The quotient is taken on integers and truncated before conversion,
    /// so `1188046 / 1608` yields `738.0`, not `738.83`. Returns `None`
    /// when no bytes moved over the wire.
    pub fn speedup(&self) -> Option<f64> {
        let moved = self.total_written.checked_add(self.total_read)?;
        self.total_size.checked_div(moved).map(|q| q as f64)
    }
}
