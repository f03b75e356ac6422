/// Line splitting over a buffered reader.
///
/// Reads one line at a time so arbitrarily long or still-running output
/// never has to be held in memory as a whole.
use std::io::{BufRead, Read};

/// Longest line accepted, newline excluded. rsync's summary lines are short;
/// anything past this is not rsync output.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Yields lines from `reader` in stream order with line breaks removed.
///
/// A trailing `\r` is dropped along with the `\n`. Bytes that are not valid
/// UTF-8 (rsync echoes raw file names) are replaced rather than treated as
/// a read failure. A line longer than the limit is an `InvalidData` error,
/// so input without newlines is never buffered in full.
pub struct LineScanner<R> {
    reader: R,
    buf: Vec<u8>,
    max_line: usize,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_line(reader, MAX_LINE_BYTES)
    }

    pub fn with_max_line(reader: R, max_line: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            max_line,
        }
    }

    /// Read the next line, or `Ok(None)` at a clean end of stream.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        // One extra byte leaves room for the newline itself
        let limit = self.max_line as u64 + 1;
        if (&mut self.reader).take(limit).read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.len() > self.max_line && self.buf.last() != Some(&b'\n') {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("line exceeds {} bytes", self.max_line),
            ));
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
