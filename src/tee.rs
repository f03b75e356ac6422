use std::io::{Read, Write};

/// Reader that copies every byte it hands out to `sink`.
///
/// Lets the binary sit in a pipe after rsync: the user still sees rsync's
/// output while it is being scanned.
pub struct TeeReader<R, W> {
    inner: R,
    sink: W,
}

impl<R: Read, W: Write> TeeReader<R, W> {
    pub fn new(inner: R, sink: W) -> Self {
        Self { inner, sink }
    }
}

impl<R: Read, W: Write> Read for TeeReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.sink.write_all(&buf[..n])?;
        self.sink.flush()?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_everything_read() {
        let input = "sending incremental file list\nsent 1 bytes  received 2 bytes  3.00 bytes/sec\n";
        let mut copy = Vec::new();
        let stats = rsyncstats::parse(TeeReader::new(input.as_bytes(), &mut copy)).unwrap();
        assert!(stats.found);
        assert_eq!(copy, input.as_bytes());
    }

    #[test]
    fn sink_failure_is_read_error() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = rsyncstats::parse(TeeReader::new(&b"line\n"[..], Full)).unwrap_err();
        assert!(matches!(err, rsyncstats::ParseError::Io(_)));
    }
}
