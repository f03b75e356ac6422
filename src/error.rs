use std::num::{ParseFloatError, ParseIntError};

/// Which recognized summary line an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `sent N bytes  received N bytes  N bytes/sec`
    Transfer,
    /// `total size is N  speedup is N`
    TotalSize,
}

impl LineKind {
    /// The literal prefix rsync starts this line with.
    pub fn prefix(self) -> &'static str {
        match self {
            LineKind::Transfer => "sent ",
            LineKind::TotalSize => "total size is ",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Transfer => write!(f, "'sent'"),
            LineKind::TotalSize => write!(f, "'total size'"),
        }
    }
}

/// A numeric field that survived pattern matching but did not convert.
#[derive(Debug)]
pub enum NumberError {
    Int(ParseIntError),
    Float(ParseFloatError),
}

impl std::fmt::Display for NumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberError::Int(e) => write!(f, "{e}"),
            NumberError::Float(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for NumberError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NumberError::Int(e) => Some(e),
            NumberError::Float(e) => Some(e),
        }
    }
}

/// Errors that abort a parse. No partial record is ever returned alongside one.
#[derive(Debug)]
pub enum ParseError {
    /// The input stream failed before a clean end.
    Io(std::io::Error),
    /// A line carried a recognized prefix but not the full expected shape.
    Format { kind: LineKind, line: String },
    /// A captured number could not be converted after stripping separators.
    Number {
        field: &'static str,
        value: String,
        source: NumberError,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "I/O error reading rsync output: {e}"),
            ParseError::Format { kind, line } => write!(
                f,
                "could not parse rsync {kind} line {line:?}; try starting rsync with LC_ALL=C.UTF-8"
            ),
            ParseError::Number {
                field,
                value,
                source,
            } => write!(f, "invalid {field} value {value:?}: {source}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::Format { .. } => None,
            ParseError::Number { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn format_error_mentions_locale() {
        let err = ParseError::Format {
            kind: LineKind::Transfer,
            line: "sent 1.590 bytes".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'sent'"));
        assert!(msg.contains("LC_ALL=C.UTF-8"));
        assert!(err.source().is_none());
    }

    #[test]
    fn number_error_chains_source() {
        let source = "x".parse::<i64>().unwrap_err();
        let err = ParseError::Number {
            field: "total_size",
            value: "x".to_string(),
            source: NumberError::Int(source),
        };
        assert!(err.to_string().starts_with("invalid total_size value \"x\""));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_error_converts() {
        let err: ParseError = std::io::Error::other("pipe closed").into();
        assert!(matches!(err, ParseError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn line_kind_prefixes() {
        assert_eq!(LineKind::Transfer.prefix(), "sent ");
        assert_eq!(LineKind::TotalSize.prefix(), "total size is ");
    }
}
