use std::fmt;
use std::io;
use std::string::FromUtf8Error;

/// Failure to turn an input stream into a markup [`Document`](crate::Document).
///
/// The HTML parser itself recovers from any malformed markup, so the only
/// ways a parse can fail are at the byte level.
#[derive(Debug)]
pub enum ParseError {
    /// The stream could not be read to the end.
    Io(io::Error),
    /// The stream is not valid UTF-8.
    Encoding(FromUtf8Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "markup parse error: the document cannot be read: {e}"),
            Self::Encoding(e) => write!(f, "markup parse error: the document is not valid UTF-8: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encoding(e) => Some(e),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FromUtf8Error> for ParseError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Encoding(e)
    }
}
