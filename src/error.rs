use std::io;
use thiserror::Error;

/// Failures while encoding or decoding the BER tag-length-value stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected tag 0x{expected:02x}, got: 0x{actual:02x}")]
    UnexpectedTag { expected: u8, actual: u8 },
    #[error("length mismatch: subsection declared {declared} bytes but children consumed {consumed} bytes")]
    LengthMismatch { declared: usize, consumed: usize },
    #[error("unexpected end of input")]
    Truncated,
    #[error("indefinite length encoding is not supported")]
    IndefiniteLength,
    #[error("length field of {0} bytes is too large")]
    LengthOverflow(usize),
    #[error("integer value of {0} bytes does not fit in 32 bits")]
    IntegerTooWide(usize),
    #[error("decoding {0} nodes is not supported")]
    UnsupportedDecode(&'static str),
    #[error("string value is not valid UTF-8")]
    InvalidUtf8,
}

/// Failures of one whole bind attempt. A non-zero LDAP result code is not
/// an error; `attempt_login` reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("failed to resolve {host}:{port}")]
    Resolution {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("network error during bind exchange")]
    Network(#[from] io::Error),
    #[error("malformed bind response")]
    Decode(#[from] CodecError),
    #[error("bind response carried no result code")]
    IncompleteResponse,
}
