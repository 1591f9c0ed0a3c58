use core::fmt::{self, Write as _};

use thiserror::Error;

/// The input is not syntactically valid JSON.
///
/// The `Display` output is the validator's diagnostic and nothing else, e.g.
/// `invalid character 'c' looking for beginning of object key string`. Callers
/// match on these messages, so their wording is stable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind}")]
pub struct DecodeError {
    pub(crate) kind: SyntaxError,
    /// Number of input bytes consumed when the error was detected. For an
    /// invalid character this includes the offending byte; for a truncated
    /// document it equals the input length.
    pub offset: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: SyntaxError, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The syntax error that stopped validation.
    #[must_use]
    pub fn kind(&self) -> SyntaxError {
        self.kind
    }
}

/// What the validator found wrong with the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that cannot appear at this point of the document. `context`
    /// names what the validator was looking for, e.g. `after array element`.
    #[error("invalid character {} {context}", quoted(.byte))]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Where in the grammar the byte was seen.
        context: &'static str,
    },
    /// The document ended before its top-level value was complete.
    #[error("unexpected end of JSON input")]
    UnexpectedEnd,
}

fn quoted(byte: &u8) -> Quoted {
    Quoted(*byte)
}

/// Renders a byte as a single-quoted character literal: `'x'`, `'\''`,
/// `'"'`, `'\n'`, `'\x00'`, `'\u0080'`.
///
/// Bytes at or above 0x80 are shown as the Latin-1 code point with the same
/// value, escaped when that code point is not printable.
pub(crate) struct Quoted(pub(crate) u8);

impl fmt::Display for Quoted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\'' => return f.write_str(r"'\''"),
            b'"' => return f.write_str("'\"'"),
            _ => {}
        }
        f.write_char('\'')?;
        match self.0 {
            0x07 => f.write_str(r"\a")?,
            0x08 => f.write_str(r"\b")?,
            0x0C => f.write_str(r"\f")?,
            b'\n' => f.write_str(r"\n")?,
            b'\r' => f.write_str(r"\r")?,
            b'\t' => f.write_str(r"\t")?,
            0x0B => f.write_str(r"\v")?,
            b'\\' => f.write_str(r"\\")?,
            b @ (0x00..=0x1F | 0x7F) => write!(f, r"\x{b:02x}")?,
            b @ 0x20..=0x7E => f.write_char(char::from(b))?,
            // C1 controls, no-break space and soft hyphen are not printable.
            b @ (0x80..=0xA0 | 0xAD) => write!(f, r"\u{b:04x}")?,
            b => f.write_char(char::from(b))?,
        }
        f.write_char('\'')
    }
}
