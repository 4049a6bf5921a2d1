//! Length specifiers: the five ways a combinator can bound a
//! variable-length payload (bytes of a string/hex/bytes field, or
//! elements of an array).

use crate::coder::BoxCoder;
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// One of the five ways a combinator can bound a variable-length
/// payload.
pub enum Length {
    /// An unsigned integer coder, read/written in-line immediately
    /// before the payload.
    Coder(BoxCoder),
    /// A non-negative constant.
    Fixed(u64),
    /// A byte pattern marking the end of the payload; consumed as
    /// part of it.
    Terminator(Vec<u8>),
    /// A `/`-separated path, resolved against the path stack, to a
    /// previously-seen integer field.
    Path(String),
    /// Consume/produce until the end of the enclosing buffer. Legal
    /// only as the last element of its container.
    Unbounded,
}

impl Length {
    pub fn fixed(n: u64) -> Self {
        Length::Fixed(n)
    }

    pub fn coder(c: BoxCoder) -> Self {
        Length::Coder(c)
    }

    pub fn terminator(pattern: impl Into<Vec<u8>>) -> Self {
        Length::Terminator(pattern.into())
    }

    pub fn path(expr: impl Into<String>) -> Self {
        Length::Path(expr.into())
    }

    pub fn unbounded() -> Self {
        Length::Unbounded
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Length::Unbounded)
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, Length::Terminator(_))
    }

    /// For the `Coder`/`Fixed`/`Path` forms, resolves (reading a
    /// coder value if needed) the exact element/byte count. Must not
    /// be called for `Terminator`/`Unbounded`.
    pub fn read_count(&self, r: &mut Reader<'_>) -> Result<u64, Error> {
        match self {
            Length::Coder(c) => {
                let v = c.decode_stream(r)?;
                v.as_length().ok_or_else(|| {
                    Error::new(r.labels.clone(), ErrorKind::BadLength(format!("{v:?}")))
                })
            }
            Length::Fixed(n) => Ok(*n),
            Length::Path(expr) => r.resolve_path_length(expr),
            Length::Terminator(_) | Length::Unbounded => {
                unreachable!("read_count called on a non-counted length specifier")
            }
        }
    }

    /// Writes (for `Coder`) or checks (for `Fixed`/`Path`) the
    /// resolved length against `actual`. A no-op for `Unbounded`; must
    /// not be called for `Terminator` (callers append the pattern
    /// themselves).
    pub fn write_count(&self, w: &mut Writer, actual: u64) -> Result<(), Error> {
        match self {
            Length::Coder(c) => c.encode_stream(w, &Value::UInt(actual)),
            Length::Fixed(n) => {
                if *n != actual {
                    Err(Error::new(
                        w.labels.clone(),
                        ErrorKind::LengthMismatch {
                            expected: *n,
                            actual,
                        },
                    ))
                } else {
                    Ok(())
                }
            }
            Length::Path(expr) => w.check_path_length(expr, actual),
            Length::Unbounded => Ok(()),
            Length::Terminator(_) => {
                unreachable!("write_count called on a terminator length specifier")
            }
        }
    }
}
