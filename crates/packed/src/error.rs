//! The single error type surfaced by every coder in this crate.
//!
//! Per the public contract, there are no distinct error subtypes —
//! every failure carries the field path at which it occurred plus a
//! [`ErrorKind`] describing what went wrong.

use std::fmt;

use thiserror::Error;

/// One segment of a [`Error::path`], tracking which field, index, or
/// pointer jump an error occurred under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A named struct field.
    Field(String),
    /// A positional tuple or array element.
    Index(usize),
    /// A jump across a `pointer` combinator, to the absolute offset
    /// the pointer referenced.
    Pointer(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(idx) => write!(f, "{idx}"),
            Self::Pointer(offset) => write!(f, "<ptr@{offset:#x}>"),
        }
    }
}

/// The taxonomy of error kinds this crate can produce, per the
/// Structural / Value-domain / Resource / Path / User grouping.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Attempted to read past the end of the input buffer.
    #[error("unexpected end of buffer")]
    UnexpectedEof,

    /// Bytes remain unread after a non-pointer-aware top-level decode.
    #[error("{0} byte(s) remain unread after decode")]
    TrailingBytes(usize),

    /// Unread byte ranges remain after a pointer-aware decode.
    #[error("unread byte range(s) remain after decode: {0}")]
    UnreadRanges(String),

    /// A byte-level operation was attempted with an unaligned bit
    /// cursor.
    #[error("byte-level operation attempted with unaligned bit cursor ({0} bit(s) pending)")]
    Misaligned(u8),

    /// An integer value did not fit the declared width/signedness.
    #[error("integer value {value} does not fit in {width}-byte {sign} integer")]
    IntOutOfRange {
        value: String,
        width: usize,
        sign: &'static str,
    },

    /// A non-numeric [`Value`](crate::Value) was fed to a numeric
    /// coder.
    #[error("expected a numeric value, got {0}")]
    NotANumber(&'static str),

    /// A value of the wrong kind was fed to a coder.
    #[error("expected a {expected} value, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    /// `magic`/`constant` decoded a value that did not match the
    /// expected constant.
    #[error("expected constant {expected}, got {actual}")]
    ConstantMismatch { expected: String, actual: String },

    /// `map`/`mappedTag` was asked to encode/decode an unknown
    /// name/discriminator.
    #[error("unknown variant {0:?}")]
    UnknownVariant(String),

    /// An `array`/`bytes` terminator pattern was matched inside an
    /// encoded element.
    #[error("encoded element collides with terminator pattern")]
    TerminatorCollision,

    /// A `bits` call requested a width outside `1..=32`.
    #[error("bit field width {0} outside of 1..=32")]
    BitWidth(u32),

    /// `int` was constructed with a byte width above 6 (unsafe to
    /// hold in an `f64`-precision machine integer).
    #[error("int coder byte width {0} exceeds the 6-byte safe-integer limit")]
    UnsafeIntWidth(usize),

    /// Reading the same input byte twice via distinct pointers with
    /// `allow_multiple_reads = false`.
    #[error("byte at offset {0:#x} was read more than once through a pointer")]
    PointerMultipleRead(usize),

    /// A length specifier resolved against the path stack found no
    /// such field, or the field was not an integer.
    #[error("length path {0:?} did not resolve to an integer field")]
    BadLengthPath(String),

    /// A resolved length (path or fixed) did not match the actual
    /// length being encoded.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// A length resolved to a negative or unrepresentable value.
    #[error("length resolved to an invalid value: {0}")]
    BadLength(String),

    /// An `unbounded` length specifier was used somewhere other than
    /// the last element of its container.
    #[error("unbounded length specifier used outside of the last position in its container")]
    UnboundedNotLast,

    /// A `validate` callback rejected the value.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A `pointer` combinator's placeholder coder has no fixed size.
    #[error("pointer placeholder coder must have a fixed size")]
    PointerPlaceholderUnsized,

    /// Armor decoding failed: malformed header/footer, bad base64, or
    /// a checksum mismatch.
    #[error("armor error: {0}")]
    Armor(String),

    /// Generic I/O failure bubbled up from the underlying bit cursor.
    #[error("{0}")]
    Io(String),
}

/// The error type returned by every fallible operation in this crate.
#[derive(Debug, Error)]
#[error("{kind} (at /{})", render_path(path))]
pub struct Error {
    pub path: Vec<PathSegment>,
    pub kind: ErrorKind,
}

fn render_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl Error {
    pub fn new(path: Vec<PathSegment>, kind: ErrorKind) -> Self {
        Self { path, kind }
    }

    /// Builds an error with an empty path, for call sites not yet
    /// inside a Reader/Writer (e.g. building a coder).
    pub fn bare(kind: ErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
