//! The streaming input cursor: bytes + bit sub-cursor + path stack +
//! pointer-aware read tracking.

use std::cell::RefCell;
use std::rc::Rc;

use packed_bitio::BitReader;

use crate::bitset::ReadBitset;
use crate::error::{Error, ErrorKind, PathSegment};
use crate::opts::ReaderOpts;
use crate::path::Frame;

struct Shared {
    bitset: Option<ReadBitset>,
    root_len: usize,
}

/// A cursor over an input byte buffer, shared by every coder called
/// during one top-level [`decode`](crate::decode).
///
/// Cloning a [`Reader`] is cheap in the sense that [`Self::offset_reader`]
/// produces a fresh cursor that still routes its read-bitset updates
/// back to the same root: pointer chains share one tracker.
pub struct Reader<'a> {
    root: &'a [u8],
    base: usize,
    bits: BitReader<'a>,
    pub(crate) opts: ReaderOpts,
    pub(crate) labels: Vec<PathSegment>,
    pub(crate) frames: Vec<Frame>,
    shared: Rc<RefCell<Shared>>,
}

impl<'a> Reader<'a> {
    /// Creates a fresh, standalone reader over `data`. Used both for
    /// top-level decodes and for self-contained sub-decodes (e.g.
    /// `prefix`) that must not share pointer tracking with their
    /// parent.
    pub fn new(data: &'a [u8], opts: ReaderOpts) -> Self {
        Self {
            root: data,
            base: 0,
            bits: BitReader::new(data),
            opts,
            labels: Vec::new(),
            frames: Vec::new(),
            shared: Rc::new(RefCell::new(Shared {
                bitset: None,
                root_len: data.len(),
            })),
        }
    }

    fn err(&self, kind: ErrorKind) -> Error {
        Error::new(self.labels.clone(), kind)
    }

    pub fn opts(&self) -> ReaderOpts {
        self.opts
    }

    /// The current absolute byte offset within the root buffer.
    pub fn position(&self) -> usize {
        self.base + self.bits.pos()
    }

    /// The current byte offset local to this reader's own view
    /// (equal to [`Self::position`] for the root reader, but relative
    /// to `base` for an [`Self::offset_reader`]).
    pub fn local_pos(&self) -> usize {
        self.bits.pos()
    }

    /// The number of whole bytes left in this reader's local view.
    pub fn remaining(&self) -> usize {
        self.bits.remaining()
    }

    pub fn is_aligned(&self) -> bool {
        self.bits.is_aligned()
    }

    fn mark_consumed(&mut self, local_before: usize, len: usize) -> Result<(), Error> {
        if len == 0 {
            return Ok(());
        }
        let mut shared = self.shared.borrow_mut();
        if let Some(bitset) = shared.bitset.as_mut() {
            let ok = bitset.range_set(self.base + local_before, len, self.opts.allow_multiple_reads);
            if !ok {
                return Err(self.err(ErrorKind::PointerMultipleRead(self.base + local_before)));
            }
        }
        Ok(())
    }

    /// Reads (or peeks) the next byte.
    pub fn byte(&mut self, peek: bool) -> Result<u8, Error> {
        let before = self.bits.pos();
        let b = self
            .bits
            .byte(peek)
            .map_err(|_| self.err(ErrorKind::UnexpectedEof))?;
        if !peek {
            self.mark_consumed(before, self.bits.pos() - before)?;
        }
        Ok(b)
    }

    /// Reads (or peeks) the next `n` bytes.
    pub fn bytes(&mut self, n: usize, peek: bool) -> Result<&'a [u8], Error> {
        let before = self.bits.pos();
        let slice = self
            .bits
            .bytes(n, peek)
            .map_err(|_| self.err(ErrorKind::UnexpectedEof))?;
        if !peek {
            self.mark_consumed(before, self.bits.pos() - before)?;
        }
        Ok(slice)
    }

    /// Reads the next `n` bits (1 ≤ n ≤ 32), high-bit-first.
    pub fn bits(&mut self, n: u32) -> Result<u32, Error> {
        if n == 0 || n > 32 {
            return Err(self.err(ErrorKind::BitWidth(n)));
        }
        let before = self.bits.pos();
        let value = self
            .bits
            .bits(n)
            .map_err(|_| self.err(ErrorKind::UnexpectedEof))?;
        self.mark_consumed(before, self.bits.pos() - before)?;
        Ok(value)
    }

    /// Drops any partially-read byte's remaining bits, realigning to
    /// the next byte boundary.
    pub fn finish_byte(&mut self) {
        self.bits.finish_byte();
    }

    /// Locates the next occurrence of `needle` at or after the
    /// current position. Does not consume any bytes.
    pub fn find(&self, needle: &[u8]) -> Result<Option<usize>, Error> {
        if needle.is_empty() {
            return Err(self.err(ErrorKind::BadLength(
                "terminator pattern must not be empty".into(),
            )));
        }
        self.bits
            .find(needle, self.bits.pos())
            .map_err(|_| self.err(ErrorKind::UnexpectedEof))
    }

    /// Constructs a child reader rooted at offset `n` relative to this
    /// reader's own base, sharing this reader's read-bitset tracker.
    ///
    /// `n` is relative, not absolute: a pointee's own pointers are
    /// encoded relative to that pointee's sub-buffer, so a nested
    /// pointer must resolve against `self.base + n`, not `n` alone.
    pub fn offset_reader(&self, n: usize) -> Result<Reader<'a>, Error> {
        let abs = self.base + n;
        if abs > self.root.len() {
            return Err(self.err(ErrorKind::UnexpectedEof));
        }
        Ok(Reader {
            root: self.root,
            base: abs,
            bits: BitReader::new(&self.root[abs..]),
            opts: self.opts,
            labels: {
                let mut labels = self.labels.clone();
                labels.push(PathSegment::Pointer(abs));
                labels
            },
            frames: Vec::new(),
            shared: Rc::clone(&self.shared),
        })
    }

    /// Activates pointer-aware read tracking: allocates the
    /// read-bitset (if not already allocated) and marks every byte
    /// already consumed, from offset 0 up to this reader's current
    /// absolute position, as read.
    pub fn enable_ptr(&mut self) {
        let pos = self.position();
        let mut shared = self.shared.borrow_mut();
        if shared.bitset.is_none() {
            shared.bitset = Some(ReadBitset::new(shared.root_len));
        }
        if let Some(bitset) = shared.bitset.as_mut() {
            bitset.range_set(0, pos, true);
        }
    }

    /// Validates end-of-decode invariants: the bit cursor must be
    /// aligned, and either (no pointer tracking) the cursor sits at
    /// the end of the buffer, or (pointer tracking active) every
    /// tracked byte has been read — both subject to
    /// `allow_unread_bytes`.
    pub fn finish(&self) -> Result<(), Error> {
        if !self.is_aligned() && !self.opts.allow_unread_bytes {
            return Err(self.err(ErrorKind::Misaligned(8 - self.bits.bit_pos())));
        }

        if self.opts.allow_unread_bytes {
            return Ok(());
        }

        let shared = self.shared.borrow();
        match shared.bitset.as_ref() {
            None => {
                if self.bits.pos() != self.bits.len() {
                    Err(self.err(ErrorKind::TrailingBytes(self.bits.len() - self.bits.pos())))
                } else {
                    Ok(())
                }
            }
            Some(bitset) => {
                if bitset.all_set() {
                    Ok(())
                } else {
                    let ranges = bitset
                        .unset_ranges()
                        .iter()
                        .map(|(s, e)| format!("{s:#x}..{e:#x}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(self.err(ErrorKind::UnreadRanges(ranges)))
                }
            }
        }
    }

    /// Resolves a length specifier that is a path expression, against
    /// the current frame stack.
    pub fn resolve_path_length(&self, path: &str) -> Result<u64, Error> {
        crate::path::resolve(&self.frames, path).map_err(|mut e| {
            e.path = self.labels.clone();
            e
        })
    }

    /// Resolves a `flagged` path-based boolean selector against the
    /// current frame stack.
    pub fn resolve_path_bool(&self, path: &str) -> Result<bool, Error> {
        crate::path::resolve_bool(&self.frames, path).map_err(|mut e| {
            e.path = self.labels.clone();
            e
        })
    }
}
