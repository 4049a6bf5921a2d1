//! The streaming output cursor: append-only bytes + bit sub-buffer +
//! path stack + deferred-pointer list.

use std::sync::Arc;

use packed_bitio::BitWriter;

use crate::coder::Coder;
use crate::error::{Error, ErrorKind, PathSegment};
use crate::opts::WriterOpts;
use crate::path::Frame;
use crate::value::Value;

struct DeferredPointer {
    placeholder_offset: usize,
    placeholder_size: usize,
    placeholder_coder: Arc<dyn Coder>,
    pointee: Vec<u8>,
}

/// An append-only output buffer, owned by exactly one top-level
/// [`encode`](crate::encode) call.
pub struct Writer {
    bits: BitWriter,
    #[allow(dead_code)]
    opts: WriterOpts,
    pub(crate) labels: Vec<PathSegment>,
    pub(crate) frames: Vec<Frame>,
    deferred: Vec<DeferredPointer>,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            bits: BitWriter::new(),
            opts: WriterOpts::new(),
            labels: Vec::new(),
            frames: Vec::new(),
            deferred: Vec::new(),
        }
    }

    pub fn with_opts(opts: WriterOpts) -> Self {
        Self {
            opts,
            ..Self::new()
        }
    }

    fn err(&self, kind: ErrorKind) -> Error {
        Error::new(self.labels.clone(), kind)
    }

    /// The number of whole bytes committed so far (excludes any
    /// partially-filled byte still in the bit buffer).
    pub fn position(&self) -> usize {
        self.bits.len()
    }

    pub fn is_aligned(&self) -> bool {
        self.bits.is_aligned()
    }

    pub fn byte(&mut self, b: u8) -> Result<(), Error> {
        self.bits
            .byte(b)
            .map_err(|_| self.err(ErrorKind::Misaligned(8 - self.bits.bit_pos())))
    }

    pub fn bytes(&mut self, b: &[u8]) -> Result<(), Error> {
        self.bits
            .bytes(b)
            .map_err(|_| self.err(ErrorKind::Misaligned(8 - self.bits.bit_pos())))
    }

    /// Writes the low `n` bits of `value` (1 ≤ n ≤ 32), high-bit-first.
    pub fn write_bits(&mut self, value: u32, n: u32) -> Result<(), Error> {
        if n == 0 || n > 32 {
            return Err(self.err(ErrorKind::BitWidth(n)));
        }
        self.bits
            .write_bits(value, n)
            .map_err(|_| self.err(ErrorKind::BadLength(format!("{value} does not fit in {n} bits"))))
    }

    pub fn finish_byte(&mut self) {
        self.bits.finish_byte();
    }

    /// Resolves and checks a path-based length specifier against
    /// `actual`.
    pub fn check_path_length(&self, path: &str, actual: u64) -> Result<(), Error> {
        let expected = crate::path::resolve(&self.frames, path).map_err(|mut e| {
            e.path = self.labels.clone();
            e
        })?;
        if expected != actual {
            Err(self.err(ErrorKind::LengthMismatch { expected, actual }))
        } else {
            Ok(())
        }
    }

    /// Resolves a `flagged` path-based boolean selector against the
    /// current frame stack, for an encode-side consistency check.
    pub fn resolve_path_bool(&self, path: &str) -> Result<bool, Error> {
        crate::path::resolve_bool(&self.frames, path).map_err(|mut e| {
            e.path = self.labels.clone();
            e
        })
    }

    /// Reserves `size` zero bytes at the current (aligned) position
    /// for a pointer placeholder, returning the offset reserved at.
    pub fn reserve_placeholder(&mut self, size: usize) -> Result<usize, Error> {
        let offset = self.position();
        self.bytes(&vec![0u8; size])?;
        Ok(offset)
    }

    /// Queues a deferred pointer: `pointee` will be appended to the
    /// output at `finish()` time, and the placeholder reserved at
    /// `placeholder_offset` patched with the pointee's absolute
    /// offset, encoded via `placeholder_coder`.
    pub fn defer_pointer(
        &mut self,
        placeholder_offset: usize,
        placeholder_size: usize,
        placeholder_coder: Arc<dyn Coder>,
        pointee: Vec<u8>,
    ) {
        self.deferred.push(DeferredPointer {
            placeholder_offset,
            placeholder_size,
            placeholder_coder,
            pointee,
        });
    }

    /// Concatenates all committed bytes, appends every deferred
    /// pointee in registration order, and patches each placeholder
    /// with the absolute offset its pointee begins at.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        if !self.bits.is_aligned() {
            return Err(Error::new(
                self.labels.clone(),
                ErrorKind::Misaligned(8 - self.bits.bit_pos()),
            ));
        }

        let deferred = self.deferred;
        let labels = self.labels;
        let mut out = self
            .bits
            .into_inner()
            .map_err(|e| Error::new(labels.clone(), ErrorKind::Io(e.to_string())))?;

        let mut patches = Vec::with_capacity(deferred.len());
        for dp in deferred {
            let pointee_offset = out.len();
            out.extend_from_slice(&dp.pointee);
            patches.push((
                dp.placeholder_offset,
                dp.placeholder_size,
                dp.placeholder_coder,
                pointee_offset,
            ));
        }

        for (offset, size, coder, pointee_offset) in patches {
            let mut tmp = Writer::new();
            coder.encode_stream(&mut tmp, &Value::UInt(pointee_offset as u64))?;
            let patch = tmp.finish()?;
            if patch.len() != size {
                return Err(Error::new(
                    labels.clone(),
                    ErrorKind::BadLength(format!(
                        "pointer placeholder produced {} bytes, expected {size}",
                        patch.len()
                    )),
                ));
            }
            out[offset..offset + size].copy_from_slice(&patch);
        }

        Ok(out)
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
