//! Byte- and bit-level cursors used to build the coder engine's
//! [`Reader`](crate::BitReader) and [`Writer`](crate::BitWriter).
//!
//! Bits are packed **high-bit-first** within each byte: the first bit
//! written (or read) ends up in the most significant unused position
//! of the current byte. This is the opposite convention of a typical
//! LSB-first bitstream reader, and is mandated by the format this
//! crate serves.
//!
//! # Implementation
//!
//! Unlike a throughput-oriented bit reader that prefetches a 64-bit
//! lookahead window through unsafe, unaligned loads, this crate
//! processes one byte of lookahead at a time. The coder engine built
//! on top of it is dominated by combinator dispatch and per-field
//! bookkeeping, not raw bit-shuffling throughput, so the straightforward
//! byte-at-a-time algorithm is the right tradeoff: it is `forbid(unsafe_code)`
//! and every operation is a handful of masks and shifts.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod reader;
pub use reader::BitReader;

mod writer;
pub use writer::BitWriter;

/// The maximum number of bits a single [`BitReader::bits`] or
/// [`BitWriter::write_bits`] call may span.
pub const MAX_BITS: u32 = 32;
