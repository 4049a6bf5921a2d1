//! `prefix(length, inner)`: frame an inner coder's output behind a
//! length specifier, decoding it from an isolated sub-reader that must
//! consume the whole frame.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::length::Length;
use crate::opts::ReaderOpts;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct PrefixCoder {
    length: Length,
    inner: BoxCoder,
}

impl Coder for PrefixCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let mut tmp = Writer::new();
        tmp.labels = w.labels.clone();
        self.inner.encode_stream(&mut tmp, value)?;
        let payload = tmp.finish()?;

        match &self.length {
            Length::Terminator(pattern) => {
                if packed_utils::is_bytes(&payload, 0, pattern) {
                    return Err(Error::new(w.labels.clone(), ErrorKind::TerminatorCollision));
                }
                w.bytes(&payload)?;
                w.bytes(pattern)
            }
            Length::Unbounded => w.bytes(&payload),
            other => {
                other.write_count(w, payload.len() as u64)?;
                w.bytes(&payload)
            }
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let framed = match &self.length {
            Length::Terminator(pattern) => {
                let start = r.local_pos();
                let pos = r
                    .find(pattern)?
                    .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnexpectedEof))?;
                let data = r.bytes(pos - start, false)?.to_vec();
                r.bytes(pattern.len(), false)?;
                data
            }
            Length::Unbounded => {
                let n = r.remaining();
                r.bytes(n, false)?.to_vec()
            }
            other => {
                let n = other.read_count(r)?;
                r.bytes(n as usize, false)?.to_vec()
            }
        };

        let mut sub = Reader::new(&framed, ReaderOpts::new());
        sub.labels = r.labels.clone();
        let value = self.inner.decode_stream(&mut sub)?;
        sub.finish()?;
        Ok(value)
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn prefix(length: Length, inner: BoxCoder) -> BoxCoder {
    Box::new(PrefixCoder { length, inner })
}
