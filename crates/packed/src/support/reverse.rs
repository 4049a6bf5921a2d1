//! `reverse(inner)`: byte-reverses a fixed-size inner coder's wire
//! representation, for formats that store a field backwards relative
//! to its natural encoding.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct ReverseCoder {
    inner: BoxCoder,
    size: usize,
}

impl Coder for ReverseCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let mut standalone = Writer::new();
        standalone.labels = w.labels.clone();
        self.inner.encode_stream(&mut standalone, value)?;
        let mut bytes = standalone.finish()?;
        if bytes.len() != self.size {
            return Err(Error::new(
                w.labels.clone(),
                ErrorKind::LengthMismatch {
                    expected: self.size as u64,
                    actual: bytes.len() as u64,
                },
            ));
        }
        bytes.reverse();
        w.bytes(&bytes)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let mut bytes = r.bytes(self.size, false)?.to_vec();
        bytes.reverse();
        let mut sub = Reader::new(&bytes, r.opts());
        sub.labels = r.labels.clone();
        let value = self.inner.decode_stream(&mut sub)?;
        sub.finish()?;
        Ok(value)
    }

    fn size(&self) -> Option<usize> {
        Some(self.size)
    }
}

/// `inner` must have a fixed `size`; there is no well-defined way to
/// byte-reverse a variable-length payload without first knowing its
/// length.
pub fn reverse(inner: BoxCoder) -> Result<BoxCoder, Error> {
    let size = inner
        .size()
        .ok_or_else(|| Error::bare(ErrorKind::BadLength("reverse requires a fixed-size inner coder".into())))?;
    Ok(Box::new(ReverseCoder { inner, size }))
}
