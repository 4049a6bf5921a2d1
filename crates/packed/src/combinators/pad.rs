//! `padLeft`/`padRight(blockSize, inner, padFn)`: round an inner
//! coder's width up to a multiple of `blockSize` bytes.

use std::sync::Arc;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// Supplies the `i`-th padding byte; defaults to all-zero padding.
pub type PadFn = Arc<dyn Fn(usize) -> u8 + Send + Sync>;

fn pad_len(consumed: usize, block_size: usize) -> usize {
    let rem = consumed % block_size;
    if rem == 0 {
        0
    } else {
        block_size - rem
    }
}

enum Side {
    Left,
    Right,
}

pub struct PadCoder {
    inner: BoxCoder,
    block_size: usize,
    pad_fn: Option<PadFn>,
    side: Side,
}

impl PadCoder {
    fn pad_byte(&self, i: usize) -> u8 {
        self.pad_fn.as_ref().map(|f| f(i)).unwrap_or(0)
    }
}

impl Coder for PadCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        match self.side {
            Side::Left => {
                let size = self
                    .inner
                    .size()
                    .expect("padLeft requires a fixed-size inner coder, checked at construction");
                let pad = pad_len(size, self.block_size);
                for i in 0..pad {
                    w.byte(self.pad_byte(i))?;
                }
                self.inner.encode_stream(w, value)
            }
            Side::Right => {
                let mut tmp = Writer::new();
                tmp.labels = w.labels.clone();
                self.inner.encode_stream(&mut tmp, value)?;
                let body = tmp.finish()?;
                w.bytes(&body)?;
                let pad = pad_len(body.len(), self.block_size);
                for i in 0..pad {
                    w.byte(self.pad_byte(i))?;
                }
                Ok(())
            }
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        match self.side {
            Side::Left => {
                let size = self
                    .inner
                    .size()
                    .expect("padLeft requires a fixed-size inner coder, checked at construction");
                let pad = pad_len(size, self.block_size);
                r.bytes(pad, false)?;
                self.inner.decode_stream(r)
            }
            Side::Right => {
                let before = r.local_pos();
                let value = self.inner.decode_stream(r)?;
                let consumed = r.local_pos() - before;
                let pad = pad_len(consumed, self.block_size);
                r.bytes(pad, false)?;
                Ok(value)
            }
        }
    }

    fn size(&self) -> Option<usize> {
        let size = self.inner.size()?;
        let pad = pad_len(size, self.block_size);
        Some(size + pad)
    }
}

pub fn pad_left(block_size: usize, inner: BoxCoder, pad_fn: Option<PadFn>) -> Result<BoxCoder, Error> {
    if inner.size().is_none() {
        return Err(Error::bare(ErrorKind::BadLength(
            "padLeft requires a fixed-size inner coder".into(),
        )));
    }
    Ok(Box::new(PadCoder {
        inner,
        block_size,
        pad_fn,
        side: Side::Left,
    }))
}

pub fn pad_right(block_size: usize, inner: BoxCoder, pad_fn: Option<PadFn>) -> BoxCoder {
    Box::new(PadCoder {
        inner,
        block_size,
        pad_fn,
        side: Side::Right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::string::cstring;

    #[test]
    fn pad_right_rounds_cstring_up_to_block_size() {
        let coder = pad_right(3, cstring(), None);
        assert_eq!(coder.encode(&Value::Str("a".into())).unwrap(), vec![0x61, 0, 0]);
        assert_eq!(
            coder.encode(&Value::Str("aaaa".into())).unwrap(),
            vec![0x61, 0x61, 0x61, 0x61, 0, 0]
        );
        assert_eq!(
            coder.decode(&[0x61, 0, 0], ReaderOpts::new()).unwrap(),
            Value::Str("a".into())
        );
    }

    #[test]
    fn pad_left_requires_fixed_size_inner() {
        assert!(pad_left(4, cstring(), None).is_err());
    }
}
