//! `magic`, `constant`, and `nothing` — coders over a single known
//! value.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// Always encodes `constant` via `inner`; decode reads a value through
/// `inner` and (if `check`) verifies it equals `constant`. The
/// returned decoded value is always [`Value::Unit`], regardless of
/// what `inner` produced on the wire.
pub struct MagicCoder {
    pub inner: BoxCoder,
    pub constant: Value,
    pub check: bool,
}

impl Coder for MagicCoder {
    fn encode_stream(&self, w: &mut Writer, _value: &Value) -> Result<(), Error> {
        self.inner.encode_stream(w, &self.constant)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        if self.check && decoded != self.constant {
            return Err(Error::new(
                r.labels.clone(),
                ErrorKind::ConstantMismatch {
                    expected: format!("{:?}", self.constant),
                    actual: format!("{decoded:?}"),
                },
            ));
        }
        Ok(Value::Unit)
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn magic(inner: BoxCoder, constant: Value, check: bool) -> BoxCoder {
    Box::new(MagicCoder {
        inner,
        constant,
        check,
    })
}

/// Always decodes to `c` without consuming any bytes; encode rejects
/// anything that does not equal `c`.
pub struct ConstantCoder {
    pub value: Value,
}

impl Coder for ConstantCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        if value != &self.value {
            return Err(Error::new(
                w.labels.clone(),
                ErrorKind::ConstantMismatch {
                    expected: format!("{:?}", self.value),
                    actual: format!("{value:?}"),
                },
            ));
        }
        Ok(())
    }

    fn decode_stream(&self, _r: &mut Reader<'_>) -> Result<Value, Error> {
        Ok(self.value.clone())
    }

    fn size(&self) -> Option<usize> {
        Some(0)
    }
}

pub fn constant(value: Value) -> BoxCoder {
    Box::new(ConstantCoder { value })
}

/// Zero-width coder that always succeeds, decoding to [`Value::Unit`].
pub struct NothingCoder;

impl Coder for NothingCoder {
    fn encode_stream(&self, _w: &mut Writer, _value: &Value) -> Result<(), Error> {
        Ok(())
    }

    fn decode_stream(&self, _r: &mut Reader<'_>) -> Result<Value, Error> {
        Ok(Value::Unit)
    }

    fn size(&self) -> Option<usize> {
        Some(0)
    }
}

pub const NOTHING: NothingCoder = NothingCoder;

pub fn nothing() -> BoxCoder {
    Box::new(NothingCoder)
}
