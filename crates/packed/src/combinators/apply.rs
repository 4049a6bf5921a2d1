//! `apply(inner, baseCoder)`: composes an inner coder with an
//! external value↔value bijection, producing a coder over the
//! bijection's outer type.

use std::sync::Arc;

use crate::coder::{BoxCoder, Coder};
use crate::error::Error;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub type ToInner = Arc<dyn Fn(&Value) -> Result<Value, Error> + Send + Sync>;
pub type FromInner = Arc<dyn Fn(Value) -> Result<Value, Error> + Send + Sync>;

pub struct ApplyCoder {
    inner: BoxCoder,
    to_inner: ToInner,
    from_inner: FromInner,
}

impl Coder for ApplyCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let converted = (self.to_inner)(value)?;
        self.inner.encode_stream(w, &converted)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let raw = self.inner.decode_stream(r)?;
        (self.from_inner)(raw)
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn apply(inner: BoxCoder, to_inner: ToInner, from_inner: FromInner) -> BoxCoder {
    Box::new(ApplyCoder {
        inner,
        to_inner,
        from_inner,
    })
}
