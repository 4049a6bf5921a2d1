//! `flagged(selector, inner, default)`: a conditionally-present value,
//! `selector` either a path reference to an already-known boolean or
//! an inline boolean coder. Presence is represented at the value level
//! by [`Value::Unit`] meaning absent.
//!
//! When `default` is set and the flag is off, encode still emits
//! `inner`'s encoding of `default` (preserving fixed framing), and
//! decode still consumes those bytes but discards them, returning
//! `default` instead.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub enum Selector {
    Path(String),
    Coder(BoxCoder),
}

pub struct FlaggedCoder {
    selector: Selector,
    inner: BoxCoder,
    default: Option<Value>,
}

impl Coder for FlaggedCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let present = !matches!(value, Value::Unit);
        match &self.selector {
            Selector::Path(path) => {
                w.resolve_path_bool(path)?;
            }
            Selector::Coder(c) => c.encode_stream(w, &Value::Bool(present))?,
        }

        if present {
            self.inner.encode_stream(w, value)
        } else if let Some(default) = &self.default {
            self.inner.encode_stream(w, default)
        } else {
            Ok(())
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let present = match &self.selector {
            Selector::Path(path) => r.resolve_path_bool(path)?,
            Selector::Coder(c) => {
                let decoded = c.decode_stream(r)?;
                decoded.as_bool().ok_or_else(|| {
                    Error::new(
                        r.labels.clone(),
                        ErrorKind::WrongType {
                            expected: "bool",
                            actual: decoded.type_name(),
                        },
                    )
                })?
            }
        };

        if present {
            self.inner.decode_stream(r)
        } else if let Some(default) = &self.default {
            self.inner.decode_stream(r)?;
            Ok(default.clone())
        } else {
            Ok(Value::Unit)
        }
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn flagged(selector: Selector, inner: BoxCoder, default: Option<Value>) -> BoxCoder {
    Box::new(FlaggedCoder {
        selector,
        inner,
        default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::bool_::bool as bool_coder;
    use crate::primitives::int::U8;

    #[test]
    fn inline_selector_round_trips_present_and_absent() {
        let coder = flagged(Selector::Coder(bool_coder()), Box::new(U8), None);
        let encoded = coder.encode(&Value::UInt(7)).unwrap();
        assert_eq!(encoded, vec![1, 7]);
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), Value::UInt(7));

        let encoded_absent = coder.encode(&Value::Unit).unwrap();
        assert_eq!(encoded_absent, vec![0]);
        assert_eq!(coder.decode(&encoded_absent, ReaderOpts::new()).unwrap(), Value::Unit);
    }

    #[test]
    fn default_is_re_encoded_and_discarded_on_decode() {
        let coder = flagged(Selector::Coder(bool_coder()), Box::new(U8), Some(Value::UInt(99)));
        let encoded_absent = coder.encode(&Value::Unit).unwrap();
        assert_eq!(encoded_absent, vec![0, 99]);
        assert_eq!(
            coder.decode(&encoded_absent, ReaderOpts::new()).unwrap(),
            Value::UInt(99)
        );
    }
}
