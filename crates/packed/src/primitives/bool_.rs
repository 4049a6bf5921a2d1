//! The one-byte boolean coder.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCoder;

impl Coder for BoolCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let b = value
            .as_bool()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "bool",
                actual: value.type_name(),
            }))?;
        w.byte(if b { 1 } else { 0 })
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        match r.byte(false)? {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            other => Err(Error::new(
                r.labels.clone(),
                ErrorKind::ConstantMismatch {
                    expected: "0x00 or 0x01".into(),
                    actual: format!("{other:#04x}"),
                },
            )),
        }
    }

    fn size(&self) -> Option<usize> {
        Some(1)
    }
}

pub const BOOL: BoolCoder = BoolCoder;

pub fn bool() -> BoxCoder {
    Box::new(BoolCoder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;

    #[test]
    fn round_trips_true_and_false() {
        assert_eq!(BOOL.encode(&Value::Bool(true)).unwrap(), vec![1]);
        assert_eq!(BOOL.encode(&Value::Bool(false)).unwrap(), vec![0]);
        assert_eq!(BOOL.decode(&[1], ReaderOpts::new()).unwrap(), Value::Bool(true));
    }

    #[test]
    fn decode_rejects_other_bytes() {
        assert!(BOOL.decode(&[2], ReaderOpts::new()).is_err());
    }
}
