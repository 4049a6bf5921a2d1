//! `flag(pattern, xor)`: a boolean represented by the presence or
//! absence of a byte pattern.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct FlagCoder {
    pattern: Vec<u8>,
    xor: bool,
}

impl Coder for FlagCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let b = value
            .as_bool()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "bool",
                actual: value.type_name(),
            }))?;
        if b ^ self.xor {
            w.bytes(&self.pattern)?;
        }
        Ok(())
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let matched = if self.pattern.is_empty() {
            false
        } else {
            match r.bytes(self.pattern.len(), true) {
                Ok(peeked) if packed_utils::equal_bytes(peeked, &self.pattern) => {
                    r.bytes(self.pattern.len(), false)?;
                    true
                }
                _ => false,
            }
        };
        Ok(Value::Bool(matched ^ self.xor))
    }

    fn size(&self) -> Option<usize> {
        self.pattern.is_empty().then_some(0)
    }
}

pub fn flag(pattern: impl Into<Vec<u8>>, xor: bool) -> BoxCoder {
    Box::new(FlagCoder {
        pattern: pattern.into(),
        xor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;

    #[test]
    fn emits_pattern_only_when_true() {
        let coder = flag(vec![0xFF], false);
        assert_eq!(coder.encode(&Value::Bool(true)).unwrap(), vec![0xFF]);
        assert_eq!(coder.encode(&Value::Bool(false)).unwrap(), Vec::<u8>::new());
        assert_eq!(coder.decode(&[0xFF], ReaderOpts::new()).unwrap(), Value::Bool(true));
        assert_eq!(coder.decode(&[], ReaderOpts::new()).unwrap(), Value::Bool(false));
    }

    #[test]
    fn xor_inverts_the_meaning() {
        let coder = flag(vec![0xFF], true);
        assert_eq!(coder.encode(&Value::Bool(false)).unwrap(), vec![0xFF]);
        assert_eq!(coder.decode(&[0xFF], ReaderOpts::new()).unwrap(), Value::Bool(false));
    }
}
