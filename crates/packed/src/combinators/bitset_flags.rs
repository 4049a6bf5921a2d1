//! `bitset(names, pad)`: a fixed set of named boolean flags packed one
//! bit apiece, in declaration order.

use indexmap::IndexMap;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct BitsetCoder {
    names: Vec<String>,
    pad: bool,
}

impl Coder for BitsetCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let fields = value
            .as_struct()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "bitset struct",
                actual: value.type_name(),
            }))?;
        for name in &self.names {
            let bit = fields
                .get(name)
                .and_then(Value::as_bool)
                .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                    expected: "bool flag",
                    actual: fields.get(name).map(Value::type_name).unwrap_or("missing"),
                }))?;
            w.write_bits(bit as u32, 1)?;
        }
        if self.pad {
            w.finish_byte();
        }
        Ok(())
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let mut fields = IndexMap::new();
        for name in &self.names {
            let bit = r.bits(1)?;
            fields.insert(name.clone(), Value::Bool(bit != 0));
        }
        if self.pad {
            r.finish_byte();
        }
        Ok(Value::Struct(fields))
    }

    fn size(&self) -> Option<usize> {
        if self.pad {
            Some(self.names.len().div_ceil(8))
        } else {
            None
        }
    }
}

pub fn bitset(names: Vec<String>, pad: bool) -> BoxCoder {
    Box::new(BitsetCoder { names, pad })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;

    #[test]
    fn packs_flags_and_pads_to_byte_boundary() {
        let coder = bitset(vec!["a".into(), "b".into(), "c".into()], true);
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), Value::Bool(true));
        fields.insert("b".to_string(), Value::Bool(false));
        fields.insert("c".to_string(), Value::Bool(true));

        let encoded = coder.encode(&Value::Struct(fields.clone())).unwrap();
        assert_eq!(encoded, vec![0b1010_0000]);
        assert_eq!(
            coder.decode(&encoded, ReaderOpts::new()).unwrap(),
            Value::Struct(fields)
        );
    }
}
