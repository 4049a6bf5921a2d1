//! `dict(length, keyCoder, valueCoder)`: a named-field map, encoded on
//! the wire as an array of key/value pairs.

use indexmap::IndexMap;

use crate::coder::{BoxCoder, Coder};
use crate::combinators::array::array;
use crate::combinators::tuple::tuple_coder;
use crate::error::{Error, ErrorKind};
use crate::length::Length;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct DictCoder {
    pairs: BoxCoder,
}

impl Coder for DictCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let map = value
            .as_struct()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "dict",
                actual: value.type_name(),
            }))?;
        let pairs: Vec<Value> = map
            .iter()
            .map(|(k, v)| Value::Array(vec![Value::Str(k.clone()), v.clone()]))
            .collect();
        self.pairs.encode_stream(w, &Value::Array(pairs))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.pairs.decode_stream(r)?;
        let pairs = decoded
            .as_array()
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::WrongType {
                expected: "array of pairs",
                actual: decoded.type_name(),
            }))?;
        let mut map = IndexMap::new();
        for pair in pairs {
            let items = pair
                .as_array()
                .filter(|items| items.len() == 2)
                .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::WrongType {
                    expected: "key/value pair",
                    actual: pair.type_name(),
                }))?;
            let key = items[0]
                .as_str()
                .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::WrongType {
                    expected: "string key",
                    actual: items[0].type_name(),
                }))?;
            map.insert(key.to_string(), items[1].clone());
        }
        Ok(Value::Struct(map))
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn dict(length: Length, key_coder: BoxCoder, value_coder: BoxCoder) -> BoxCoder {
    Box::new(DictCoder {
        pairs: array(length, tuple_coder(vec![key_coder, value_coder])),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;
    use crate::primitives::string::cstring;

    #[test]
    fn round_trips_struct_as_array_of_pairs() {
        let coder = dict(Length::coder(Box::new(U8)), cstring(), Box::new(U8));
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Value::UInt(1));
        map.insert("b".to_string(), Value::UInt(2));

        let encoded = coder.encode(&Value::Struct(map.clone())).unwrap();
        assert_eq!(
            coder.decode(&encoded, ReaderOpts::new()).unwrap(),
            Value::Struct(map)
        );
    }
}
