//! `map(inner, variants)`: a bijection between a finite set of string
//! names and the values an inner coder encodes/decodes.

use indexmap::IndexMap;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct MapCoder {
    inner: BoxCoder,
    variants: IndexMap<String, Value>,
}

impl Coder for MapCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let name = value
            .as_str()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "map variant name",
                actual: value.type_name(),
            }))?;
        let wire = self
            .variants
            .get(name)
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::UnknownVariant(name.to_string())))?;
        self.inner.encode_stream(w, wire)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let wire = self.inner.decode_stream(r)?;
        self.variants
            .iter()
            .find(|(_, v)| **v == wire)
            .map(|(name, _)| Value::Str(name.clone()))
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnknownVariant(format!("{wire:?}"))))
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn map(inner: BoxCoder, variants: IndexMap<String, Value>) -> BoxCoder {
    Box::new(MapCoder { inner, variants })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;

    #[test]
    fn round_trips_named_variants() {
        let mut variants = IndexMap::new();
        variants.insert("red".to_string(), Value::UInt(0));
        variants.insert("green".to_string(), Value::UInt(1));

        let coder = map(Box::new(U8), variants);
        let encoded = coder.encode(&Value::Str("green".into())).unwrap();
        assert_eq!(encoded, vec![1]);
        assert_eq!(
            coder.decode(&encoded, ReaderOpts::new()).unwrap(),
            Value::Str("green".into())
        );
    }

    #[test]
    fn rejects_unknown_name_and_unknown_wire_value() {
        let mut variants = IndexMap::new();
        variants.insert("red".to_string(), Value::UInt(0));
        let coder = map(Box::new(U8), variants);
        assert!(coder.encode(&Value::Str("blue".into())).is_err());
        assert!(coder.decode(&[9], ReaderOpts::new()).is_err());
    }
}
