//! `enumName(inner, variants)`: an ordinal, wire-coded by `inner`,
//! exposed at the value level as its symbolic name.

use indexmap::IndexMap;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct EnumNameCoder {
    inner: BoxCoder,
    variants: IndexMap<String, Value>,
}

impl Coder for EnumNameCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let name = value
            .as_str()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "enum name",
                actual: value.type_name(),
            }))?;
        let ordinal = self
            .variants
            .get(name)
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::UnknownVariant(name.to_string())))?;
        self.inner.encode_stream(w, ordinal)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let ordinal = self.inner.decode_stream(r)?;
        let name = self
            .variants
            .iter()
            .find(|(_, v)| **v == ordinal)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnknownVariant(format!("{ordinal:?}"))))?;
        Ok(Value::Str(name))
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

/// `variants` pairs each symbolic name with its wire-coded ordinal
/// value, in declaration order.
pub fn enum_name(inner: BoxCoder, variants: Vec<(String, Value)>) -> BoxCoder {
    Box::new(EnumNameCoder {
        inner,
        variants: variants.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;

    fn color_coder() -> BoxCoder {
        enum_name(
            Box::new(U8),
            vec![
                ("red".to_string(), Value::UInt(0)),
                ("green".to_string(), Value::UInt(1)),
                ("blue".to_string(), Value::UInt(2)),
            ],
        )
    }

    #[test]
    fn round_trips_name_to_ordinal() {
        let coder = color_coder();
        let encoded = coder.encode(&Value::Str("green".into())).unwrap();
        assert_eq!(encoded, vec![1]);
        assert_eq!(
            coder.decode(&encoded, ReaderOpts::new()).unwrap(),
            Value::Str("green".into())
        );
    }

    #[test]
    fn rejects_unknown_name_and_ordinal() {
        let coder = color_coder();
        assert!(coder.encode(&Value::Str("purple".into())).is_err());
        assert!(coder.decode(&[9], ReaderOpts::new()).is_err());
    }
}
