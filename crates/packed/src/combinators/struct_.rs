//! `struct(fields)`: an ordered named-field record.

use indexmap::IndexMap;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind, PathSegment};
use crate::path::{with_segment, Frame};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct StructCoder {
    fields: Vec<(String, BoxCoder)>,
}

impl Coder for StructCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let map = value
            .as_struct()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "struct",
                actual: value.type_name(),
            }))?;

        w.frames.push(Frame::Struct(map.clone()));
        for (name, coder) in &self.fields {
            let field_value = map.get(name).cloned().unwrap_or(Value::Unit);
            let result = with_segment(&mut w.labels, PathSegment::Field(name.clone()), |_| {
                coder.encode_stream(w, &field_value)
            });
            if let Err(e) = result {
                w.frames.pop();
                return Err(e);
            }
        }
        w.frames.pop();
        Ok(())
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        r.frames.push(Frame::Struct(IndexMap::new()));
        for (name, coder) in &self.fields {
            let decoded = with_segment(&mut r.labels, PathSegment::Field(name.clone()), |_| {
                coder.decode_stream(r)
            });
            let decoded = match decoded {
                Ok(v) => v,
                Err(e) => {
                    r.frames.pop();
                    return Err(e);
                }
            };
            if let Some(Frame::Struct(m)) = r.frames.last_mut() {
                m.insert(name.clone(), decoded);
            }
        }
        let frame = r.frames.pop();
        match frame {
            Some(Frame::Struct(m)) => Ok(Value::Struct(m)),
            _ => unreachable!("struct frame pushed above"),
        }
    }

    fn size(&self) -> Option<usize> {
        self.fields.iter().try_fold(0usize, |acc, (_, c)| Some(acc + c.size()?))
    }
}

pub fn struct_coder(fields: Vec<(String, BoxCoder)>) -> BoxCoder {
    Box::new(StructCoder { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::{U16LE, U8};
    use crate::primitives::string::string;
    use crate::length::Length;

    #[test]
    fn encodes_named_fields_in_declaration_order() {
        let coder = struct_coder(vec![
            ("a".into(), Box::new(U8)),
            ("b".into(), Box::new(U16LE)),
            ("c".into(), string(Length::coder(Box::new(U8)))),
        ]);

        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), Value::UInt(31));
        fields.insert("b".to_string(), Value::UInt(12345));
        fields.insert("c".to_string(), Value::Str("hello".into()));

        let encoded = coder.encode(&Value::Struct(fields.clone())).unwrap();
        assert_eq!(
            encoded,
            vec![0x1F, 0x39, 0x30, 0x05, b'h', b'e', b'l', b'l', b'o']
        );
        assert_eq!(
            coder.decode(&encoded, ReaderOpts::new()).unwrap(),
            Value::Struct(fields)
        );
    }

    #[test]
    fn fixed_size_is_sum_of_children() {
        let coder = struct_coder(vec![("a".into(), Box::new(U8)), ("b".into(), Box::new(U16LE))]);
        assert_eq!(coder.size(), Some(3));
    }
}
