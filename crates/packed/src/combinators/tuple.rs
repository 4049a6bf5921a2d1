//! `tuple(fields)`: a positional record, the unnamed sibling of
//! `struct`.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind, PathSegment};
use crate::path::{with_segment, Frame};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct TupleCoder {
    fields: Vec<BoxCoder>,
}

impl Coder for TupleCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "tuple",
                actual: value.type_name(),
            }))?;
        if items.len() != self.fields.len() {
            return Err(Error::new(
                w.labels.clone(),
                ErrorKind::LengthMismatch {
                    expected: self.fields.len() as u64,
                    actual: items.len() as u64,
                },
            ));
        }

        w.frames.push(Frame::Seq(items.to_vec()));
        for (i, (coder, item)) in self.fields.iter().zip(items).enumerate() {
            let result = with_segment(&mut w.labels, PathSegment::Index(i), |_| {
                coder.encode_stream(w, item)
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
        r.frames.push(Frame::Seq(Vec::new()));
        for (i, coder) in self.fields.iter().enumerate() {
            let decoded = with_segment(&mut r.labels, PathSegment::Index(i), |_| {
                coder.decode_stream(r)
            });
            let decoded = match decoded {
                Ok(v) => v,
                Err(e) => {
                    r.frames.pop();
                    return Err(e);
                }
            };
            if let Some(Frame::Seq(s)) = r.frames.last_mut() {
                s.push(decoded);
            }
        }
        let frame = r.frames.pop();
        match frame {
            Some(Frame::Seq(s)) => Ok(Value::Array(s)),
            _ => unreachable!("seq frame pushed above"),
        }
    }

    fn size(&self) -> Option<usize> {
        self.fields.iter().try_fold(0usize, |acc, c| Some(acc + c.size()?))
    }
}

pub fn tuple_coder(fields: Vec<BoxCoder>) -> BoxCoder {
    Box::new(TupleCoder { fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;

    #[test]
    fn round_trips_positional_fields() {
        let coder = tuple_coder(vec![Box::new(U8), Box::new(U8)]);
        let value = Value::Array(vec![Value::UInt(1), Value::UInt(2)]);
        let encoded = coder.encode(&value).unwrap();
        assert_eq!(encoded, vec![1, 2]);
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), value);
    }

    #[test]
    fn rejects_wrong_arity() {
        let coder = tuple_coder(vec![Box::new(U8), Box::new(U8)]);
        assert!(coder.encode(&Value::Array(vec![Value::UInt(1)])).is_err());
    }
}
