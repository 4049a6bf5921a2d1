//! `array(length, inner)`: a homogeneous sequence, length-specifier
//! driven.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind, PathSegment};
use crate::length::Length;
use crate::path::{with_segment, Frame};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct ArrayCoder {
    length: Length,
    inner: BoxCoder,
}

impl Coder for ArrayCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "array",
                actual: value.type_name(),
            }))?;

        match &self.length {
            Length::Terminator(pattern) => {
                w.frames.push(Frame::Seq(items.to_vec()));
                for (i, item) in items.iter().enumerate() {
                    let mut probe = Writer::new();
                    let encoded_elem = with_segment(&mut w.labels, PathSegment::Index(i), |labels| {
                        probe.labels = labels.clone();
                        self.inner.encode_stream(&mut probe, item)
                    });
                    if let Err(e) = encoded_elem {
                        w.frames.pop();
                        return Err(e);
                    }
                    let elem_bytes = match probe.finish() {
                        Ok(b) => b,
                        Err(e) => {
                            w.frames.pop();
                            return Err(e);
                        }
                    };
                    if packed_utils::is_bytes(&elem_bytes, 0, pattern) {
                        w.frames.pop();
                        return Err(Error::new(w.labels.clone(), ErrorKind::TerminatorCollision));
                    }
                    if let Err(e) = w.bytes(&elem_bytes) {
                        w.frames.pop();
                        return Err(e);
                    }
                }
                w.frames.pop();
                w.bytes(pattern)
            }
            other => {
                other.write_count(w, items.len() as u64)?;
                w.frames.push(Frame::Seq(items.to_vec()));
                for (i, item) in items.iter().enumerate() {
                    let result = with_segment(&mut w.labels, PathSegment::Index(i), |_| {
                        self.inner.encode_stream(w, item)
                    });
                    if let Err(e) = result {
                        w.frames.pop();
                        return Err(e);
                    }
                }
                w.frames.pop();
                Ok(())
            }
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        r.frames.push(Frame::Seq(Vec::new()));
        let result = (|| -> Result<(), Error> {
            match &self.length {
                Length::Terminator(pattern) => loop {
                    if r.bytes(pattern.len(), true).ok() == Some(&pattern[..]) {
                        r.bytes(pattern.len(), false)?;
                        break;
                    }
                    let idx = match r.frames.last() {
                        Some(Frame::Seq(s)) => s.len(),
                        _ => unreachable!(),
                    };
                    let decoded = with_segment(&mut r.labels, PathSegment::Index(idx), |_| {
                        self.inner.decode_stream(r)
                    })?;
                    if let Some(Frame::Seq(s)) = r.frames.last_mut() {
                        s.push(decoded);
                    }
                },
                Length::Unbounded => loop {
                    if r.remaining() == 0 {
                        break;
                    }
                    if let Some(s) = self.inner.size() {
                        if r.remaining() < s {
                            break;
                        }
                    }
                    let idx = match r.frames.last() {
                        Some(Frame::Seq(s)) => s.len(),
                        _ => unreachable!(),
                    };
                    let decoded = with_segment(&mut r.labels, PathSegment::Index(idx), |_| {
                        self.inner.decode_stream(r)
                    })?;
                    if let Some(Frame::Seq(s)) = r.frames.last_mut() {
                        s.push(decoded);
                    }
                },
                other => {
                    let count = other.read_count(r)?;
                    for i in 0..count {
                        let decoded = with_segment(&mut r.labels, PathSegment::Index(i as usize), |_| {
                            self.inner.decode_stream(r)
                        })?;
                        if let Some(Frame::Seq(s)) = r.frames.last_mut() {
                            s.push(decoded);
                        }
                    }
                }
            }
            Ok(())
        })();

        let frame = r.frames.pop();
        result?;
        match frame {
            Some(Frame::Seq(s)) => Ok(Value::Array(s)),
            _ => unreachable!("seq frame pushed above"),
        }
    }

    fn size(&self) -> Option<usize> {
        match &self.length {
            Length::Fixed(n) => self.inner.size().map(|s| s * *n as usize),
            _ => None,
        }
    }
}

pub fn array(length: Length, inner: BoxCoder) -> BoxCoder {
    Box::new(ArrayCoder { length, inner })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::{U16LE, U8};

    #[test]
    fn terminator_array_includes_sentinel() {
        let coder = array(Length::terminator(vec![0x00]), Box::new(U16LE));
        let value = Value::Array(vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]);
        let encoded = coder.encode(&value).unwrap();
        assert_eq!(encoded, vec![1, 0, 2, 0, 3, 0, 0]);
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), value);
    }

    #[test]
    fn terminator_array_rejects_colliding_element() {
        let coder = array(Length::terminator(vec![0x00]), Box::new(U16LE));
        let value = Value::Array(vec![Value::UInt(0), Value::UInt(1), Value::UInt(2)]);
        assert!(coder.encode(&value).is_err());
    }

    #[test]
    fn fixed_length_array_round_trips() {
        let coder = array(Length::coder(Box::new(U8)), Box::new(U8));
        let value = Value::Array(vec![Value::UInt(3), Value::UInt(4)]);
        let encoded = coder.encode(&value).unwrap();
        assert_eq!(encoded, vec![2, 3, 4]);
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), value);
    }
}
