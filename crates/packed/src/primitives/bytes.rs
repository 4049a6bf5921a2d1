//! The `bytes(length)` primitive, dispatching on the length
//! specifier's form, and the specialization it underlies
//! (`string`/`hex` wrap this with a value-level transform).

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::length::Length;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub struct BytesCoder {
    pub length: Length,
    /// When set, the whole payload is byte-reversed on the wire, for
    /// little-endian framing of a byte string.
    pub reverse: bool,
}

impl Coder for BytesCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let bytes = value
            .as_bytes()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "bytes",
                actual: value.type_name(),
            }))?;

        let mut payload = bytes.to_vec();
        if self.reverse {
            payload.reverse();
        }

        match &self.length {
            Length::Terminator(pattern) => {
                if find_subslice(&payload, pattern).is_some() {
                    return Err(Error::new(w.labels.clone(), ErrorKind::TerminatorCollision));
                }
                w.bytes(&payload)?;
                w.bytes(pattern)
            }
            Length::Unbounded => w.bytes(&payload),
            other => {
                other.write_count(w, payload.len() as u64)?;
                w.bytes(&payload)
            }
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let mut payload = match &self.length {
            Length::Terminator(pattern) => {
                let start = r.local_pos();
                let pos = r
                    .find(pattern)?
                    .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnexpectedEof))?;
                let data = r.bytes(pos - start, false)?.to_vec();
                r.bytes(pattern.len(), false)?;
                data
            }
            Length::Unbounded => {
                let n = r.remaining();
                r.bytes(n, false)?.to_vec()
            }
            other => {
                let n = other.read_count(r)?;
                r.bytes(n as usize, false)?.to_vec()
            }
        };

        if self.reverse {
            payload.reverse();
        }
        Ok(Value::Bytes(payload))
    }

    fn size(&self) -> Option<usize> {
        match &self.length {
            Length::Fixed(n) => Some(*n as usize),
            _ => None,
        }
    }
}

pub fn bytes(length: Length) -> BoxCoder {
    Box::new(BytesCoder {
        length,
        reverse: false,
    })
}

pub fn bytes_le(length: Length) -> BoxCoder {
    Box::new(BytesCoder {
        length,
        reverse: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;

    #[test]
    fn fixed_length_round_trips() {
        let coder = bytes(Length::fixed(3));
        let bytes_val = Value::Bytes(vec![1, 2, 3]);
        let encoded = coder.encode(&bytes_val).unwrap();
        assert_eq!(encoded, vec![1, 2, 3]);
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), bytes_val);
    }

    #[test]
    fn terminator_length_includes_sentinel_on_wire() {
        let coder = bytes(Length::terminator(vec![0x00]));
        let encoded = coder.encode(&Value::Bytes(vec![1, 2, 3])).unwrap();
        assert_eq!(encoded, vec![1, 2, 3, 0]);
    }

    #[test]
    fn terminator_collision_is_rejected() {
        let coder = bytes(Length::terminator(vec![0x00]));
        assert!(coder.encode(&Value::Bytes(vec![1, 0, 3])).is_err());
    }

    #[test]
    fn unbounded_consumes_to_end() {
        let coder = bytes(Length::unbounded());
        assert_eq!(
            coder.decode(&[1, 2, 3], ReaderOpts::new()).unwrap(),
            Value::Bytes(vec![1, 2, 3])
        );
    }
}
