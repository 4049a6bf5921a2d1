//! `string(length)`: `bytes(length)` composed with a UTF-8 transform.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::length::Length;
use crate::primitives::bytes::BytesCoder;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct StringCoder {
    inner: BytesCoder,
}

impl Coder for StringCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let s = value
            .as_str()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "string",
                actual: value.type_name(),
            }))?;
        self.inner
            .encode_stream(w, &Value::Bytes(s.as_bytes().to_vec()))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        let bytes = decoded
            .as_bytes()
            .expect("BytesCoder always decodes to Value::Bytes")
            .to_vec();
        let s = String::from_utf8(bytes)
            .map_err(|e| Error::new(r.labels.clone(), ErrorKind::Io(e.to_string())))?;
        Ok(Value::Str(s))
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn string(length: Length) -> BoxCoder {
    Box::new(StringCoder {
        inner: BytesCoder {
            length,
            reverse: false,
        },
    })
}

/// A NUL-terminated string.
pub fn cstring() -> BoxCoder {
    string(Length::terminator(vec![0u8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;

    #[test]
    fn string_with_u8_length_prefix() {
        let coder = string(Length::coder(Box::new(U8)));
        let encoded = coder.encode(&Value::Str("hello".into())).unwrap();
        assert_eq!(encoded, vec![0x05, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn cstring_early_terminator_leaves_trailing_bytes_unconsumed() {
        let coder = cstring();
        // "te" + NUL + "st": the coder alone stops at the NUL, but a
        // top-level decode() demanding full consumption must fail.
        let data = b"te\x00st";
        assert!(coder.decode(data, ReaderOpts::new()).is_err());
    }
}
