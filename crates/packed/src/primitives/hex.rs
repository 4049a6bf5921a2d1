//! `hex(length)`: `bytes(length)` composed with an ASCII-hex transform,
//! with an optional `0x` prefix.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::length::Length;
use crate::primitives::bytes::BytesCoder;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct HexCoder {
    inner: BytesCoder,
    prefix_0x: bool,
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn from_hex(s: &str) -> Result<Vec<u8>, ErrorKind> {
    if s.len() % 2 != 0 {
        return Err(ErrorKind::BadLength("hex string has odd length".into()));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| ErrorKind::BadLength(format!("invalid hex digit pair {:?}", &s[i..i + 2])))
        })
        .collect()
}

impl Coder for HexCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let s = value
            .as_str()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "hex string",
                actual: value.type_name(),
            }))?;
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = from_hex(stripped).map_err(|k| Error::new(w.labels.clone(), k))?;
        self.inner.encode_stream(w, &Value::Bytes(bytes))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        let bytes = decoded.as_bytes().expect("BytesCoder always decodes to Value::Bytes");
        let hex = to_hex(bytes);
        Ok(Value::Str(if self.prefix_0x {
            format!("0x{hex}")
        } else {
            hex
        }))
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn hex(length: Length, prefix_0x: bool) -> BoxCoder {
    Box::new(HexCoder {
        inner: BytesCoder {
            length,
            reverse: false,
        },
        prefix_0x,
    })
}
