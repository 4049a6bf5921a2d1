//! The `bits(n)` primitive: an `n`-bit unsigned field read/written via
//! the Reader/Writer bit sub-cursor.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

#[derive(Debug, Clone, Copy)]
pub struct BitsCoder {
    pub width: u32,
}

impl Coder for BitsCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let n = value
            .as_length()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::NotANumber(value.type_name())))?;
        if n > u32::MAX as u64 {
            return Err(Error::new(
                w.labels.clone(),
                ErrorKind::BadLength(format!("{n} does not fit in a {}-bit field", self.width)),
            ));
        }
        w.write_bits(n as u32, self.width)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        Ok(Value::UInt(r.bits(self.width)? as u64))
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

/// Constructs a `bits(n)` coder, `1 <= n <= 32`.
pub fn bits(width: u32) -> Result<BoxCoder, Error> {
    if width == 0 || width > 32 {
        return Err(Error::bare(ErrorKind::BitWidth(width)));
    }
    Ok(Box::new(BitsCoder { width }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::struct_::struct_coder;
    use crate::opts::ReaderOpts;

    #[test]
    fn packs_struct_bit_fields_into_single_byte() {
        let coder = struct_coder(vec![
            ("f".into(), bits(5).unwrap()),
            ("f1".into(), bits(1).unwrap()),
            ("f2".into(), bits(1).unwrap()),
            ("f3".into(), bits(1).unwrap()),
        ]);

        let mut value = indexmap::IndexMap::new();
        value.insert("f".to_string(), Value::UInt(1));
        value.insert("f1".to_string(), Value::UInt(0));
        value.insert("f2".to_string(), Value::UInt(1));
        value.insert("f3".to_string(), Value::UInt(0));

        let bytes = coder.encode(&Value::Struct(value.clone())).unwrap();
        assert_eq!(bytes, vec![0x0A]);
        assert_eq!(
            coder.decode(&bytes, ReaderOpts::new()).unwrap(),
            Value::Struct(value)
        );
    }
}
