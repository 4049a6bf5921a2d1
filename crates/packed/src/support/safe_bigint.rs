//! `safeBigInt(inner)`: a value-level transform between a
//! `bigint`-backed wire coder and a machine integer, rejecting
//! magnitudes outside JavaScript's safe-integer range (so that a port
//! of a format originally expressed with `Number`-typed fields keeps
//! its original bounds even though this crate's `Value::Int`/`UInt`
//! could otherwise hold more).

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// `2^53 - 1`, the largest integer magnitude a JS `Number` represents
/// exactly.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

fn check_safe(n: &BigInt) -> Result<(), ErrorKind> {
    let max = BigInt::from(MAX_SAFE_INTEGER);
    if n.magnitude() > max.magnitude() {
        return Err(ErrorKind::IntOutOfRange {
            value: n.to_string(),
            width: 53,
            sign: if n.sign() == Sign::Minus { "signed" } else { "unsigned" },
        });
    }
    Ok(())
}

pub struct SafeBigIntCoder {
    inner: BoxCoder,
}

impl Coder for SafeBigIntCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let n = value
            .as_bigint()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::NotANumber(value.type_name())))?;
        check_safe(&n).map_err(|k| Error::new(w.labels.clone(), k))?;
        self.inner.encode_stream(w, &Value::BigInt(n))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        let n = decoded
            .as_bigint()
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::NotANumber(decoded.type_name())))?;
        check_safe(&n).map_err(|k| Error::new(r.labels.clone(), k))?;
        Ok(if n.sign() == Sign::Minus {
            Value::Int(n.to_i64().expect("checked by check_safe"))
        } else {
            Value::UInt(n.to_u64().expect("checked by check_safe"))
        })
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn safe_bigint(inner: BoxCoder) -> BoxCoder {
    Box::new(SafeBigIntCoder { inner })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U64LE;

    #[test]
    fn round_trips_values_within_safe_range() {
        let coder = safe_bigint(Box::new(U64LE));
        let encoded = coder.encode(&Value::UInt(42)).unwrap();
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), Value::UInt(42));
    }

    #[test]
    fn rejects_magnitudes_beyond_max_safe_integer() {
        let coder = safe_bigint(Box::new(U64LE));
        let too_big = Value::BigInt(BigInt::from(MAX_SAFE_INTEGER) + BigInt::from(1));
        assert!(coder.encode(&too_big).is_err());
    }
}
