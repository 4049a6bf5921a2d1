//! Arbitrary- and fixed-precision integer coders.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

fn range_check(n: &BigInt, width: usize, signed: bool) -> Result<(), ErrorKind> {
    let bits = width as u32 * 8;
    let (lo, hi) = if signed {
        let half = BigInt::from(1) << (bits - 1);
        (-half.clone(), half - BigInt::from(1))
    } else {
        (BigInt::zero(), (BigInt::from(1) << bits) - BigInt::from(1))
    };
    if *n < lo || *n > hi {
        return Err(ErrorKind::IntOutOfRange {
            value: n.to_string(),
            width,
            sign: if signed { "signed" } else { "unsigned" },
        });
    }
    Ok(())
}

fn to_fixed_bytes(n: &BigInt, width: usize, little_endian: bool, signed: bool) -> Result<Vec<u8>, ErrorKind> {
    range_check(n, width, signed)?;

    let magnitude = if n.sign() == Sign::Minus {
        let modulus = BigInt::from(1) << (width as u32 * 8);
        (modulus + n)
            .to_biguint()
            .ok_or_else(|| ErrorKind::IntOutOfRange {
                value: n.to_string(),
                width,
                sign: "signed",
            })?
    } else {
        n.magnitude().clone()
    };

    let be = magnitude.to_bytes_be();
    if be.len() > width {
        return Err(ErrorKind::IntOutOfRange {
            value: n.to_string(),
            width,
            sign: if signed { "signed" } else { "unsigned" },
        });
    }

    let mut buf = vec![0u8; width];
    buf[width - be.len()..].copy_from_slice(&be);
    if little_endian {
        buf.reverse();
    }
    Ok(buf)
}

fn from_fixed_bytes(buf: &[u8], little_endian: bool, signed: bool) -> BigInt {
    let mut be = buf.to_vec();
    if little_endian {
        be.reverse();
    }
    let unsigned = BigUint::from_bytes_be(&be);
    let value = BigInt::from(unsigned);

    if signed {
        let bits = buf.len() as u32 * 8;
        let half = BigInt::from(1) << (bits - 1);
        if value >= half {
            value - (BigInt::from(1) << bits)
        } else {
            value
        }
    } else {
        value
    }
}

fn minimal_unsigned_be(magnitude: &BigUint) -> Vec<u8> {
    if magnitude.is_zero() {
        Vec::new()
    } else {
        magnitude.to_bytes_be()
    }
}

fn minimal_signed_be(n: &BigInt) -> Result<Vec<u8>, ErrorKind> {
    if n.is_zero() {
        return Ok(Vec::new());
    }
    let mut width = 1usize;
    loop {
        if range_check(n, width, true).is_ok() {
            return to_fixed_bytes(n, width, false, true);
        }
        width += 1;
        if width > 64 {
            return Err(ErrorKind::IntOutOfRange {
                value: n.to_string(),
                width,
                sign: "signed",
            });
        }
    }
}

/// An arbitrary-precision integer coder. `sized` pins the wire width
/// to exactly `size_bytes` (two's-complement for signed values);
/// unsized mode emits/reads the minimal byte representation (no
/// fixed `size()`), meant to be framed externally by a `prefix` or
/// `bytes(length)` wrapper — decode consumes whatever bytes its
/// [`Reader`] has remaining, matching an `unbounded` length contract.
#[derive(Debug, Clone, Copy)]
pub struct BigIntCoder {
    pub size_bytes: usize,
    pub little_endian: bool,
    pub signed: bool,
    pub sized: bool,
}

impl Coder for BigIntCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let n = value
            .as_bigint()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::NotANumber(value.type_name())))?;

        if self.sized {
            let bytes = to_fixed_bytes(&n, self.size_bytes, self.little_endian, self.signed)
                .map_err(|k| Error::new(w.labels.clone(), k))?;
            w.bytes(&bytes)
        } else {
            range_check(&n, self.size_bytes, self.signed)
                .map_err(|k| Error::new(w.labels.clone(), k))?;
            let mut bytes = if self.signed {
                minimal_signed_be(&n).map_err(|k| Error::new(w.labels.clone(), k))?
            } else {
                minimal_unsigned_be(n.magnitude())
            };
            if self.little_endian {
                bytes.reverse();
            }
            w.bytes(&bytes)
        }
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let bytes = if self.sized {
            r.bytes(self.size_bytes, false)?.to_vec()
        } else {
            let n = r.remaining();
            r.bytes(n, false)?.to_vec()
        };
        Ok(Value::BigInt(from_fixed_bytes(
            &bytes,
            self.little_endian,
            self.signed,
        )))
    }

    fn size(&self) -> Option<usize> {
        self.sized.then_some(self.size_bytes)
    }
}

/// Constructs a [`BigIntCoder`], boxed as a [`BoxCoder`].
pub fn bigint(size_bytes: usize, little_endian: bool, signed: bool, sized: bool) -> BoxCoder {
    Box::new(BigIntCoder {
        size_bytes,
        little_endian,
        signed,
        sized,
    })
}

/// A fixed-width, machine-integer-typed coder (`Value::Int`/`Value::UInt`)
/// wrapping [`BigIntCoder`]. Restricted to `size_bytes <= 6` so the
/// decoded magnitude always fits comfortably inside an `i64`/`u64`.
#[derive(Debug, Clone, Copy)]
pub struct IntCoder {
    inner: BigIntCoder,
}

impl IntCoder {
    pub fn new(size_bytes: usize, little_endian: bool, signed: bool) -> Result<Self, Error> {
        if size_bytes > 6 {
            return Err(Error::bare(ErrorKind::UnsafeIntWidth(size_bytes)));
        }
        Ok(Self {
            inner: BigIntCoder {
                size_bytes,
                little_endian,
                signed,
                sized: true,
            },
        })
    }
}

impl Coder for IntCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let as_bigint = match value {
            Value::Int(i) => BigInt::from(*i),
            Value::UInt(u) => BigInt::from(*u),
            Value::BigInt(b) => b.clone(),
            other => {
                return Err(Error::new(
                    w.labels.clone(),
                    ErrorKind::NotANumber(other.type_name()),
                ))
            }
        };
        self.inner.encode_stream(w, &Value::BigInt(as_bigint))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        let big = match &decoded {
            Value::BigInt(b) => b,
            _ => unreachable!("BigIntCoder always decodes to Value::BigInt"),
        };
        if self.inner.signed {
            Ok(Value::Int(
                num_traits::ToPrimitive::to_i64(big).expect("checked by IntCoder::new width cap"),
            ))
        } else {
            Ok(Value::UInt(
                num_traits::ToPrimitive::to_u64(big).expect("checked by IntCoder::new width cap"),
            ))
        }
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

/// Constructs an [`IntCoder`], boxed as a [`BoxCoder`]. Panics-free:
/// returns an error for `size_bytes > 6` instead of the JS
/// reference's implicit precision loss.
pub fn int(size_bytes: usize, little_endian: bool, signed: bool) -> Result<BoxCoder, Error> {
    Ok(Box::new(IntCoder::new(size_bytes, little_endian, signed)?))
}

macro_rules! int_alias {
    ($name:ident, $bytes:expr, $le:expr, $signed:expr) => {
        #[allow(non_upper_case_globals)]
        pub const $name: IntCoder = IntCoder {
            inner: BigIntCoder {
                size_bytes: $bytes,
                little_endian: $le,
                signed: $signed,
                sized: true,
            },
        };
    };
}

macro_rules! bigint_alias {
    ($name:ident, $bytes:expr, $le:expr, $signed:expr) => {
        #[allow(non_upper_case_globals)]
        pub const $name: BigIntCoder = BigIntCoder {
            size_bytes: $bytes,
            little_endian: $le,
            signed: $signed,
            sized: true,
        };
    };
}

int_alias!(U8, 1, false, false);
int_alias!(I8, 1, false, true);
int_alias!(U16LE, 2, true, false);
int_alias!(U16BE, 2, false, false);
int_alias!(I16LE, 2, true, true);
int_alias!(I16BE, 2, false, true);
int_alias!(U32LE, 4, true, false);
int_alias!(U32BE, 4, false, false);
int_alias!(I32LE, 4, true, true);
int_alias!(I32BE, 4, false, true);
int_alias!(U48LE, 6, true, false);
int_alias!(U48BE, 6, false, false);
int_alias!(I48LE, 6, true, true);
int_alias!(I48BE, 6, false, true);

bigint_alias!(U64LE, 8, true, false);
bigint_alias!(U64BE, 8, false, false);
bigint_alias!(I64LE, 8, true, true);
bigint_alias!(I64BE, 8, false, true);
bigint_alias!(U128LE, 16, true, false);
bigint_alias!(U128BE, 16, false, false);
bigint_alias!(I128LE, 16, true, true);
bigint_alias!(I128BE, 16, false, true);
bigint_alias!(U256LE, 32, true, false);
bigint_alias!(U256BE, 32, false, false);
bigint_alias!(I256LE, 32, true, true);
bigint_alias!(I256BE, 32, false, true);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;

    #[test]
    fn u32be_encodes_big_endian() {
        let bytes = U32BE.encode(&Value::BigInt(BigInt::from(123123123u64))).unwrap();
        assert_eq!(bytes, vec![0x07, 0x56, 0xB5, 0xB3]);
    }

    #[test]
    fn u32le_encodes_little_endian() {
        let bytes = U32LE.encode(&Value::BigInt(BigInt::from(123123123u64))).unwrap();
        assert_eq!(bytes, vec![0xB3, 0xB5, 0x56, 0x07]);
    }

    #[test]
    fn u64le_max_round_trips() {
        let max = BigInt::from(u64::MAX);
        let bytes = U64LE.encode(&Value::BigInt(max.clone())).unwrap();
        assert_eq!(bytes, vec![0xFF; 8]);
        let decoded = U64LE.decode(&bytes, ReaderOpts::new()).unwrap();
        assert_eq!(decoded, Value::BigInt(max));
    }

    #[test]
    fn u64le_overflow_errors() {
        let overflow = BigInt::from(u64::MAX) + BigInt::from(1);
        assert!(U64LE.encode(&Value::BigInt(overflow)).is_err());
    }

    #[test]
    fn int_rejects_wide_widths() {
        assert!(IntCoder::new(7, true, false).is_err());
        assert!(IntCoder::new(6, true, false).is_ok());
    }

    #[test]
    fn u8_round_trips_via_int_coder() {
        let bytes = U8.encode(&Value::UInt(31)).unwrap();
        assert_eq!(bytes, vec![31]);
        assert_eq!(U8.decode(&bytes, ReaderOpts::new()).unwrap(), Value::UInt(31));
    }
}
