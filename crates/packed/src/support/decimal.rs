//! `decimal(fractionDigits, inner)`: a fixed-point decimal string
//! value, backed on the wire by an integer (`bigint`-typed) coder.

use num_bigint::{BigInt, Sign};

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

fn bigint_to_decimal_str(n: &BigInt, fraction_digits: u32) -> String {
    let fd = fraction_digits as usize;
    let digits = n.magnitude().to_str_radix(10);
    let digits = if digits.len() <= fd {
        format!("{digits:0>width$}", width = fd + 1)
    } else {
        digits
    };
    let split = digits.len() - fd;
    let (int_part, frac_part) = digits.split_at(split);
    let body = if fd == 0 {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    };
    if n.sign() == Sign::Minus {
        format!("-{body}")
    } else {
        body
    }
}

fn decimal_str_to_bigint(s: &str, fraction_digits: u32) -> Result<BigInt, ErrorKind> {
    let fd = fraction_digits as usize;
    let (neg, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, ""));
    if frac_part.len() > fd {
        return Err(ErrorKind::BadLength(format!(
            "decimal string {s:?} has more than {fraction_digits} fraction digit(s)"
        )));
    }
    let padded_frac = format!("{frac_part:0<width$}", width = fd);
    let digits = format!("{int_part}{padded_frac}");
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| ErrorKind::BadLength(format!("{s:?} is not a valid decimal string")))?;
    Ok(if neg { -magnitude } else { magnitude })
}

pub struct DecimalCoder {
    inner: BoxCoder,
    fraction_digits: u32,
}

impl Coder for DecimalCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let s = value
            .as_str()
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "decimal string",
                actual: value.type_name(),
            }))?;
        let n = decimal_str_to_bigint(s, self.fraction_digits).map_err(|k| Error::new(w.labels.clone(), k))?;
        self.inner.encode_stream(w, &Value::BigInt(n))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        let n = decoded
            .as_bigint()
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::NotANumber(decoded.type_name())))?;
        Ok(Value::Str(bigint_to_decimal_str(&n, self.fraction_digits)))
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn decimal(fraction_digits: u32, inner: BoxCoder) -> BoxCoder {
    Box::new(DecimalCoder {
        inner,
        fraction_digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::bigint;

    #[test]
    fn decodes_and_re_encodes_a_decimal_string() {
        let coder = decimal(8, bigint(8, true, false, false));
        let encoded = coder.encode(&Value::Str("6.30880845".into())).unwrap();
        assert_eq!(
            coder.decode(&encoded, ReaderOpts::new()).unwrap(),
            Value::Str("6.30880845".into())
        );
    }

    #[test]
    fn rejects_too_many_fraction_digits() {
        let coder = decimal(2, bigint(8, true, false, false));
        assert!(coder.encode(&Value::Str("1.234".into())).is_err());
    }
}
