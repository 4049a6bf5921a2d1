//! `validate(inner, fn)`: enforces a value-domain constraint on both
//! encode and decode.

use std::sync::Arc;

use crate::coder::{BoxCoder, Coder};
use crate::error::Error;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub type Validator = Arc<dyn Fn(&Value) -> Result<(), Error> + Send + Sync>;

pub struct ValidateCoder {
    inner: BoxCoder,
    validator: Validator,
}

impl Coder for ValidateCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        (self.validator)(value)?;
        self.inner.encode_stream(w, value)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let decoded = self.inner.decode_stream(r)?;
        (self.validator)(&decoded)?;
        Ok(decoded)
    }

    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

pub fn validate(inner: BoxCoder, validator: Validator) -> BoxCoder {
    Box::new(ValidateCoder { inner, validator })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;

    #[test]
    fn rejects_values_outside_the_validator_domain() {
        let coder = validate(
            Box::new(U8),
            Arc::new(|v: &Value| {
                if v.as_length().map(|n| n <= 100).unwrap_or(false) {
                    Ok(())
                } else {
                    Err(Error::bare(ErrorKind::Validation("must be <= 100".into())))
                }
            }),
        );
        assert!(coder.encode(&Value::UInt(50)).is_ok());
        assert!(coder.encode(&Value::UInt(200)).is_err());
        assert!(coder.decode(&[200], ReaderOpts::new()).is_err());
    }
}
