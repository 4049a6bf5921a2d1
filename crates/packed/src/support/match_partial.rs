//! `matchCoders(coders)`: tries each candidate coder in order, using
//! the first whose encode or decode succeeds. Useful for untagged
//! unions where no discriminator byte exists on the wire.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct MatchCoder {
    coders: Vec<BoxCoder>,
}

impl Coder for MatchCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let mut last_err = None;
        for candidate in &self.coders {
            let mut probe = Writer::new();
            probe.labels = w.labels.clone();
            match candidate.encode_stream(&mut probe, value) {
                Ok(()) => {
                    let bytes = probe.finish()?;
                    return w.bytes(&bytes);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            Error::new(w.labels.clone(), ErrorKind::WrongType {
                expected: "a value accepted by one of the candidate coders",
                actual: value.type_name(),
            })
        }))
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let mut last_err = None;
        for candidate in &self.coders {
            let mut attempt = r.offset_reader(r.local_pos())?;
            match candidate.decode_stream(&mut attempt) {
                Ok(value) => {
                    let consumed = attempt.local_pos();
                    r.bytes(consumed, false)?;
                    return Ok(value);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnexpectedEof)))
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn match_coders(coders: Vec<BoxCoder>) -> BoxCoder {
    Box::new(MatchCoder { coders })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::{U16BE, U8};
    use crate::primitives::string::cstring;

    #[test]
    fn falls_through_to_the_first_coder_that_accepts_the_value() {
        let coder = match_coders(vec![Box::new(U8), Box::new(U16BE)]);
        let encoded = coder.encode(&Value::UInt(7)).unwrap();
        assert_eq!(encoded, vec![7]);
    }

    #[test]
    fn decode_tries_candidates_in_order_and_advances_by_the_winner() {
        let coder = match_coders(vec![cstring(), Box::new(U8)]);
        let data = b"hi\0".to_vec();
        assert_eq!(
            coder.decode(&data, ReaderOpts::new()).unwrap(),
            Value::Str("hi".into())
        );
    }

    #[test]
    fn errors_when_no_candidate_accepts_the_input() {
        let coder = match_coders(vec![Box::new(U8)]);
        assert!(coder.encode(&Value::Str("nope".into())).is_err());
    }
}
