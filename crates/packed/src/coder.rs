//! The uniform coder contract every primitive and combinator
//! implements.

use crate::error::Error;
use crate::opts::ReaderOpts;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// A coder over [`Value`]: the pair of `encode_stream`/`decode_stream`
/// operations, plus an optional fixed `size`.
///
/// Coders are composed as trait objects (`Box<dyn Coder>`), since a
/// `struct`'s fields are each polymorphic over their own value shape;
/// this is the "trait object with the two methods" option the design
/// notes describe as an alternative to a closed sum type. `Coder`
/// requires `Send + Sync` so that, once built (and any `lazy` thunks
/// resolved), a coder graph can be shared across threads — each
/// concurrent `encode`/`decode` call still owns its own
/// [`Reader`]/[`Writer`].
pub trait Coder: Send + Sync {
    /// Encodes `value` into `w`.
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error>;

    /// Decodes a value from `r`.
    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error>;

    /// The number of bytes this coder always consumes/produces, if
    /// compile-time-known and constant across all values.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Buffer-in/buffer-out convenience wrapping `encode_stream`.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut w = Writer::new();
        self.encode_stream(&mut w, value)?;
        w.finish()
    }

    /// Buffer-in/buffer-out convenience wrapping `decode_stream`,
    /// enforcing the end-of-buffer check via [`Reader::finish`].
    fn decode(&self, data: &[u8], opts: ReaderOpts) -> Result<Value, Error> {
        let mut r = Reader::new(data, opts);
        let value = self.decode_stream(&mut r)?;
        r.finish()?;
        Ok(value)
    }
}

pub type BoxCoder = Box<dyn Coder>;

/// Lifts a type implementing [`Coder`] into the boxed trait-object
/// form every combinator stores its children as.
pub fn wrap<C: Coder + 'static>(coder: C) -> BoxCoder {
    Box::new(coder)
}

/// Free-function form of [`Coder::encode`], matching the public
/// interface table's `encode(coder, value) -> bytes`.
pub fn encode(coder: &dyn Coder, value: &Value) -> Result<Vec<u8>, Error> {
    coder.encode(value)
}

/// Free-function form of [`Coder::decode`], matching the public
/// interface table's `decode(coder, bytes, opts?) -> value`.
pub fn decode(coder: &dyn Coder, data: &[u8], opts: ReaderOpts) -> Result<Value, Error> {
    coder.decode(data, opts)
}
