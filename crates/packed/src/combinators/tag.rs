//! `tag(tagCoder, variants)`: a discriminated union, dispatched by a
//! raw discriminator value decoded through `tagCoder`.

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

fn tag_label(discriminator: &Value) -> String {
    match discriminator {
        Value::Str(s) => s.clone(),
        Value::UInt(u) => u.to_string(),
        Value::Int(i) => i.to_string(),
        Value::BigInt(b) => b.to_string(),
        other => format!("{other:?}"),
    }
}

pub struct TagCoder {
    tag_coder: BoxCoder,
    variants: Vec<(Value, BoxCoder)>,
}

impl TagCoder {
    fn find(&self, discriminator: &Value) -> Option<&BoxCoder> {
        self.variants
            .iter()
            .find(|(d, _)| d == discriminator)
            .map(|(_, c)| c)
    }
}

impl Coder for TagCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let (tag, data) = match value {
            Value::Tagged { tag, data } => (tag, data.as_ref()),
            other => {
                return Err(Error::new(
                    w.labels.clone(),
                    ErrorKind::WrongType {
                        expected: "tagged union",
                        actual: other.type_name(),
                    },
                ))
            }
        };
        let (discriminator, payload_coder) = self
            .variants
            .iter()
            .find(|(d, _)| &tag_label(d) == tag)
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::UnknownVariant(tag.clone())))?;
        self.tag_coder.encode_stream(w, discriminator)?;
        payload_coder.encode_stream(w, data)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let discriminator = self.tag_coder.decode_stream(r)?;
        let payload_coder = self
            .find(&discriminator)
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnknownVariant(tag_label(&discriminator))))?;
        let data = payload_coder.decode_stream(r)?;
        Ok(Value::Tagged {
            tag: tag_label(&discriminator),
            data: Box::new(data),
        })
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn tag(tag_coder: BoxCoder, variants: Vec<(Value, BoxCoder)>) -> BoxCoder {
    Box::new(TagCoder { tag_coder, variants })
}

/// Sugar combining a name↔discriminator bijection with [`TagCoder`]'s
/// per-variant dispatch: each entry carries an explicit name instead
/// of deriving one from the discriminator's textual form.
pub struct NamedTagCoder {
    tag_coder: BoxCoder,
    variants: Vec<(String, Value, BoxCoder)>,
}

impl Coder for NamedTagCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let (tag, data) = match value {
            Value::Tagged { tag, data } => (tag, data.as_ref()),
            other => {
                return Err(Error::new(
                    w.labels.clone(),
                    ErrorKind::WrongType {
                        expected: "tagged union",
                        actual: other.type_name(),
                    },
                ))
            }
        };
        let (_, discriminator, payload_coder) = self
            .variants
            .iter()
            .find(|(name, _, _)| name == tag)
            .ok_or_else(|| Error::new(w.labels.clone(), ErrorKind::UnknownVariant(tag.clone())))?;
        self.tag_coder.encode_stream(w, discriminator)?;
        payload_coder.encode_stream(w, data)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let discriminator = self.tag_coder.decode_stream(r)?;
        let (name, _, payload_coder) = self
            .variants
            .iter()
            .find(|(_, d, _)| d == &discriminator)
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::UnknownVariant(tag_label(&discriminator))))?;
        let data = payload_coder.decode_stream(r)?;
        Ok(Value::Tagged {
            tag: name.clone(),
            data: Box::new(data),
        })
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn mapped_tag(tag_coder: BoxCoder, variants: Vec<(String, Value, BoxCoder)>) -> BoxCoder {
    Box::new(NamedTagCoder { tag_coder, variants })
}
