//! `pointer(placeholderCoder, inner, sized)`: a forward reference,
//! resolved at encode-finalization via [`Writer`]'s deferred-pointer
//! list and at decode time via [`Reader::offset_reader`] plus the
//! read-bitset's at-most-once tracking.

use std::sync::Arc;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub struct PointerCoder {
    placeholder_coder: Arc<dyn Coder>,
    placeholder_size: usize,
    inner: BoxCoder,
    /// Reserved for a future self-delimiting pointer variant; the
    /// specification names this parameter but never describes its
    /// behavior, so it is currently a no-op.
    #[allow(dead_code)]
    sized: bool,
}

impl Coder for PointerCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let placeholder_offset = w.reserve_placeholder(self.placeholder_size)?;

        let mut standalone = Writer::new();
        standalone.labels = w.labels.clone();
        self.inner.encode_stream(&mut standalone, value)?;
        let pointee = standalone.finish()?;

        w.defer_pointer(
            placeholder_offset,
            self.placeholder_size,
            Arc::clone(&self.placeholder_coder),
            pointee,
        );
        Ok(())
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let pointer_value = self.placeholder_coder.decode_stream(r)?;
        let offset = pointer_value
            .as_length()
            .ok_or_else(|| Error::new(r.labels.clone(), ErrorKind::BadLength(format!("{pointer_value:?}"))))?;

        log::trace!("following pointer to offset {offset:#x}");
        r.enable_ptr();
        let mut sub = r.offset_reader(offset as usize)?;
        self.inner.decode_stream(&mut sub)
    }

    fn size(&self) -> Option<usize> {
        Some(self.placeholder_size)
    }
}

pub fn pointer(placeholder_coder: BoxCoder, inner: BoxCoder, sized: bool) -> Result<BoxCoder, Error> {
    let placeholder_size = placeholder_coder
        .size()
        .ok_or_else(|| Error::bare(ErrorKind::PointerPlaceholderUnsized))?;
    Ok(Box::new(PointerCoder {
        placeholder_coder: Arc::from(placeholder_coder),
        placeholder_size,
        inner,
        sized,
    }))
}
