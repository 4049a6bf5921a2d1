//! `base64Armor(name, lineLen, inner, checksum?)`: a PGP/SSH-style
//! ASCII-armored text wrapper around an arbitrary inner coder.
//!
//! This is the one coder in the crate whose wire form is text rather
//! than raw binary; it still implements [`Coder`] like everything
//! else, so it composes with the rest of the combinator tree (e.g. as
//! the outermost layer of a format).

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::coder::{BoxCoder, Coder};
use crate::error::{Error, ErrorKind};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// Computes a checksum over the inner coder's raw encoded bytes, for
/// the optional `=<checksum>` armor line. The crate does not ship a
/// built-in CRC24 (PGP's checksum algorithm is an external
/// byte↔text-adjacent concern, the same way base64 itself is);
/// callers supply whatever checksum their format calls for.
pub type ChecksumFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

pub struct ArmorCoder {
    name: String,
    line_len: usize,
    inner: BoxCoder,
    checksum: Option<ChecksumFn>,
}

fn header(name: &str) -> String {
    format!("-----BEGIN {name}-----")
}

fn footer(name: &str) -> String {
    format!("-----END {name}-----")
}

impl Coder for ArmorCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        let inner_bytes = self.inner.encode(value)?;

        let mut text = String::new();
        text.push_str(&header(&self.name));
        text.push_str("\n\n");

        let encoded = BASE64.encode(&inner_bytes);
        for line in encoded.as_bytes().chunks(self.line_len.max(1)) {
            text.push_str(std::str::from_utf8(line).expect("base64 alphabet is ASCII"));
            text.push('\n');
        }

        if let Some(checksum) = &self.checksum {
            let sum = checksum(&inner_bytes);
            let sum_bytes = [(sum >> 16) as u8, (sum >> 8) as u8, sum as u8];
            text.push('=');
            text.push_str(&BASE64.encode(sum_bytes));
            text.push('\n');
        }

        text.push_str(&footer(&self.name));
        text.push('\n');

        w.bytes(text.as_bytes())
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        let n = r.remaining();
        let raw = r.bytes(n, false)?;
        let text = std::str::from_utf8(raw)
            .map_err(|e| Error::new(r.labels.clone(), ErrorKind::Armor(e.to_string())))?;

        let armor_err = |msg: String| Error::new(r.labels.clone(), ErrorKind::Armor(msg));

        let mut lines = text.lines();
        let begin = lines
            .next()
            .ok_or_else(|| armor_err("empty input".into()))?;
        if begin.trim_end() != header(&self.name) {
            return Err(armor_err(format!(
                "expected header {:?}, got {:?}",
                header(&self.name),
                begin
            )));
        }

        let mut body_lines = Vec::new();
        let mut checksum_line = None;
        let mut end_line = None;
        for line in lines {
            let trimmed = line.trim_end();
            if trimmed == footer(&self.name) {
                end_line = Some(trimmed);
                break;
            }
            if let Some(sum) = trimmed.strip_prefix('=') {
                checksum_line = Some(sum.to_string());
                continue;
            }
            if !trimmed.is_empty() {
                body_lines.push(trimmed);
            }
        }

        if end_line.is_none() {
            return Err(armor_err(format!("missing footer {:?}", footer(&self.name))));
        }

        let inner_bytes = BASE64
            .decode(body_lines.concat())
            .map_err(|e| armor_err(e.to_string()))?;
        log::trace!("decoded {} armored byte(s) for {}", inner_bytes.len(), self.name);

        if let (Some(checksum), Some(expected_b64)) = (&self.checksum, &checksum_line) {
            let expected = BASE64
                .decode(expected_b64)
                .map_err(|e| armor_err(e.to_string()))?;
            let actual = checksum(&inner_bytes);
            let actual_bytes = [(actual >> 16) as u8, (actual >> 8) as u8, actual as u8];
            if !packed_utils::equal_bytes(&expected, &actual_bytes) {
                return Err(armor_err(format!(
                    "checksum mismatch: expected {expected:02x?}, got {actual_bytes:02x?}"
                )));
            }
            log::trace!("armor checksum verified for {}", self.name);
        }

        self.inner.decode(&inner_bytes, r.opts())
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn base64_armor(
    name: impl Into<String>,
    line_len: usize,
    inner: BoxCoder,
    checksum: Option<ChecksumFn>,
) -> BoxCoder {
    Box::new(ArmorCoder {
        name: name.into(),
        line_len,
        inner,
        checksum,
    })
}
