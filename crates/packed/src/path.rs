//! The runtime path stack used by path-based length references, and
//! the diagnostic path attached to every [`Error`](crate::Error).
//!
//! Each `struct`/`tuple`/`array` pushes a [`Frame`] on entry and pops
//! it on exit, so a sibling or ancestor field's already-known length
//! can be looked up by a relative path. Decode builds a [`Frame`] up incrementally, one
//! field at a time; encode already has the full value in hand, so its
//! frames are populated immediately and never mutated field-by-field
//! in the same sense, but the same representation is reused for both
//! directions so `resolve` has one implementation.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, PathSegment};
use crate::value::Value;

/// One level of the path stack: the partially- (decode) or
/// fully- (encode) built parent value currently in scope.
#[derive(Debug)]
pub enum Frame {
    Struct(IndexMap<String, Value>),
    Seq(Vec<Value>),
}

impl Frame {
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Frame::Struct(m) => m.get(name),
            Frame::Seq(_) => None,
        }
    }

    pub fn index(&self, i: usize) -> Option<&Value> {
        match self {
            Frame::Seq(s) => s.get(i),
            Frame::Struct(_) => None,
        }
    }

    pub fn push_field(&mut self, name: String, value: Value) {
        match self {
            Frame::Struct(m) => {
                m.insert(name, value);
            }
            Frame::Seq(s) => s.push(value),
        }
    }
}

fn navigate<'a>(frame: &'a Frame, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut value = if let Ok(idx) = first.parse::<usize>() {
        frame.index(idx)?
    } else {
        frame.field(first)?
    };

    for seg in rest {
        value = match value {
            Value::Struct(m) => m.get(*seg)?,
            Value::Array(a) => a.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(value)
}

/// Resolves a `/`-separated path expression (with `..` segments
/// popping a level) against the current stack, returning the
/// resolved integer.
pub fn resolve(stack: &[Frame], path: &str) -> Result<u64, Error> {
    resolve_value(stack, path)?.as_length().ok_or_else(|| bad_path(path))
}

/// As [`resolve`], but for a boolean field (used by `flagged`'s
/// path-based selector).
pub fn resolve_bool(stack: &[Frame], path: &str) -> Result<bool, Error> {
    resolve_value(stack, path)?.as_bool().ok_or_else(|| bad_path(path))
}

fn resolve_value<'a>(stack: &'a [Frame], path: &str) -> Result<&'a Value, Error> {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut level = stack.len();
    while segments.first() == Some(&"..") {
        if level == 0 {
            return Err(bad_path(path));
        }
        level -= 1;
        segments.remove(0);
    }

    if level == 0 || segments.is_empty() {
        return Err(bad_path(path));
    }

    let frame = &stack[level - 1];
    navigate(frame, &segments).ok_or_else(|| bad_path(path))
}

fn bad_path(path: &str) -> Error {
    Error::bare(ErrorKind::BadLengthPath(path.to_string()))
}

/// Attaches a field-name segment, runs `f`, and pops it regardless of
/// whether `f` succeeded — used so errors bubbling out of a field
/// carry the path down to that field.
pub fn with_segment<T>(
    labels: &mut Vec<PathSegment>,
    segment: PathSegment,
    f: impl FnOnce(&mut Vec<PathSegment>) -> Result<T, Error>,
) -> Result<T, Error> {
    labels.push(segment);
    let result = f(labels);
    labels.pop();
    result
}
