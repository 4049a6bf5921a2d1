//! A composable binary encoding/decoding toolkit: a small set of
//! primitive coders and combinators that assemble declaratively into
//! a single [`Coder`] for an arbitrary binary (or, via [`armor`],
//! text-wrapped binary) format.
//!
//! ```
//! use packed::combinators::struct_coder;
//! use packed::primitives::{cstring, U16LE, U8};
//! use packed::{Value, ReaderOpts};
//! use indexmap::IndexMap;
//!
//! let header = struct_coder(vec![
//!     ("version".into(), Box::new(U8)),
//!     ("flags".into(), Box::new(U16LE)),
//!     ("name".into(), cstring()),
//! ]);
//!
//! let mut fields = IndexMap::new();
//! fields.insert("version".to_string(), Value::UInt(1));
//! fields.insert("flags".to_string(), Value::UInt(0x00FF));
//! fields.insert("name".to_string(), Value::Str("hi".into()));
//!
//! let encoded = packed::encode(&*header, &Value::Struct(fields.clone())).unwrap();
//! let decoded = packed::decode(&*header, &encoded, ReaderOpts::new()).unwrap();
//! assert_eq!(decoded, Value::Struct(fields));
//! ```

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod bitset;
mod coder;
mod error;
mod length;
mod opts;
mod path;
mod reader;
mod value;
mod writer;

pub mod armor;
pub mod combinators;
pub mod primitives;
pub mod support;

/// Byte-slice helpers from the public interface table (§6):
/// `equal_bytes`, `concat_bytes`, `is_bytes`.
pub use packed_utils as utils;

pub use coder::{decode, encode, wrap, BoxCoder, Coder};
pub use error::{Error, ErrorKind, PathSegment, Result};
pub use length::Length;
pub use opts::{ReaderOpts, WriterOpts};
pub use reader::Reader;
pub use value::Value;
pub use writer::Writer;

pub use armor::base64_armor;
