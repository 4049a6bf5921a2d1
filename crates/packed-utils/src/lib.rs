//! Shared utility code throughout the packed workspace.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod bytes;
pub use bytes::*;

pub mod hints;
