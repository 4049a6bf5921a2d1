//! `lazy(thunk)`: defers coder construction until first use, enabling
//! mutually recursive and self-referential coders.

use std::sync::Arc;

use crate::coder::{BoxCoder, Coder};
use crate::error::Error;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

/// Constructs the coder to delegate to. Called fresh on every
/// encode/decode invocation rather than cached, so a thunk closing
/// over an `Arc`/`Rc`-shared definition is the idiomatic way to build
/// a cyclic coder graph without embedding a coder inside itself.
pub type LazyThunk = Arc<dyn Fn() -> BoxCoder + Send + Sync>;

pub struct LazyCoder {
    thunk: LazyThunk,
}

impl Coder for LazyCoder {
    fn encode_stream(&self, w: &mut Writer, value: &Value) -> Result<(), Error> {
        log::debug!("resolving lazy coder for encode at {:?}", w.labels);
        (self.thunk)().encode_stream(w, value)
    }

    fn decode_stream(&self, r: &mut Reader<'_>) -> Result<Value, Error> {
        log::debug!("resolving lazy coder for decode at {:?}", r.labels);
        (self.thunk)().decode_stream(r)
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

pub fn lazy(thunk: LazyThunk) -> BoxCoder {
    Box::new(LazyCoder { thunk })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::array::array;
    use crate::combinators::struct_::struct_coder;
    use crate::length::Length;
    use crate::opts::ReaderOpts;
    use crate::primitives::int::U8;
    use indexmap::IndexMap;

    #[test]
    fn supports_a_self_referential_tree_node() {
        // node := struct { value: U8, children: array(U8, lazy(node)) }
        fn node() -> BoxCoder {
            struct_coder(vec![
                ("value".into(), Box::new(U8)),
                (
                    "children".into(),
                    array(Length::coder(Box::new(U8)), lazy(Arc::new(node))),
                ),
            ])
        }

        let coder = node();

        let mut leaf = IndexMap::new();
        leaf.insert("value".to_string(), Value::UInt(2));
        leaf.insert("children".to_string(), Value::Array(vec![]));

        let mut root = IndexMap::new();
        root.insert("value".to_string(), Value::UInt(1));
        root.insert("children".to_string(), Value::Array(vec![Value::Struct(leaf)]));

        let value = Value::Struct(root);
        let encoded = coder.encode(&value).unwrap();
        assert_eq!(coder.decode(&encoded, ReaderOpts::new()).unwrap(), value);
    }
}
