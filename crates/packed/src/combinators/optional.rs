//! `optional(flagCoder, inner, default)`: [`flagged`](super::flagged)
//! sugar with an always-inline boolean discriminator.

use crate::coder::BoxCoder;
use crate::combinators::flagged::{flagged, Selector};
use crate::value::Value;

pub fn optional(flag_coder: BoxCoder, inner: BoxCoder, default: Option<Value>) -> BoxCoder {
    flagged(Selector::Coder(flag_coder), inner, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::ReaderOpts;
    use crate::primitives::bool_::bool as bool_coder;
    use crate::primitives::int::U8;
    use crate::coder::Coder;

    #[test]
    fn behaves_like_flagged_with_inline_selector() {
        let coder = optional(bool_coder(), Box::new(U8), None);
        assert_eq!(coder.encode(&Value::UInt(5)).unwrap(), vec![1, 5]);
        assert_eq!(coder.encode(&Value::Unit).unwrap(), vec![0]);
        assert_eq!(coder.decode(&[1, 5], ReaderOpts::new()).unwrap(), Value::UInt(5));
    }
}
