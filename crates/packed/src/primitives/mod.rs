//! Leaf coders: the fixed-width and length-prefixed primitives that
//! every combinator ultimately bottoms out in.

pub mod bits;
pub mod bool_;
pub mod bytes;
pub mod constant;
pub mod float;
pub mod hex;
pub mod int;
pub mod string;

pub use bits::bits;
pub use bool_::{bool, BOOL};
pub use bytes::{bytes, bytes_le};
pub use constant::{constant, magic, nothing, NOTHING};
pub use float::{float32, float64, F32BE, F32LE, F64BE, F64LE};
pub use hex::hex;
pub use int::{
    bigint, int, I128BE, I128LE, I16BE, I16LE, I256BE, I256LE, I32BE, I32LE, I48BE, I48LE, I64BE,
    I64LE, I8, U128BE, U128LE, U16BE, U16LE, U256BE, U256LE, U32BE, U32LE, U48BE, U48LE, U64BE,
    U64LE, U8,
};
pub use string::{cstring, string};
