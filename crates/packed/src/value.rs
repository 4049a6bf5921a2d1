//! The dynamic value model every coder in this crate encodes from and
//! decodes into.
//!
//! Coders are composed as trait objects (see [`crate::Coder`]), so the
//! per-field value type must be a single sum type rather than a
//! generic parameter — this is the "sum type enumerating all
//! built-ins" option the design notes call out, mirroring the
//! `Value` enum `katsuba-object-property` uses for its own
//! dynamically-typed deserialization target.

use indexmap::IndexMap;
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

/// A runtime value produced or consumed by a [`Coder`](crate::Coder).
///
/// Its type is dynamically assigned, which mandates appropriate
/// variant checks at each coder boundary.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The zero-width unit value (`nothing`, `constant`, `flag` when
    /// absent).
    Unit,
    /// A boolean.
    Bool(bool),
    /// A signed integer that fits in 64 bits.
    Int(i64),
    /// An unsigned integer that fits in 64 bits.
    UInt(u64),
    /// An arbitrary-precision signed integer, used for the wide
    /// (>64-bit) integer coders (I128/U128 .. I256/U256) and anywhere
    /// `bigint` is used directly.
    BigInt(BigInt),
    /// An IEEE-754 double.
    Float(f64),
    /// A raw byte string.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    Str(String),
    /// A homogeneous (or coder-defined) sequence of values, as
    /// produced by `array`/`tuple`.
    Array(Vec<Value>),
    /// A named-field record, as produced by `struct`, `bitset`, and
    /// (as a boxed payload) `tag`.
    Struct(IndexMap<String, Value>),
    /// A tagged union payload, as produced by `tag`/`mappedTag`.
    Tagged { tag: String, data: Box<Value> },
}

impl Value {
    /// A human-readable name for this value's variant, for error
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Tagged { .. } => "tagged",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Converts any integer-like variant to a [`BigInt`], for
    /// arbitrary-precision arithmetic (`bigint`, `decimal`, pointer
    /// offsets beyond 64 bits).
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Value::Int(i) => Some(BigInt::from(*i)),
            Value::UInt(u) => Some(BigInt::from(*u)),
            Value::BigInt(b) => Some(b.clone()),
            Value::Bool(b) => Some(BigInt::from(*b as u8)),
            _ => None,
        }
    }

    /// Converts any integer-like variant to a non-negative `u64`,
    /// used for length specifiers and pointer offsets.
    pub fn as_length(&self) -> Option<u64> {
        match self {
            Value::Int(i) if *i >= 0 => Some(*i as u64),
            Value::UInt(u) => Some(*u),
            Value::BigInt(b) if b.sign() != num_bigint::Sign::Minus => b.to_u64(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// A zero-length value, matching `nothing`'s decode result.
pub const EMPTY: Value = Value::Unit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_length_rejects_negative() {
        assert_eq!(Value::Int(-1).as_length(), None);
        assert_eq!(Value::Int(5).as_length(), Some(5));
        assert_eq!(Value::UInt(5).as_length(), Some(5));
    }

    #[test]
    fn type_name_is_stable() {
        assert_eq!(Value::Unit.type_name(), "unit");
        assert_eq!(Value::Bool(true).type_name(), "bool");
    }
}
