//! Value-level support coders: helpers that reshape the value a wire
//! coder produces/consumes without introducing new wire framing of
//! their own (dict's array-of-pairs view aside, which does add framing
//! via the `array`/`tuple` combinators it wraps).

pub mod decimal;
pub mod dict;
pub mod enum_name;
pub mod match_partial;
pub mod reverse;
pub mod safe_bigint;

pub use decimal::decimal;
pub use dict::dict;
pub use enum_name::enum_name;
pub use match_partial::match_coders;
pub use reverse::reverse;
pub use safe_bigint::safe_bigint;
