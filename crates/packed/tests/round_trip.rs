//! Cross-combinator scenarios assembling several coders the way a
//! real format definition would, exercising the concrete test
//! vectors and universal laws described alongside the engine.

use indexmap::IndexMap;

use packed::combinators::{array, bitset, flag, flagged, map, pad_right, pointer, struct_coder, tag, tuple_coder, Selector};
use packed::primitives::{bool as bool_coder, bigint, cstring, string, U16BE, U16LE, U32BE, U32LE, U64LE, U8};
use packed::support::decimal;
use packed::{decode, encode, Length, ReaderOpts, Value};

fn struct_value(pairs: Vec<(&str, Value)>) -> Value {
    let mut m = IndexMap::new();
    for (k, v) in pairs {
        m.insert(k.to_string(), v);
    }
    Value::Struct(m)
}

#[test]
fn be_and_le_integers_agree_with_reference_vectors() {
    assert_eq!(encode(&U32BE, &Value::UInt(123123123)).unwrap(), vec![0x07, 0x56, 0xB5, 0xB3]);
    assert_eq!(encode(&U32LE, &Value::UInt(123123123)).unwrap(), vec![0xB3, 0xB5, 0x56, 0x07]);

    assert_eq!(
        encode(&U64LE, &Value::UInt(u64::MAX)).unwrap(),
        vec![0xFF; 8]
    );
}

#[test]
fn u64_max_plus_one_is_rejected() {
    // There is no Value that represents 2^64 as a machine integer;
    // the nearest analogue is BigInt, which the fixed-width coder
    // must still reject as out of range for an 8-byte unsigned field.
    let too_big = Value::BigInt(num_bigint::BigInt::from(u64::MAX) + num_bigint::BigInt::from(1));
    assert!(encode(&U64LE, &too_big).is_err());
}

#[test]
fn struct_of_mixed_primitives_matches_reference_bytes() {
    let header = struct_coder(vec![
        ("a".into(), Box::new(U8)),
        ("b".into(), Box::new(U16LE)),
        ("c".into(), string(Length::coder(Box::new(U8)))),
    ]);

    let value = struct_value(vec![
        ("a", Value::UInt(31)),
        ("b", Value::UInt(12345)),
        ("c", Value::Str("hello".into())),
    ]);

    let encoded = encode(&*header, &value).unwrap();
    assert_eq!(encoded, vec![0x1F, 0x39, 0x30, 0x05, b'h', b'e', b'l', b'l', b'o']);
    assert_eq!(decode(&*header, &encoded, ReaderOpts::new()).unwrap(), value);
}

#[test]
fn chained_pointers_resolve_in_registration_order() {
    let coder = pointer(
        Box::new(U8),
        pointer(Box::new(U8), pointer(Box::new(U8), Box::new(U8), false).unwrap(), false).unwrap(),
        false,
    )
    .unwrap();

    let encoded = encode(&*coder, &Value::UInt(123)).unwrap();
    assert_eq!(encoded, vec![0x01, 0x01, 0x01, 0x7B]);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), Value::UInt(123));
}

#[test]
fn array_of_pointers_matches_interleaved_reference_layout() {
    let coder = array(Length::coder(Box::new(U8)), pointer(Box::new(U16BE), Box::new(U8), false).unwrap());

    let value = Value::Array(vec![Value::UInt(3), Value::UInt(4)]);
    let encoded = encode(&*coder, &value).unwrap();
    assert_eq!(encoded, vec![0x02, 0x00, 0x05, 0x00, 0x06, 0x03, 0x04]);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), value);
}

#[test]
fn terminator_array_round_trips_and_rejects_colliding_elements() {
    let coder = array(Length::terminator(vec![0x00]), Box::new(U16LE));

    let ok = Value::Array(vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]);
    let encoded = encode(&*coder, &ok).unwrap();
    assert_eq!(encoded, vec![1, 0, 2, 0, 3, 0, 0]);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), ok);

    let colliding = Value::Array(vec![Value::UInt(0), Value::UInt(1), Value::UInt(2)]);
    assert!(encode(&*coder, &colliding).is_err());
}

#[test]
fn pad_right_of_cstring_rounds_up_to_block_size() {
    let coder = pad_right(3, cstring(), None);
    assert_eq!(encode(&*coder, &Value::Str("a".into())).unwrap(), vec![0x61, 0, 0]);
    assert_eq!(
        encode(&*coder, &Value::Str("aaaa".into())).unwrap(),
        vec![0x61, 0x61, 0x61, 0x61, 0, 0]
    );
}

#[test]
fn decimal_round_trips_through_a_bigint_coder() {
    let coder = decimal(8, bigint(8, true, false, false));
    let decoded = decode(&*coder, &encode(&*coder, &Value::Str("6.30880845".into())).unwrap(), ReaderOpts::new()).unwrap();
    assert_eq!(decoded, Value::Str("6.30880845".into()));
}

#[test]
fn flagged_field_is_absent_when_selector_is_false() {
    let coder = struct_coder(vec![
        ("has_name".into(), bool_coder()),
        (
            "name".into(),
            flagged(Selector::Path("has_name".into()), cstring(), None),
        ),
    ]);

    let with_name = struct_value(vec![("has_name", Value::Bool(true)), ("name", Value::Str("rex".into()))]);
    let encoded = encode(&*coder, &with_name).unwrap();
    assert_eq!(encoded, vec![0x01, b'r', b'e', b'x', 0x00]);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), with_name);

    let without_name = struct_value(vec![("has_name", Value::Bool(false)), ("name", Value::Unit)]);
    let encoded = encode(&*coder, &without_name).unwrap();
    assert_eq!(encoded, vec![0x00]);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), without_name);
}

#[test]
fn flag_presence_toggles_on_a_byte_pattern() {
    let coder = flag(vec![0xFF], false);
    assert_eq!(encode(&*coder, &Value::Bool(true)).unwrap(), vec![0xFF]);
    assert_eq!(encode(&*coder, &Value::Bool(false)).unwrap(), Vec::<u8>::new());
    assert_eq!(decode(&*coder, &[0xFF], ReaderOpts::new()).unwrap(), Value::Bool(true));
    assert_eq!(decode(&*coder, &[], ReaderOpts::new()).unwrap(), Value::Bool(false));
}

#[test]
fn map_translates_wire_values_to_names_and_back() {
    let mut variants = IndexMap::new();
    variants.insert("red".to_string(), Value::UInt(0));
    variants.insert("green".to_string(), Value::UInt(1));
    variants.insert("blue".to_string(), Value::UInt(2));
    let coder = map(Box::new(U8), variants);

    let encoded = encode(&*coder, &Value::Str("green".into())).unwrap();
    assert_eq!(encoded, vec![0x01]);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), Value::Str("green".into()));

    assert!(decode(&*coder, &[0x09], ReaderOpts::new()).is_err());
}

#[test]
fn tagged_union_dispatches_on_a_leading_discriminator() {
    let variants: Vec<(Value, packed::BoxCoder)> = vec![
        (Value::UInt(0), Box::new(U8)),
        (Value::UInt(1), string(Length::coder(Box::new(U8)))),
    ];
    let coder = tag(Box::new(U8), variants);

    let value = Value::Tagged {
        tag: "1".into(),
        data: Box::new(Value::Str("hi".into())),
    };
    let encoded = encode(&*coder, &value).unwrap();
    assert_eq!(encoded, vec![0x01, 0x02, b'h', b'i']);
    assert_eq!(decode(&*coder, &encoded, ReaderOpts::new()).unwrap(), value);
}

#[test]
fn tuple_encodes_positional_fields_in_order() {
    let coder = tuple_coder(vec![Box::new(U8), Box::new(U16BE)]);
    let value = Value::Array(vec![Value::UInt(1), Value::UInt(0x0203)]);
    assert_eq!(encode(&*coder, &value).unwrap(), vec![0x01, 0x02, 0x03]);
    assert_eq!(decode(&*coder, &[0x01, 0x02, 0x03], ReaderOpts::new()).unwrap(), value);
}

#[test]
fn distinct_pointers_into_overlapping_regions_fail_by_default() {
    let coder = tuple_coder(vec![
        pointer(Box::new(U8), Box::new(U8), false).unwrap(),
        pointer(Box::new(U8), Box::new(U8), false).unwrap(),
    ]);
    // Both placeholders (0x02, 0x02) point at the same payload byte.
    let data = vec![0x02, 0x02, 0x7B];
    assert!(decode(&*coder, &data, ReaderOpts::new()).is_err());
}

#[test]
fn bit_aligned_byte_operation_after_an_odd_bit_count_is_an_error() {
    let coder = struct_coder(vec![
        ("flags".into(), bitset(vec!["a".into(), "b".into(), "c".into()], false)),
        ("rest".into(), Box::new(U8)),
    ]);

    // 3 bits written, no padding requested: the struct is left
    // mid-byte and the following byte-level field must fail to
    // encode/decode.
    let mut fields = IndexMap::new();
    let mut flags = IndexMap::new();
    flags.insert("a".to_string(), Value::Bool(true));
    flags.insert("b".to_string(), Value::Bool(false));
    flags.insert("c".to_string(), Value::Bool(true));
    fields.insert("flags".to_string(), Value::Struct(flags));
    fields.insert("rest".to_string(), Value::UInt(1));

    assert!(encode(&*coder, &Value::Struct(fields)).is_err());
}

#[test]
fn cstring_top_level_decode_rejects_unconsumed_trailing_bytes() {
    let data = b"te\x00st";
    assert!(decode(&*cstring(), data, ReaderOpts::new()).is_err());
}
