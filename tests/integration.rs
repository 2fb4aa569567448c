//! Integration tests: decode engine end to end (scalars, arrays, strings, failures,
//! determinism and sharing a decoder across threads).

use fieldspec::{decode, Array, DecodeError, Decoder, Endianness, FieldDef, Kind, Schema, Value};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

fn mixed_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::new(Kind::Uint8, "uint8Var"),
        FieldDef::new(Kind::Int8, "int8Var"),
        FieldDef::new(Kind::Uint16, "uint16Var"),
        FieldDef::new(Kind::Int16, "int16Var"),
        FieldDef::new(Kind::Float32, "float32Var"),
        FieldDef::new(Kind::Float64, "float64Var"),
        FieldDef::cstring("nullTermString"),
    ]
}

const MIXED_BYTES: &[u8] = &[
    0x01,
    0x02,
    0x00, 0x03,
    0x00, 0x04,
    0x40, 0x48, 0xf5, 0xc3,
    0x40, 0x09, 0x1e, 0xb8, 0x51, 0xeb, 0x85, 0x1f,
    b't', b'e', b's', b't', 0x00,
];

#[test]
fn test_decode_mixed_record() {
    let rec = decode(&mixed_fields(), MIXED_BYTES).expect("decode");
    assert_eq!(rec.get("uint8Var"), Some(&Value::U8(1)));
    assert_eq!(rec.get("int8Var"), Some(&Value::I8(2)));
    assert_eq!(rec.get("uint16Var"), Some(&Value::U16(3)));
    assert_eq!(rec.get("int16Var"), Some(&Value::I16(4)));
    assert_eq!(rec.get("float32Var"), Some(&Value::F32(3.14)));
    assert_eq!(rec.get("float64Var"), Some(&Value::F64(3.14)));
    assert_eq!(rec.get("nullTermString").and_then(Value::as_str), Some("test"));
    assert_eq!(rec.consumed(), MIXED_BYTES.len());
    assert_eq!(rec.fields().len(), 7);
}

#[test]
fn test_record_json_in_schema_order() {
    let rec = decode(&mixed_fields(), MIXED_BYTES).expect("decode");
    let json = serde_json::to_string(&rec).expect("json");
    assert!(json.starts_with(r#"{"uint8Var":1,"int8Var":2,"uint16Var":3,"int16Var":4,"#));
    assert!(json.ends_with(r#""nullTermString":"test"}"#));
}

#[test]
fn test_uint16_array_big_endian() {
    let fields = [FieldDef::array(Kind::Uint16, "a", 3)];
    let rec = decode(&fields, &[0x00, 0x0A, 0x00, 0x0B, 0x00, 0x0C]).expect("decode");
    assert_eq!(rec.get("a"), Some(&Value::Array(Array::U16(vec![10, 11, 12]))));
}

#[test]
fn test_int32_array_little_endian() {
    let mut bytes = Vec::new();
    for x in [-1i32, 0, 70000] {
        bytes.extend_from_slice(&x.to_le_bytes());
    }
    let fields = [FieldDef::array(Kind::Int32, "a", 3).with_endian(Endianness::Little)];
    let rec = decode(&fields, &bytes).expect("decode");
    assert_eq!(rec.get("a"), Some(&Value::Array(Array::I32(vec![-1, 0, 70000]))));
}

#[test]
fn test_string_length_from_earlier_field() {
    let fields = [
        FieldDef::new(Kind::Uint8, "len"),
        FieldDef::string_sized_by("s", "len"),
    ];
    let rec = decode(&fields, &[0x03, b'a', b'b', b'c']).expect("decode");
    assert_eq!(rec.get("len"), Some(&Value::U8(3)));
    assert_eq!(rec.get("s").and_then(Value::as_str), Some("abc"));
    assert_eq!(rec.len(), 2);
}

#[test]
fn test_string_length_from_wide_integer() {
    let fields = [
        FieldDef::new(Kind::Uint32, "len").little_endian(),
        FieldDef::string_sized_by("s", "len"),
        FieldDef::new(Kind::Uint8, "after"),
    ];
    let rec = decode(&fields, &[2, 0, 0, 0, b'h', b'i', 9]).expect("decode");
    assert_eq!(rec.get("s").and_then(Value::as_str), Some("hi"));
    assert_eq!(rec.get("after"), Some(&Value::U8(9)));
}

#[test]
fn test_null_terminated_string() {
    let fields = [FieldDef::cstring("field")];
    let rec = decode(&fields, b"test\0").expect("decode");
    assert_eq!(rec.get("field").and_then(Value::as_str), Some("test"));

    let err = decode(&fields, b"test").unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnterminatedString { field: "field".into(), partial: b"test".to_vec() }
    );
}

#[test]
fn test_insufficient_data_records_nothing() {
    let fields = [
        FieldDef::new(Kind::Uint16, "head"),
        FieldDef::new(Kind::Uint32, "x"),
        FieldDef::new(Kind::Uint8, "tail"),
    ];
    let d = Decoder::new(fields.to_vec());
    let (offset, res) = d.decode_with_extent(&[0, 1, 0xaa, 0xbb]);
    assert_eq!(offset, 2);
    assert_eq!(
        res.unwrap_err(),
        DecodeError::InsufficientData { field: "x".into(), needed: 4, remaining: 2 }
    );
}

#[test]
fn test_fixed_string_short_input() {
    let fields = [FieldDef::fixed_string("s", 5)];
    assert!(matches!(
        decode(&fields, b"abc"),
        Err(DecodeError::InsufficientData { needed: 5, remaining: 3, .. })
    ));
}

#[test]
fn test_unspecified_kind_is_unhandled() {
    let fields = [FieldDef::new(Kind::Unspecified, "u")];
    assert_eq!(
        decode(&fields, &[1, 2, 3]).unwrap_err(),
        DecodeError::UnhandledType { field: "u".into(), kind: Kind::Unspecified }
    );
}

#[test]
fn test_string_without_length_rule() {
    let fields = [FieldDef::new(Kind::Uint8, "a"), FieldDef::new(Kind::String, "s")];
    assert_eq!(
        decode(&fields, b"\x01abc\0").unwrap_err(),
        DecodeError::MissingStringLengthSpec { field: "s".into() }
    );
}

#[test]
fn test_length_var_forward_reference_fails_at_decode() {
    let fields = vec![
        FieldDef::string_sized_by("s", "len"),
        FieldDef::new(Kind::Uint8, "len"),
    ];
    let err = Decoder::new(Schema::new(fields)).decode(&[1, b'a']).unwrap_err();
    assert!(matches!(err, DecodeError::LengthVariableNotDefined { .. }));
}

/// `mixed_fields` plus NaN floats with payload bits, scalar and array.
fn nan_fields() -> Vec<FieldDef> {
    let mut f = mixed_fields();
    f.push(FieldDef::new(Kind::Float32, "nan32"));
    f.push(FieldDef::new(Kind::Float64, "nan64"));
    f.push(FieldDef::array(Kind::Float32, "nans", 2).little_endian());
    f
}

fn nan_bytes() -> Vec<u8> {
    let mut b = MIXED_BYTES.to_vec();
    b.extend_from_slice(&0x7fc0_0001u32.to_be_bytes());
    b.extend_from_slice(&0xfff8_0000_0000_00abu64.to_be_bytes());
    b.extend_from_slice(&0x7fc0_1234u32.to_le_bytes());
    b.extend_from_slice(&1.5f32.to_le_bytes());
    b
}

/// Raw bit patterns of every value, in schema order. NaN != NaN, so records with
/// NaN floats are compared through this instead of `==`.
fn bits(rec: &fieldspec::Record) -> Vec<(String, Vec<u64>)> {
    fn value_bits(v: &Value) -> Vec<u64> {
        match v {
            Value::F32(x) => vec![u64::from(x.to_bits())],
            Value::F64(x) => vec![x.to_bits()],
            Value::Text(b) => b.iter().map(|&c| u64::from(c)).collect(),
            Value::Array(a) => a.iter().flat_map(|e| value_bits(&e)).collect(),
            other => vec![other.as_u64().or_else(|| other.as_i64().map(|i| i as u64)).unwrap_or(0)],
        }
    }
    rec.iter().map(|(name, v)| (name.to_string(), value_bits(v))).collect()
}

#[test]
fn test_nan_payload_is_preserved() {
    let rec = decode(&nan_fields(), &nan_bytes()).expect("decode");
    assert_eq!(rec.get("nan32").and_then(Value::as_f32).map(f32::to_bits), Some(0x7fc0_0001));
    assert_eq!(rec.get("nan64").and_then(Value::as_f64).map(f64::to_bits), Some(0xfff8_0000_0000_00ab));
    match rec.get("nans") {
        Some(Value::Array(Array::F32(v))) => {
            assert_eq!(v[0].to_bits(), 0x7fc0_1234);
            assert_eq!(v[1], 1.5);
        }
        other => panic!("expected f32 array, got {:?}", other),
    }
}

#[test]
fn test_decode_is_deterministic() {
    let d = Decoder::new(nan_fields());
    let data = nan_bytes();
    let a = d.decode(&data).expect("decode");
    let b = d.decode(&data).expect("decode");
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.consumed(), b.consumed());
    assert_eq!(
        serde_json::to_string(&a).expect("json"),
        serde_json::to_string(&b).expect("json")
    );
}

#[test]
fn test_shared_decoder_across_threads() {
    let d = Arc::new(Decoder::new(nan_fields()));
    let data: Arc<[u8]> = nan_bytes().into();
    let baseline = bits(&d.decode(&data).expect("decode"));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let d = Arc::clone(&d);
            let data = Arc::clone(&data);
            thread::spawn(move || bits(&d.decode(&data).expect("decode")))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().expect("join"), baseline);
    }
}

#[test]
fn test_record_outlives_decoder() {
    let rec = {
        let d = Decoder::new(vec![FieldDef::new(Kind::Int64, "x")]);
        d.decode(&(-5i64).to_be_bytes()).expect("decode")
    };
    assert_eq!(rec.get("x").and_then(Value::as_i64), Some(-5));
    assert_eq!(rec.schema().len(), 1);
}

macro_rules! int_round_trip {
    ($name:ident, $ty:ty, $kind:expr, $variant:path) => {
        proptest! {
            #[test]
            fn $name(x in any::<$ty>(), little in any::<bool>()) {
                let (bytes, field) = if little {
                    (x.to_le_bytes().to_vec(), FieldDef::new($kind, "v").little_endian())
                } else {
                    (x.to_be_bytes().to_vec(), FieldDef::new($kind, "v"))
                };
                let rec = decode(&[field], &bytes).expect("decode");
                prop_assert_eq!(rec.get("v"), Some(&$variant(x)));
                prop_assert_eq!(rec.consumed(), bytes.len());
            }
        }
    };
}

int_round_trip!(test_round_trip_u8, u8, Kind::Uint8, Value::U8);
int_round_trip!(test_round_trip_i8, i8, Kind::Int8, Value::I8);
int_round_trip!(test_round_trip_u16, u16, Kind::Uint16, Value::U16);
int_round_trip!(test_round_trip_i16, i16, Kind::Int16, Value::I16);
int_round_trip!(test_round_trip_u32, u32, Kind::Uint32, Value::U32);
int_round_trip!(test_round_trip_i32, i32, Kind::Int32, Value::I32);
int_round_trip!(test_round_trip_u64, u64, Kind::Uint64, Value::U64);
int_round_trip!(test_round_trip_i64, i64, Kind::Int64, Value::I64);

proptest! {
    #[test]
    fn test_round_trip_f32(bits in any::<u32>(), little in any::<bool>()) {
        let x = f32::from_bits(bits);
        let (bytes, field) = if little {
            (x.to_le_bytes(), FieldDef::new(Kind::Float32, "v").little_endian())
        } else {
            (x.to_be_bytes(), FieldDef::new(Kind::Float32, "v"))
        };
        let rec = decode(&[field], &bytes).expect("decode");
        let got = rec.get("v").and_then(Value::as_f32).expect("f32");
        prop_assert_eq!(got.to_bits(), bits);
    }

    #[test]
    fn test_round_trip_f64(bits in any::<u64>(), little in any::<bool>()) {
        let x = f64::from_bits(bits);
        let (bytes, field) = if little {
            (x.to_le_bytes(), FieldDef::new(Kind::Float64, "v").little_endian())
        } else {
            (x.to_be_bytes(), FieldDef::new(Kind::Float64, "v"))
        };
        let rec = decode(&[field], &bytes).expect("decode");
        let got = rec.get("v").and_then(Value::as_f64).expect("f64");
        prop_assert_eq!(got.to_bits(), bits);
    }

    #[test]
    fn test_missing_length_var_fails_for_any_input(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let fields = [
            FieldDef::new(Kind::Uint8, "len"),
            FieldDef::string_sized_by("s", "missing"),
        ];
        let res = decode(&fields, &data);
        if data.is_empty() {
            let is_insufficient = matches!(res, Err(DecodeError::InsufficientData { .. }));
            prop_assert!(is_insufficient);
        } else {
            let is_undefined = matches!(res, Err(DecodeError::LengthVariableNotDefined { .. }));
            prop_assert!(is_undefined);
        }
    }

    #[test]
    fn test_only_length_var_fails_without_prior_fields(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let fields = [FieldDef::string_sized_by("s", "missing")];
        prop_assert_eq!(
            decode(&fields, &data).unwrap_err(),
            DecodeError::LengthVariableNotDefined { field: "s".into(), variable: "missing".into() }
        );
    }

    #[test]
    fn test_arbitrary_input_never_panics(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        let fields = [
            FieldDef::new(Kind::Uint16, "n"),
            FieldDef::string_sized_by("s", "n"),
            FieldDef::cstring("c"),
            FieldDef::array(Kind::Float64, "f", 2).little_endian(),
        ];
        let (offset, res) = Decoder::new(fields.to_vec()).decode_with_extent(&data);
        prop_assert!(offset <= data.len());
        if let Ok(rec) = res {
            prop_assert_eq!(rec.consumed(), offset);
        }
    }
}
