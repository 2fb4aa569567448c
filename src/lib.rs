//! # fieldspec — schema-driven binary record decoder
//!
//! Describe a binary record as an ordered list of fields, then decode byte buffers
//! into named, typed values in a single linear pass.
//!
//! ## Field kinds
//!
//! - Integers: `uint8`, `int8`, `uint16`, `int16`, `uint32`, `int32`, `uint64`, `int64`
//! - Floats: `float32`, `float64`
//! - `string`: length from an earlier integer field, a fixed byte count, or a
//!   terminating zero byte (checked in that order)
//!
//! Numeric fields with `count >= 2` decode as fixed-size arrays. Every field carries
//! its own byte order.
//!
//! ## Schema text
//!
//! ```text
//! endian little;
//! len:   uint8;
//! name:  string[len];
//! tag:   string[4];
//! label: string nul;
//! pts:   int16[3] be;
//! ```
//!
//! ## Usage
//!
//! ```
//! use fieldspec::{Decoder, FieldDef, Kind, Value};
//!
//! let decoder = Decoder::new(vec![
//!     FieldDef::new(Kind::Uint8, "len"),
//!     FieldDef::string_sized_by("s", "len"),
//! ]);
//! let record = decoder.decode(&[3, b'a', b'b', b'c']).unwrap();
//! assert_eq!(record.get("len"), Some(&Value::U8(3)));
//! assert_eq!(record.get("s").and_then(Value::as_str), Some("abc"));
//! ```

pub mod decoder;
pub mod dump;
pub mod error;
pub mod field;
pub mod kind;
pub mod parser;
pub mod reader;
pub mod record;
pub mod schema;
pub mod strings;
pub mod value;

pub use decoder::{decode, Decoder};
pub use error::{DecodeError, SchemaError};
pub use field::{Endianness, FieldDef};
pub use kind::Kind;
pub use parser::parse;
pub use record::Record;
pub use schema::Schema;
pub use value::{Array, Value};
