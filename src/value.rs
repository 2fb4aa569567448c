//! Decoded values (one closed variant per kind, plus typed arrays).

use crate::kind::Kind;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Cow;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Raw string bytes, not checked for any encoding.
    Text(Vec<u8>),
    Array(Array),
}

/// Fixed-size array of one element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    U64(Vec<u64>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Value {
    /// Kind this value was decoded as (element kind for arrays).
    pub fn kind(&self) -> Kind {
        match self {
            Value::U8(_) => Kind::Uint8,
            Value::I8(_) => Kind::Int8,
            Value::U16(_) => Kind::Uint16,
            Value::I16(_) => Kind::Int16,
            Value::U32(_) => Kind::Uint32,
            Value::I32(_) => Kind::Int32,
            Value::U64(_) => Kind::Uint64,
            Value::I64(_) => Kind::Int64,
            Value::F32(_) => Kind::Float32,
            Value::F64(_) => Kind::Float64,
            Value::Text(_) => Kind::String,
            Value::Array(a) => a.kind(),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(x) => Some(*x as u64),
            Value::U16(x) => Some(*x as u64),
            Value::U32(x) => Some(*x as u64),
            Value::U64(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(x) => Some(*x as i64),
            Value::I16(x) => Some(*x as i64),
            Value::I32(x) => Some(*x as i64),
            Value::I64(x) => Some(*x),
            Value::U8(x) => Some(*x as i64),
            Value::U16(x) => Some(*x as i64),
            Value::U32(x) => Some(*x as i64),
            Value::U64(x) => i64::try_from(*x).ok(),
            _ => None,
        }
    }

    /// Interpret the value as a byte length: any integer variant that is
    /// non-negative and fits in `usize`.
    pub fn as_length(&self) -> Option<usize> {
        let n = match self {
            Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) => self.as_u64()?,
            Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
                u64::try_from(self.as_i64()?).ok()?
            }
            _ => return None,
        };
        usize::try_from(n).ok()
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(x) => Some(*x as f64),
            Value::F64(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(b) => Some(b),
            _ => None,
        }
    }

    /// Text as `&str` when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Text with invalid UTF-8 sequences replaced.
    pub fn to_text_lossy(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(String::from_utf8_lossy)
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl Array {
    pub fn kind(&self) -> Kind {
        match self {
            Array::U8(_) => Kind::Uint8,
            Array::I8(_) => Kind::Int8,
            Array::U16(_) => Kind::Uint16,
            Array::I16(_) => Kind::Int16,
            Array::U32(_) => Kind::Uint32,
            Array::I32(_) => Kind::Int32,
            Array::U64(_) => Kind::Uint64,
            Array::I64(_) => Kind::Int64,
            Array::F32(_) => Kind::Float32,
            Array::F64(_) => Kind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Array::U8(v) => v.len(),
            Array::I8(v) => v.len(),
            Array::U16(v) => v.len(),
            Array::I16(v) => v.len(),
            Array::U32(v) => v.len(),
            Array::I32(v) => v.len(),
            Array::U64(v) => v.len(),
            Array::I64(v) => v.len(),
            Array::F32(v) => v.len(),
            Array::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i` as a scalar value.
    pub fn get(&self, i: usize) -> Option<Value> {
        Some(match self {
            Array::U8(v) => Value::U8(*v.get(i)?),
            Array::I8(v) => Value::I8(*v.get(i)?),
            Array::U16(v) => Value::U16(*v.get(i)?),
            Array::I16(v) => Value::I16(*v.get(i)?),
            Array::U32(v) => Value::U32(*v.get(i)?),
            Array::I32(v) => Value::I32(*v.get(i)?),
            Array::U64(v) => Value::U64(*v.get(i)?),
            Array::I64(v) => Value::I64(*v.get(i)?),
            Array::F32(v) => Value::F32(*v.get(i)?),
            Array::F64(v) => Value::F64(*v.get(i)?),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::U8(x) => s.serialize_u8(*x),
            Value::I8(x) => s.serialize_i8(*x),
            Value::U16(x) => s.serialize_u16(*x),
            Value::I16(x) => s.serialize_i16(*x),
            Value::U32(x) => s.serialize_u32(*x),
            Value::I32(x) => s.serialize_i32(*x),
            Value::U64(x) => s.serialize_u64(*x),
            Value::I64(x) => s.serialize_i64(*x),
            Value::F32(x) => s.serialize_f32(*x),
            Value::F64(x) => s.serialize_f64(*x),
            Value::Text(b) => s.serialize_str(&String::from_utf8_lossy(b)),
            Value::Array(a) => a.serialize(s),
        }
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.len()))?;
        for v in self.iter() {
            seq.serialize_element(&v)?;
        }
        seq.end()
    }
}
