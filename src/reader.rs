//! Fixed-width readers: one scalar or a fixed-size array of one kind.
//!
//! Every read checks the remaining length up front, so a read either consumes
//! all of its bytes or none of them.

use crate::error::DecodeError;
use crate::field::{Endianness, FieldDef};
use crate::kind::Kind;
use crate::value::{Array, Value};
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use std::io::{self, Cursor, Read};

/// Bytes left after the cursor position.
pub fn remaining(r: &Cursor<&[u8]>) -> usize {
    let len = r.get_ref().len() as u64;
    len.saturating_sub(r.position()) as usize
}

fn ensure_remaining(r: &Cursor<&[u8]>, field: &FieldDef, needed: usize) -> Result<(), DecodeError> {
    let remaining = remaining(r);
    if remaining < needed {
        return Err(DecodeError::InsufficientData {
            field: field.name.clone(),
            needed,
            remaining,
        });
    }
    Ok(())
}

fn element_width(field: &FieldDef) -> Result<usize, DecodeError> {
    field.kind.width().ok_or_else(|| DecodeError::UnhandledType {
        field: field.name.clone(),
        kind: field.kind,
    })
}

/// Read exactly `n` raw bytes.
pub fn read_bytes(r: &mut Cursor<&[u8]>, field: &FieldDef, n: usize) -> Result<Vec<u8>, DecodeError> {
    ensure_remaining(r, field, n)?;
    let mut buf = vec![0u8; n];
    let remaining = remaining(r);
    r.read_exact(&mut buf).map_err(|_| short_read(field, n, remaining))?;
    Ok(buf)
}

fn short_read(field: &FieldDef, needed: usize, remaining: usize) -> DecodeError {
    DecodeError::InsufficientData {
        field: field.name.clone(),
        needed,
        remaining,
    }
}

/// Read a single value of `field.kind` in `field.endian` order.
pub fn read_scalar(r: &mut Cursor<&[u8]>, field: &FieldDef) -> Result<Value, DecodeError> {
    match field.endian {
        Endianness::Big => scalar::<BigEndian>(r, field),
        Endianness::Little => scalar::<LittleEndian>(r, field),
    }
}

/// Read `field.count` values of `field.kind`, each in `field.endian` order.
pub fn read_array(r: &mut Cursor<&[u8]>, field: &FieldDef) -> Result<Value, DecodeError> {
    match field.endian {
        Endianness::Big => array::<BigEndian>(r, field),
        Endianness::Little => array::<LittleEndian>(r, field),
    }
}

fn scalar<B: ByteOrder>(r: &mut Cursor<&[u8]>, field: &FieldDef) -> Result<Value, DecodeError> {
    let needed = element_width(field)?;
    ensure_remaining(r, field, needed)?;
    let remaining = remaining(r);
    let short = |_: io::Error| short_read(field, needed, remaining);
    Ok(match field.kind {
        Kind::Uint8 => Value::U8(r.read_u8().map_err(short)?),
        Kind::Int8 => Value::I8(r.read_i8().map_err(short)?),
        Kind::Uint16 => Value::U16(r.read_u16::<B>().map_err(short)?),
        Kind::Int16 => Value::I16(r.read_i16::<B>().map_err(short)?),
        Kind::Uint32 => Value::U32(r.read_u32::<B>().map_err(short)?),
        Kind::Int32 => Value::I32(r.read_i32::<B>().map_err(short)?),
        Kind::Uint64 => Value::U64(r.read_u64::<B>().map_err(short)?),
        Kind::Int64 => Value::I64(r.read_i64::<B>().map_err(short)?),
        Kind::Float32 => Value::F32(r.read_f32::<B>().map_err(short)?),
        Kind::Float64 => Value::F64(r.read_f64::<B>().map_err(short)?),
        Kind::String | Kind::Unspecified => {
            return Err(DecodeError::UnhandledType {
                field: field.name.clone(),
                kind: field.kind,
            })
        }
    })
}

fn array<B: ByteOrder>(r: &mut Cursor<&[u8]>, field: &FieldDef) -> Result<Value, DecodeError> {
    let width = element_width(field)?;
    let n = field.count;
    let needed = width.checked_mul(n).unwrap_or(usize::MAX);
    ensure_remaining(r, field, needed)?;
    let remaining = remaining(r);
    let short = |_: io::Error| short_read(field, needed, remaining);
    let arr = match field.kind {
        Kind::Uint8 => {
            let mut v = vec![0u8; n];
            r.read_exact(&mut v).map_err(short)?;
            Array::U8(v)
        }
        Kind::Int8 => {
            let mut v = vec![0i8; n];
            r.read_i8_into(&mut v).map_err(short)?;
            Array::I8(v)
        }
        Kind::Uint16 => {
            let mut v = vec![0u16; n];
            r.read_u16_into::<B>(&mut v).map_err(short)?;
            Array::U16(v)
        }
        Kind::Int16 => {
            let mut v = vec![0i16; n];
            r.read_i16_into::<B>(&mut v).map_err(short)?;
            Array::I16(v)
        }
        Kind::Uint32 => {
            let mut v = vec![0u32; n];
            r.read_u32_into::<B>(&mut v).map_err(short)?;
            Array::U32(v)
        }
        Kind::Int32 => {
            let mut v = vec![0i32; n];
            r.read_i32_into::<B>(&mut v).map_err(short)?;
            Array::I32(v)
        }
        Kind::Uint64 => {
            let mut v = vec![0u64; n];
            r.read_u64_into::<B>(&mut v).map_err(short)?;
            Array::U64(v)
        }
        Kind::Int64 => {
            let mut v = vec![0i64; n];
            r.read_i64_into::<B>(&mut v).map_err(short)?;
            Array::I64(v)
        }
        Kind::Float32 => {
            let mut v = vec![0f32; n];
            r.read_f32_into::<B>(&mut v).map_err(short)?;
            Array::F32(v)
        }
        Kind::Float64 => {
            let mut v = vec![0f64; n];
            r.read_f64_into::<B>(&mut v).map_err(short)?;
            Array::F64(v)
        }
        Kind::String | Kind::Unspecified => {
            return Err(DecodeError::UnhandledType {
                field: field.name.clone(),
                kind: field.kind,
            })
        }
    };
    Ok(Value::Array(arr))
}
