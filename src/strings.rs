//! String fields: length from an earlier field, fixed count, or null termination.

use crate::error::DecodeError;
use crate::field::FieldDef;
use crate::reader::read_bytes;
use crate::value::Value;
use byteorder::ReadBytesExt;
use std::collections::HashMap;
use std::io::Cursor;

/// Read a string field. `values` holds the fields decoded so far and is only
/// consulted for `length_var`.
pub fn read_string(
    r: &mut Cursor<&[u8]>,
    field: &FieldDef,
    values: &HashMap<String, Value>,
) -> Result<Value, DecodeError> {
    if let Some(ref var) = field.length_var {
        let len = values
            .get(var)
            .and_then(Value::as_length)
            .ok_or_else(|| DecodeError::LengthVariableNotDefined {
                field: field.name.clone(),
                variable: var.clone(),
            })?;
        return read_bytes(r, field, len).map(Value::Text);
    }
    if field.count != 0 {
        return read_bytes(r, field, field.count).map(Value::Text);
    }
    if field.null_terminated {
        return read_null_terminated(r, field).map(Value::Text);
    }
    Err(DecodeError::MissingStringLengthSpec {
        field: field.name.clone(),
    })
}

/// Bytes up to the first zero; the zero is consumed but not returned.
fn read_null_terminated(r: &mut Cursor<&[u8]>, field: &FieldDef) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    loop {
        match r.read_u8() {
            Ok(0) => return Ok(out),
            Ok(b) => out.push(b),
            Err(_) => {
                return Err(DecodeError::UnterminatedString {
                    field: field.name.clone(),
                    partial: out,
                })
            }
        }
    }
}
