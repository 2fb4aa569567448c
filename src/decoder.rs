//! Decode engine: walks the schema once, in order, and builds a [`Record`].
//!
//! Strings go to [`crate::strings`], everything else to [`crate::reader`] (scalar
//! for `count < 2`, array otherwise). Decoded values are kept by name so a later
//! string can take its length from an earlier integer field. The first error
//! aborts the whole decode; no partial record is returned.

use crate::error::DecodeError;
use crate::field::FieldDef;
use crate::kind::Kind;
use crate::reader::{read_array, read_scalar};
use crate::record::Record;
use crate::schema::Schema;
use crate::strings::read_string;
use crate::value::Value;
use std::collections::HashMap;
use std::io::Cursor;

/// Decodes byte buffers against one schema. Holds no per-call state, so a single
/// decoder can be shared across threads.
#[derive(Debug, Clone)]
pub struct Decoder {
    schema: Schema,
}

impl Decoder {
    pub fn new(schema: impl Into<Schema>) -> Self {
        Decoder {
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Decode one record from the start of `bytes`. Trailing bytes are ignored;
    /// see [`Record::consumed`].
    pub fn decode(&self, bytes: &[u8]) -> Result<Record, DecodeError> {
        self.decode_with_extent(bytes).1
    }

    /// Decode and also return the cursor position reached: bytes consumed on
    /// success, offset of the failing field on error.
    pub fn decode_with_extent(&self, bytes: &[u8]) -> (usize, Result<Record, DecodeError>) {
        let mut cursor = Cursor::new(bytes);
        let mut ctx = DecodeContext::default();
        if let Err(e) = decode_fields(&mut cursor, self.schema.fields(), &mut ctx) {
            let offset = cursor.position() as usize;
            tracing::debug!(offset, error = %e, "decode failed");
            return (offset, Err(e));
        }
        let consumed = cursor.position() as usize;
        if consumed < bytes.len() {
            tracing::trace!(consumed, trailing = bytes.len() - consumed, "trailing bytes after record");
        }
        (consumed, Ok(Record::new(self.schema.clone(), ctx.values, consumed)))
    }
}

/// Decode `bytes` against an ad hoc field list.
pub fn decode(fields: &[FieldDef], bytes: &[u8]) -> Result<Record, DecodeError> {
    Decoder::new(Schema::new(fields.to_vec())).decode(bytes)
}

fn decode_fields(
    r: &mut Cursor<&[u8]>,
    fields: &[FieldDef],
    ctx: &mut DecodeContext,
) -> Result<(), DecodeError> {
    for f in fields {
        let offset = r.position();
        let v = match decode_field(r, f, ctx) {
            Ok(v) => v,
            Err(e) => {
                // Report the failing field's start, not how far a string scan got.
                r.set_position(offset);
                return Err(e);
            }
        };
        tracing::trace!(field = %f.name, kind = %f.kind, offset, "decoded field");
        ctx.set(f.name.clone(), v);
    }
    Ok(())
}

fn decode_field(r: &mut Cursor<&[u8]>, f: &FieldDef, ctx: &DecodeContext) -> Result<Value, DecodeError> {
    if f.kind == Kind::String {
        return read_string(r, f, &ctx.values);
    }
    if f.count < 2 {
        return read_scalar(r, f);
    }
    read_array(r, f)
}

#[derive(Default)]
struct DecodeContext {
    values: HashMap<String, Value>,
}

impl DecodeContext {
    fn set(&mut self, k: String, v: Value) {
        self.values.insert(k, v);
    }
}
