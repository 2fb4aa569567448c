//! Field definitions: the per-field descriptors a schema is made of.

use crate::kind::Kind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl Endianness {
    pub fn name(self) -> &'static str {
        match self {
            Endianness::Big => "big",
            Endianness::Little => "little",
        }
    }
}

/// One field of a record layout.
///
/// `count` of 0 or 1 means a scalar; 2 or more a fixed-size array. For strings a
/// nonzero `count` is the byte length instead. String length is resolved in the
/// order `length_var`, `count`, `null_terminated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub kind: Kind,
    pub name: String,
    pub count: usize,
    /// Name of an earlier field whose integer value is this string's byte length.
    pub length_var: Option<String>,
    pub endian: Endianness,
    pub null_terminated: bool,
}

impl FieldDef {
    /// Scalar, big-endian field.
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        FieldDef {
            kind,
            name: name.into(),
            count: 0,
            length_var: None,
            endian: Endianness::Big,
            null_terminated: false,
        }
    }

    /// Fixed-size array of `count` elements.
    pub fn array(kind: Kind, name: impl Into<String>, count: usize) -> Self {
        FieldDef::new(kind, name).with_count(count)
    }

    /// String of exactly `len` bytes.
    pub fn fixed_string(name: impl Into<String>, len: usize) -> Self {
        FieldDef::new(Kind::String, name).with_count(len)
    }

    /// String whose byte length is the decoded value of field `length_var`.
    pub fn string_sized_by(name: impl Into<String>, length_var: impl Into<String>) -> Self {
        FieldDef::new(Kind::String, name).with_length_var(length_var)
    }

    /// String running up to (not including) a zero byte.
    pub fn cstring(name: impl Into<String>) -> Self {
        FieldDef::new(Kind::String, name).null_terminated()
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_length_var(mut self, var: impl Into<String>) -> Self {
        self.length_var = Some(var.into());
        self
    }

    pub fn with_endian(mut self, endian: Endianness) -> Self {
        self.endian = endian;
        self
    }

    pub fn little_endian(self) -> Self {
        self.with_endian(Endianness::Little)
    }

    pub fn null_terminated(mut self) -> Self {
        self.null_terminated = true;
        self
    }

    pub fn is_array(&self) -> bool {
        self.kind != Kind::String && self.count >= 2
    }

    /// True when a string field has at least one way to determine its length.
    pub fn has_string_length(&self) -> bool {
        self.length_var.is_some() || self.count != 0 || self.null_terminated
    }
}
