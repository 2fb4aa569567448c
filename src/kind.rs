//! Type registry: the element kinds a field can decode to, and the name/code table.

use std::fmt;

/// Element kind of a field. The discriminant is the kind code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Kind {
    #[default]
    Unspecified = 0,
    Uint8 = 1,
    Int8 = 2,
    Uint16 = 3,
    Int16 = 4,
    Uint32 = 5,
    Int32 = 6,
    Uint64 = 7,
    Int64 = 8,
    Float32 = 9,
    Float64 = 10,
    String = 11,
}

/// Kinds in code order; `KINDS[k as usize] == k`.
static KINDS: [Kind; 12] = [
    Kind::Unspecified,
    Kind::Uint8,
    Kind::Int8,
    Kind::Uint16,
    Kind::Int16,
    Kind::Uint32,
    Kind::Int32,
    Kind::Uint64,
    Kind::Int64,
    Kind::Float32,
    Kind::Float64,
    Kind::String,
];

/// Symbolic names in code order.
const NAMES: [&str; 12] = [
    "unspecified",
    "uint8",
    "int8",
    "uint16",
    "int16",
    "uint32",
    "int32",
    "uint64",
    "int64",
    "float32",
    "float64",
    "string",
];

impl Kind {
    /// Symbolic name, e.g. `"uint16"`.
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Look up a kind by symbolic name. Unknown names map to [`Kind::Unspecified`].
    pub fn from_name(name: &str) -> Kind {
        NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| KINDS[i])
            .unwrap_or(Kind::Unspecified)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Kind> {
        KINDS.get(code as usize).copied()
    }

    /// Encoded width in bytes of one element; `None` for `String` and `Unspecified`.
    pub fn width(self) -> Option<usize> {
        match self {
            Kind::Uint8 | Kind::Int8 => Some(1),
            Kind::Uint16 | Kind::Int16 => Some(2),
            Kind::Uint32 | Kind::Int32 | Kind::Float32 => Some(4),
            Kind::Uint64 | Kind::Int64 | Kind::Float64 => Some(8),
            Kind::String | Kind::Unspecified => None,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Uint8
                | Kind::Int8
                | Kind::Uint16
                | Kind::Int16
                | Kind::Uint32
                | Kind::Int32
                | Kind::Uint64
                | Kind::Int64
        )
    }

    /// All kinds in code order, `Unspecified` included.
    pub fn all() -> &'static [Kind] {
        &KINDS
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
