//! Schema: an ordered, shared, read-only list of field definitions.

use crate::error::SchemaError;
use crate::field::FieldDef;
use crate::kind::Kind;
use std::collections::HashMap;
use std::sync::Arc;

/// Field list shared between a decoder and every record it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Arc<[FieldDef]>,
}

impl Schema {
    /// Wrap a field list without checking it. Duplicate names and bad length
    /// references surface at decode time, as decode errors or overwritten values.
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Schema {
            fields: fields.into(),
        }
    }

    /// Wrap a field list after [`Schema::validate`] accepts it.
    pub fn resolve(fields: Vec<FieldDef>) -> Result<Self, SchemaError> {
        let schema = Schema::new(fields);
        schema.validate()?;
        Ok(schema)
    }

    /// Parse schema text (see [`crate::parser`]) and validate it.
    pub fn parse(source: &str) -> Result<Self, SchemaError> {
        Schema::resolve(crate::parser::parse(source)?)
    }

    /// Reject schemas that can never decode cleanly: empty or duplicate names,
    /// unspecified kinds, strings without a length rule, length variables that
    /// do not name an earlier scalar integer field, and length variables on
    /// anything but a string.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen: HashMap<&str, &FieldDef> = HashMap::new();
        for f in self.fields.iter() {
            if f.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if f.kind == Kind::Unspecified {
                return Err(SchemaError::UnspecifiedKind {
                    field: f.name.clone(),
                });
            }
            if f.kind != Kind::String {
                if let Some(ref var) = f.length_var {
                    return Err(SchemaError::LengthVariableOnNonString {
                        field: f.name.clone(),
                        variable: var.clone(),
                    });
                }
            } else {
                if !f.has_string_length() {
                    return Err(SchemaError::MissingStringLength {
                        field: f.name.clone(),
                    });
                }
                if let Some(ref var) = f.length_var {
                    let ok = seen
                        .get(var.as_str())
                        .map(|src| src.kind.is_integer() && !src.is_array())
                        .unwrap_or(false);
                    if !ok {
                        return Err(SchemaError::UndefinedLengthVariable {
                            field: f.name.clone(),
                            variable: var.clone(),
                        });
                    }
                }
            }
            if seen.insert(f.name.as_str(), f).is_some() {
                return Err(SchemaError::DuplicateName(f.name.clone()));
            }
        }
        Ok(())
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Last field with this name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().rev().find(|f| f.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDef> {
        self.fields.iter()
    }
}

impl From<Vec<FieldDef>> for Schema {
    fn from(fields: Vec<FieldDef>) -> Self {
        Schema::new(fields)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDef;
    type IntoIter = std::slice::Iter<'a, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
