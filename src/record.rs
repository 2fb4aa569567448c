//! Decode result: the schema used and the decoded values by field name.

use crate::field::FieldDef;
use crate::schema::Schema;
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};

/// Output of one decode call. Owned by the caller; the decoder keeps no reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Schema,
    values: HashMap<String, Value>,
    consumed: usize,
}

impl Record {
    pub(crate) fn new(schema: Schema, values: HashMap<String, Value>, consumed: usize) -> Self {
        Record {
            schema,
            values,
            consumed,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn fields(&self) -> &[FieldDef] {
        self.schema.fields()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> HashMap<String, Value> {
        self.values
    }

    /// Bytes of input the record occupied.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` in schema order. A name repeated in the schema is yielded once,
    /// at its first position, with the value decoded last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        let mut seen = HashSet::new();
        self.schema.iter().filter_map(move |f| {
            if !seen.insert(f.name.as_str()) {
                return None;
            }
            self.values.get(&f.name).map(|v| (f.name.as_str(), v))
        })
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.values.len()))?;
        for (name, v) in self.iter() {
            map.serialize_entry(name, v)?;
        }
        map.end()
    }
}
