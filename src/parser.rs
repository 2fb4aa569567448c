//! Parse schema text into field definitions using PEST.
//!
//! ```text
//! endian little;          # default byte order for the fields below (initially big)
//! len:   uint8;
//! name:  string[len];     # byte length taken from `len`
//! tag:   string[4];       # fixed byte length
//! label: string nul;      # null-terminated
//! pts:   int16[3] be;     # fixed array, byte order override
//! ```

use crate::error::SchemaError;
use crate::field::{Endianness, FieldDef};
use crate::kind::Kind;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SchemaParser;

/// Parse schema text into an ordered field list. The result is not validated;
/// [`crate::Schema::parse`] parses and validates in one step.
pub fn parse(source: &str) -> Result<Vec<FieldDef>, SchemaError> {
    let pairs = SchemaParser::parse(Rule::schema, source)
        .map_err(|e| SchemaError::Parse(e.to_string()))?;
    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| SchemaError::Parse("empty parse".to_string()))?;

    let mut endian = Endianness::Big;
    let mut fields = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::endian_directive => {
                let order = inner
                    .into_inner()
                    .next()
                    .ok_or_else(|| SchemaError::Parse("endian: missing byte order".to_string()))?;
                endian = parse_byte_order(order.as_str());
            }
            Rule::field => fields.push(build_field(inner, endian)?),
            _ => {}
        }
    }
    tracing::debug!(fields = fields.len(), "parsed schema");
    Ok(fields)
}

fn build_field(pair: pest::iterators::Pair<Rule>, default_endian: Endianness) -> Result<FieldDef, SchemaError> {
    let mut it = pair.into_inner();
    let name = it
        .next()
        .ok_or_else(|| SchemaError::Parse("field: missing name".to_string()))?
        .as_str()
        .to_string();
    let kind_str = it
        .next()
        .ok_or_else(|| SchemaError::Parse(format!("field {}: missing kind", name)))?
        .as_str();
    let kind = Kind::from_name(kind_str);
    if kind == Kind::Unspecified {
        return Err(SchemaError::UnknownKind {
            field: name,
            kind: kind_str.to_string(),
        });
    }

    let mut def = FieldDef::new(kind, name).with_endian(default_endian);
    for part in it {
        match part.as_rule() {
            Rule::length_spec => apply_length(&mut def, part)?,
            Rule::modifier => {
                let m = part
                    .into_inner()
                    .next()
                    .ok_or_else(|| SchemaError::Parse(format!("field {}: empty modifier", def.name)))?;
                match m.as_rule() {
                    Rule::byte_order => def.endian = parse_byte_order(m.as_str()),
                    Rule::nul => {
                        if def.kind != Kind::String {
                            return Err(SchemaError::Parse(format!(
                                "field {}: nul only applies to strings",
                                def.name
                            )));
                        }
                        def.null_terminated = true;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
    Ok(def)
}

fn apply_length(def: &mut FieldDef, pair: pest::iterators::Pair<Rule>) -> Result<(), SchemaError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| SchemaError::Parse(format!("field {}: empty length", def.name)))?;
    match inner.as_rule() {
        Rule::number => {
            def.count = inner.as_str().parse().map_err(|_| SchemaError::InvalidCount {
                field: def.name.clone(),
                count: inner.as_str().to_string(),
            })?;
        }
        Rule::ident if def.kind == Kind::String => {
            def.length_var = Some(inner.as_str().to_string());
        }
        _ => {
            return Err(SchemaError::InvalidCount {
                field: def.name.clone(),
                count: inner.as_str().to_string(),
            })
        }
    }
    Ok(())
}

fn parse_byte_order(s: &str) -> Endianness {
    match s {
        "little" | "le" => Endianness::Little,
        _ => Endianness::Big,
    }
}
