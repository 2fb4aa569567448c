//! Format decoded records for display (one `name: value` line per field).

use crate::record::Record;
use crate::value::{Array, Value};

/// Raw scalar string.
pub fn format_scalar(v: &Value) -> String {
    match v {
        Value::U8(x) => format!("{}", x),
        Value::I8(x) => format!("{}", x),
        Value::U16(x) => format!("{}", x),
        Value::I16(x) => format!("{}", x),
        Value::U32(x) => format!("{}", x),
        Value::I32(x) => format!("{}", x),
        Value::U64(x) => format!("{}", x),
        Value::I64(x) => format!("{}", x),
        Value::F32(x) => format!("{}", x),
        Value::F64(x) => format!("{}", x),
        Value::Text(b) => format_text(b),
        Value::Array(a) => format_array(a),
    }
}

/// Quoted text; falls back to hex when the bytes are not UTF-8.
fn format_text(b: &[u8]) -> String {
    match std::str::from_utf8(b) {
        Ok(s) => format!("{:?}", s),
        Err(_) => format!("hex({})", hex_string(b)),
    }
}

fn format_array(a: &Array) -> String {
    let items: Vec<String> = a.iter().map(|v| format_scalar(&v)).collect();
    format!("[{}]", items.join(", "))
}

/// Space-separated lowercase hex, e.g. `"00 0a ff"`.
pub fn hex_string(b: &[u8]) -> String {
    b.iter().map(|x| format!("{:02x}", x)).collect::<Vec<_>>().join(" ")
}

/// Multi-line dump of a record in schema order, names padded to a common width.
pub fn record_to_dump(record: &Record) -> String {
    let width = record.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(record.len());
    for (name, v) in record.iter() {
        let label = format!("{}:", name);
        lines.push(format!("{:<w$} {:<8} {}", label, v.kind().name(), format_scalar(v), w = width + 1));
    }
    lines.join("\n")
}
