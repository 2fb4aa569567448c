//! Decode fuzz target: arbitrary bytes against a schema using every length rule.
//! Decoding must not panic and a reported extent must stay within the input.
//! Build with: cargo fuzz run decode_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
const SCHEMA: &str = r#"
n: uint16 le;
s: string[n];
t: string[3];
c: string nul;
a: int32[4];
f: float64;
"#;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let schema = fieldspec::Schema::parse(SCHEMA).expect("fuzz schema");
    let (extent, _) = fieldspec::Decoder::new(schema).decode_with_extent(data);
    assert!(extent <= data.len());
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}
