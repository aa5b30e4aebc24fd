//! Sidecar serialization.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mdata_store::{MetadataFile, Value};

/// Serializes every field of `file` in insertion order, one line per field.
///
/// The output is deterministic for a given store. Sticky flags are not
/// written; the format has no slot for them.
pub fn serialize(file: &MetadataFile) -> String {
    let mut out = String::new();
    for field in file.fields() {
        let kind = field.value().kind();
        let name = field.name();
        // Writing to a String cannot fail.
        let _ = match field.value() {
            Value::Int(v) => writeln!(out, "{kind} {name} {v}"),
            Value::Uint64(v) => writeln!(out, "{kind} {name} {v}"),
            Value::String(v) => writeln!(out, "{kind} {name} {v}"),
            Value::Binary(v) => writeln!(out, "{kind} {name} {}", STANDARD.encode(v)),
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn empty_store_serializes_to_nothing() {
        assert_eq!(serialize(&MetadataFile::new()), "");
    }

    #[test]
    fn writes_one_line_per_field() {
        let mut file = MetadataFile::new();
        file.set_int("vertexCount", 128, false).unwrap();
        file.set_string("hash", "abc123", true).unwrap();
        assert_eq!(serialize(&file), "int vertexCount 128\nstring hash abc123\n");
    }

    #[test]
    fn writes_uint64_and_binary() {
        let mut file = MetadataFile::new();
        file.set_uint64("size", 5_000_000_000, false).unwrap();
        file.set_binary("blob", &[0, 1, 2, 255], false).unwrap();
        assert_eq!(
            serialize(&file),
            "uint64 size 5000000000\nbin_data blob AAEC/w==\n"
        );
    }

    #[test]
    fn string_roundtrip() {
        let mut file = MetadataFile::new();
        file.set_string("path", "textures/stone wall.png", false).unwrap();
        let back = parse(serialize(&file).as_bytes()).unwrap();
        assert_eq!(back.get_string("path"), Some("textures/stone wall.png"));
    }

    #[test]
    fn every_kind_roundtrips() {
        let mut file = MetadataFile::new();
        file.set_int("min", i32::MIN, false).unwrap();
        file.set_uint64("max", u64::MAX, true).unwrap();
        file.set_string("empty", "", false).unwrap();
        file.set_binary("raw", b"\x00\n \xff", false).unwrap();

        let back = parse(serialize(&file).as_bytes()).unwrap();
        assert_eq!(back.get_int("min"), Some(i32::MIN));
        assert_eq!(back.get_uint64("max"), Some(u64::MAX));
        assert_eq!(back.get_string("empty"), Some(""));
        assert_eq!(back.get_binary("raw"), Some(&b"\x00\n \xff"[..]));
        assert_eq!(serialize(&back), serialize(&file));
    }

    #[test]
    fn compressed_binary_roundtrip() {
        let original: Vec<u8> = (0..2048u32).map(|i| (i % 17) as u8).collect();
        let mut file = MetadataFile::new();
        file.set_binary("mesh", &original, true).unwrap();

        let back = parse(serialize(&file).as_bytes()).unwrap();
        assert_eq!(back.get_binary_decompressed("mesh").unwrap(), Some(original));
    }

    #[test]
    fn output_is_deterministic() {
        let mut file = MetadataFile::new();
        file.set_int("a", 1, false).unwrap();
        file.set_string("b", "x", false).unwrap();
        assert_eq!(serialize(&file), serialize(&file.clone()));
    }
}
