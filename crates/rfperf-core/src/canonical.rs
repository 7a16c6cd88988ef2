//! # Canonical Serialization: Stable Bytes for Traceability Hashes
//!
//! This module defines `CanonicalBytes`, the sole construction path for
//! bytes used in digest computation across rfperf.
//!
//! ## Invariant
//!
//! Requirement-set hashes are stored alongside test runs and compared
//! across tool versions. The bytes they are computed over must therefore
//! be identical to the ones produced by the original analysis tool, which
//! serialized with `json.dumps(obj, sort_keys=True)`:
//!
//! 1. **Sorted keys** at every nesting depth, by code point.
//! 2. **Spaced separators**: `", "` between items and `": "` after keys.
//! 3. **Float repr**: shortest round-trip digits. Scientific notation with
//!    an explicit exponent sign and at least two exponent digits
//!    (`1e+16`, `1e-05`) when the decimal exponent is below -4 or at
//!    least 16; fixed notation otherwise, integral values keeping a
//!    trailing `.0`.
//! 4. **ASCII-only output**: every non-ASCII code point and DEL is written
//!    as a lowercase `\uXXXX` escape, with surrogate pairs above U+FFFF.
//!
//! The inner `Vec<u8>` is private, so code that needs canonical bytes
//! for hashing has to go through [`CanonicalBytes::new()`].

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by the canonical serialization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// The value is lowered to a JSON tree, every object is re-keyed in
    /// sorted order, and the tree is written with [`LegacyJsonFormatter`].
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let sorted = sort_keys(value);
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, LegacyJsonFormatter);
        sorted.serialize(&mut ser)?;
        Ok(Self(out))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Rebuild every object in the tree with its keys in sorted order.
///
/// `serde_json::Map` is already ordered unless `preserve_order` is enabled
/// somewhere in the dependency graph; rebuilding keeps the output stable
/// either way.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// `serde_json` formatter reproducing the legacy hash layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyJsonFormatter;

impl Formatter for LegacyJsonFormatter {
    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        // Quotes, backslashes and C0 controls are escaped by serde_json
        // before reaching this point.
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\u{7f}' {
                let mut buf = [0u8; 1];
                writer.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Format a float the way the legacy tool printed it (`repr(float)`).
///
/// Used both for canonical bytes and for the limit and band values quoted
/// in human-readable failure reasons.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "7.959e0".
    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let decpt = exponent + 1;

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }

    if decpt > -4 && decpt <= 16 {
        if decpt <= 0 {
            out.push_str("0.");
            out.push_str(&"0".repeat(decpt.unsigned_abs() as usize));
            out.push_str(&digits);
        } else {
            let point = decpt as usize;
            if point >= digits.len() {
                out.push_str(&digits);
                out.push_str(&"0".repeat(point - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..point]);
                out.push('.');
                out.push_str(&digits[point..]);
            }
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{sign}{:02}", exponent.unsigned_abs()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_str(value: &Value) -> String {
        let cb = CanonicalBytes::new(value).expect("should canonicalize");
        String::from_utf8(cb.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_sorted_keys_with_spaced_separators() {
        let data = serde_json::json!({"b": 2, "a": 1, "c": "hello"});
        assert_eq!(canonical_str(&data), r#"{"a": 1, "b": 2, "c": "hello"}"#);
    }

    #[test]
    fn test_nested_objects_sorted() {
        let data = serde_json::json!({
            "outer": {"z": true, "a": null},
            "list": [3, 2, 1]
        });
        assert_eq!(
            canonical_str(&data),
            r#"{"list": [3, 2, 1], "outer": {"a": null, "z": true}}"#
        );
    }

    #[test]
    fn test_float_layout_matches_legacy_repr() {
        // json.dumps({'b': 1e16, 'a': [0.00001, 1e9, -10.0, 'é\x7f']}, sort_keys=True)
        let data = serde_json::json!({"b": 1e16, "a": [0.00001, 1e9, -10.0, "\u{e9}\u{7f}"]});
        assert_eq!(
            canonical_str(&data),
            r#"{"a": [1e-05, 1000000000.0, -10.0, "\u00e9\u007f"], "b": 1e+16}"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(canonical_str(&serde_json::json!({})), "{}");
        assert_eq!(canonical_str(&serde_json::json!([])), "[]");
    }

    #[test]
    fn test_control_characters_escaped() {
        let data = serde_json::json!({"k": "a\nb\u{1}"});
        assert_eq!(canonical_str(&data), r#"{"k": "a\nb\u0001"}"#);
    }

    #[test]
    fn test_astral_code_point_uses_surrogate_pair() {
        let data = serde_json::json!("\u{1F4E1}");
        assert_eq!(canonical_str(&data), r#""\ud83d\udce1""#);
    }

    #[test]
    fn test_format_float_fixed_range() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-10.0), "-10.0");
        assert_eq!(format_float(2.5e8), "250000000.0");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(123.456), "123.456");
        assert_eq!(format_float(-7.959), "-7.959");
        assert_eq!(format_float(0.1), "0.1");
    }

    #[test]
    fn test_format_float_scientific_range() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(1.5e300), "1.5e+300");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
    }

    #[test]
    fn test_format_float_special_values() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }
}
