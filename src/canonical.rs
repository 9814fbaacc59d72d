//! Canonical serialization for cache-validator hashing
//!
//! Produces one deterministic textual form per structured value, independent
//! of map construction order, so the ETag hash sees identical input across
//! processes and platforms. Mapping keys are sorted by ordinal (byte-wise)
//! comparison; sequence order is preserved because it is semantically
//! significant.

use serde_json::Value;

/// Render a value into its canonical textual form
pub fn canonicalize(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        Value::Number(number) => {
            // serde_json cannot normally hold NaN/Infinity, but a Value built
            // with arbitrary_precision or from foreign code might; never emit
            // a non-JSON-safe token.
            if let Some(float) = number.as_f64() {
                if !float.is_finite() {
                    return "null".to_string();
                }
            }
            number.to_string()
        }
        Value::String(text) => quote(text),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(canonicalize).collect();
            format!("[{}]", rendered.join(","))
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let rendered: Vec<String> = entries
                .into_iter()
                .map(|(key, val)| format!("{}:{}", quote(key), canonicalize(val)))
                .collect();
            format!("{{{}}}", rendered.join(","))
        }
    }
}

// Standard JSON string escaping: quote, backslash, the short control escapes,
// and \u00XX for the remaining control range. Everything else passes through
// verbatim.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(canonicalize(&Value::Null), "null");
        assert_eq!(canonicalize(&json!(true)), "true");
        assert_eq!(canonicalize(&json!(false)), "false");
        assert_eq!(canonicalize(&json!(42)), "42");
        assert_eq!(canonicalize(&json!(-7)), "-7");
        assert_eq!(canonicalize(&json!(1.5)), "1.5");
        assert_eq!(canonicalize(&json!("hi")), "\"hi\"");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(canonicalize(&json!("a\"b")), r#""a\"b""#);
        assert_eq!(canonicalize(&json!("a\\b")), r#""a\\b""#);
        assert_eq!(canonicalize(&json!("line\nbreak")), r#""line\nbreak""#);
        assert_eq!(canonicalize(&json!("\u{0001}")), "\"\\u0001\"");
    }

    #[test]
    fn test_map_key_order_is_not_significant() {
        let first = json!({"b": 1, "a": 2});
        let second = json!({"a": 2, "b": 1});
        assert_eq!(canonicalize(&first), canonicalize(&second));
        assert_eq!(canonicalize(&first), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_sequence_order_is_significant() {
        assert_ne!(canonicalize(&json!([1, 2])), canonicalize(&json!([2, 1])));
        assert_eq!(canonicalize(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_keys_sort_by_ordinal_comparison() {
        // 'Z' (0x5a) sorts before 'a' (0x61) byte-wise
        let value = json!({"a": 1, "Z": 2});
        assert_eq!(canonicalize(&value), r#"{"Z":2,"a":1}"#);
    }

    #[test]
    fn test_nested_structures() {
        let value = json!({
            "outer": {"b": [1, {"y": null, "x": "v"}], "a": true}
        });
        assert_eq!(
            canonicalize(&value),
            r#"{"outer":{"a":true,"b":[1,{"x":"v","y":null}]}}"#
        );
    }

    #[test]
    fn test_null_value_is_emitted_for_present_entries() {
        // Present nulls are data; only absent entries are omitted, which
        // happens at Serialize time before a Value ever exists.
        assert_eq!(canonicalize(&json!({"k": null})), r#"{"k":null}"#);
    }
}
