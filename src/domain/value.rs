//! Attribute value coercion
//!
//! Two entry points with different leniency:
//! - [`coerce_scalar`] for `create` parameters (`key=value` tokens)
//! - [`parse_literal`] for `update` values, which also understands booleans,
//!   null and nested lists/dictionaries

use serde_json::{Number, Value};

/// Coerces a `create` parameter value: integer, then float, then string.
///
/// Strings lose any surrounding quote characters and have underscores
/// replaced by spaces (`"My_little_house"` becomes `My little house`).
pub fn coerce_scalar(raw: &str) -> Value {
    if let Some(number) = parse_number(raw) {
        return Value::Number(number);
    }

    Value::String(raw.trim_matches(|c| c == '"' || c == '\'').replace('_', " "))
}

/// Interprets an `update` value as a literal, falling back to a plain string
pub fn parse_literal(raw: &str) -> Value {
    let s = raw.trim();

    if let Some(number) = parse_number(s) {
        return Value::Number(number);
    }

    match s {
        "True" | "true" => return Value::Bool(true),
        "False" | "false" => return Value::Bool(false),
        "None" | "null" => return Value::Null,
        _ => {}
    }

    if s.starts_with('[') || s.starts_with('{') {
        if let Some(value) = parse_structure(s) {
            return value;
        }
    }

    if let Some(inner) = unquote(s) {
        return Value::String(inner.to_string());
    }

    Value::String(raw.to_string())
}

/// Parses a dictionary literal into its entries, in source order.
///
/// Accepts JSON as well as single-quoted keys and strings. Returns `None`
/// if the text is not a dictionary.
pub fn parse_dict(raw: &str) -> Option<Vec<(String, Value)>> {
    let s = raw.trim();
    if !s.starts_with('{') {
        return None;
    }

    let json = pythonish_to_json(s)?;
    let entries: Vec<(String, Value)> =
        serde_json::from_str::<OrderedEntries>(&json).ok()?.0;
    Some(entries)
}

/// Removes one layer of matching surrounding quotes
pub fn unquote(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return Some(&s[1..s.len() - 1]);
        }
    }
    None
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(int) = s.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(int) = s.parse::<u64>() {
        return Some(Number::from(int));
    }

    // `inf` and `nan` parse as floats but have no JSON form
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn parse_structure(s: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(s) {
        return Some(value);
    }

    let json = pythonish_to_json(s)?;
    serde_json::from_str(&json).ok()
}

/// Rewrites single-quoted strings and `True`/`False`/`None` into JSON
fn pythonish_to_json(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                out.push('"');
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    match inner {
                        '\\' => {
                            let escaped = chars.next()?;
                            if escaped == '\'' {
                                out.push('\'');
                            } else {
                                out.push('\\');
                                out.push(escaped);
                            }
                        }
                        q if q == c => {
                            closed = true;
                            break;
                        }
                        '"' => out.push_str("\\\""),
                        other => out.push(other),
                    }
                }
                if !closed {
                    return None;
                }
                out.push('"');
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" => out.push_str("null"),
                    _ => out.push_str(&word),
                }
            }
            other => out.push(other),
        }
    }

    Some(out)
}

/// JSON object entries kept in document order
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> serde::Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a dictionary of attributes")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.retain(|(k, _): &(String, Value)| k != &key);
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn coerce_integer() {
        assert_eq!(coerce_scalar("23"), json!(23));
        assert_eq!(coerce_scalar("-4"), json!(-4));
    }

    #[test]
    fn coerce_float() {
        assert_eq!(coerce_scalar("37.77"), json!(37.77));
        assert_eq!(coerce_scalar("1.0"), json!(1.0));
    }

    #[test]
    fn coerce_string_strips_quotes_and_underscores() {
        assert_eq!(coerce_scalar("\"Betty\""), json!("Betty"));
        assert_eq!(coerce_scalar("\"My_little_house\""), json!("My little house"));
        assert_eq!(coerce_scalar("'single'"), json!("single"));
    }

    #[test]
    fn coerce_quoted_number_stays_string() {
        assert_eq!(coerce_scalar("\"23\""), json!("23"));
    }

    #[test]
    fn coerce_large_integer() {
        let max = coerce_scalar("18446744073709551615");
        assert!(max.is_u64());
        assert_eq!(max, json!(u64::MAX));
    }

    #[test]
    fn coerce_non_finite_is_string() {
        assert_eq!(coerce_scalar("inf"), json!("inf"));
        assert_eq!(coerce_scalar("nan"), json!("nan"));
    }

    #[test]
    fn literal_scalars() {
        assert_eq!(parse_literal("89"), json!(89));
        assert_eq!(parse_literal("2.5"), json!(2.5));
        assert_eq!(parse_literal("True"), json!(true));
        assert_eq!(parse_literal("false"), json!(false));
        assert_eq!(parse_literal("None"), Value::Null);
    }

    #[test]
    fn literal_quoted_string() {
        assert_eq!(parse_literal("\"a@b.com\""), json!("a@b.com"));
        assert_eq!(parse_literal("'x'"), json!("x"));
    }

    #[test]
    fn literal_structures() {
        assert_eq!(parse_literal("[1, 2, 3]"), json!([1, 2, 3]));
        assert_eq!(parse_literal("{'a': 'b', 'c': True}"), json!({"a": "b", "c": true}));
    }

    #[test]
    fn literal_falls_back_to_string() {
        assert_eq!(parse_literal("a@b.com"), json!("a@b.com"));
        assert_eq!(parse_literal("[unterminated"), json!("[unterminated"));
        assert_eq!(parse_literal("hello world"), json!("hello world"));
    }

    #[test]
    fn dict_entries_keep_order() {
        let entries = parse_dict("{\"first_name\": \"John\", 'age': 89, \"x\": None}").unwrap();
        assert_eq!(
            entries,
            vec![
                ("first_name".to_string(), json!("John")),
                ("age".to_string(), json!(89)),
                ("x".to_string(), Value::Null),
            ]
        );
    }

    #[test]
    fn dict_rejects_non_dict() {
        assert!(parse_dict("[1, 2]").is_none());
        assert!(parse_dict("{broken").is_none());
    }

    #[test]
    fn unquote_requires_matching_pair() {
        assert_eq!(unquote("\"abc\""), Some("abc"));
        assert_eq!(unquote("'abc\""), None);
        assert_eq!(unquote("\""), None);
    }

    proptest! {
        #[test]
        fn any_integer_coerces_to_number(n in any::<i64>()) {
            prop_assert_eq!(coerce_scalar(&n.to_string()), json!(n));
            prop_assert_eq!(parse_literal(&n.to_string()), json!(n));
        }

        #[test]
        fn any_unsigned_integer_stays_integer(n in any::<u64>()) {
            let coerced = coerce_scalar(&n.to_string());
            prop_assert!(!coerced.is_f64());
            prop_assert_eq!(coerced, json!(n));
            prop_assert_eq!(parse_literal(&n.to_string()), json!(n));
        }

        #[test]
        fn words_with_underscores_become_spaced(word in "[a-z]{1,8}(_[a-z]{1,8}){0,3}") {
            let expected = word.replace('_', " ");
            prop_assert_eq!(coerce_scalar(&format!("\"{}\"", word)), Value::String(expected));
        }
    }
}
