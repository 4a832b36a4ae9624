//! Defensive coercion for decoded contract values.
//!
//! Chain SDKs surface loosely typed payloads, and different deployments
//! spell the same field in camelCase or snake_case. Every lookup here
//! falls back instead of failing; the mappers decide which absences are
//! fatal.

use serde_json::{Map, Value};

/// Looks up the first present field among `names`.
pub fn field<'a>(obj: Option<&'a Map<String, Value>>, names: &[&str]) -> Option<&'a Value> {
    let obj = obj?;
    names.iter().find_map(|name| obj.get(*name))
}

/// Coerces a value into a string, stringifying numbers.
///
/// Anything that is neither a string nor a number yields `fallback`.
pub fn as_string(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_owned(),
    }
}

/// Coerces a value into a finite number, parsing numeric strings.
pub fn as_number(value: Option<&Value>, fallback: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(fallback),
        Some(Value::String(s)) => match s.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => parsed,
            _ => fallback,
        },
        _ => fallback,
    }
}

/// [`as_string`] over the first present field among `names`.
pub fn string_field(obj: Option<&Map<String, Value>>, names: &[&str], fallback: &str) -> String {
    as_string(field(obj, names), fallback)
}

/// [`as_number`] over the first present field among `names`.
pub fn number_field(obj: Option<&Map<String, Value>>, names: &[&str], fallback: f64) -> f64 {
    as_number(field(obj, names), fallback)
}

/// A string field that treats the empty string as absent.
pub fn optional_string_field(obj: Option<&Map<String, Value>>, names: &[&str]) -> Option<String> {
    let value = string_field(obj, names, "");
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strings_pass_through_and_numbers_stringify() {
        assert_eq!(as_string(Some(&json!("1500.25")), "0"), "1500.25");
        assert_eq!(as_string(Some(&json!(42)), "0"), "42");
        assert_eq!(as_string(Some(&json!(987654321098765432u64)), "0"), "987654321098765432");
        assert_eq!(as_string(Some(&json!(null)), "0"), "0");
        assert_eq!(as_string(Some(&json!({"nested": true})), ""), "");
        assert_eq!(as_string(None, "fallback"), "fallback");
    }

    #[test]
    fn numbers_pass_through_and_numeric_strings_parse() {
        assert_eq!(as_number(Some(&json!(92)), 0.0), 92.0);
        assert_eq!(as_number(Some(&json!("87.5")), 0.0), 87.5);
        assert_eq!(as_number(Some(&json!("not a number")), 7.0), 7.0);
        assert_eq!(as_number(Some(&json!(true)), 7.0), 7.0);
        assert_eq!(as_number(None, 7.0), 7.0);
    }

    #[test]
    fn field_lookup_prefers_earlier_spellings() {
        let value = json!({"ownerAddress": "GABC", "owner_address": "GXYZ"});
        let obj = value.as_object();
        assert_eq!(string_field(obj, &["ownerAddress", "owner_address"], ""), "GABC");
        assert_eq!(string_field(obj, &["owner_address"], ""), "GXYZ");
        assert_eq!(string_field(obj, &["missing"], "none"), "none");
    }

    #[test]
    fn optional_field_treats_empty_as_absent() {
        let value = json!({"createdAt": ""});
        assert_eq!(optional_string_field(value.as_object(), &["createdAt"]), None);

        let value = json!({"createdAt": "2024-06-01T00:00:00Z"});
        assert_eq!(
            optional_string_field(value.as_object(), &["createdAt"]).as_deref(),
            Some("2024-06-01T00:00:00Z")
        );
    }
}
