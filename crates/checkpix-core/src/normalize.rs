use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Placeholder shown for empty names/dates and zero amounts.
pub const UNKNOWN: &str = "Desconhecido";

/// How a field's value is checked for the "unknown" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Date,
    Amount,
    Other,
}

/// Clean a raw field value into a single-line display string.
///
/// Absent and `null` values become the empty string. Strings keep every
/// character except line breaks, which collapse to one space per sequence.
/// Everything else is stringified.
pub fn normalize(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => sanitize(s),
        Some(Value::Number(n)) => number_to_string(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| normalize(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(object @ Value::Object(_)) => sanitize(&object.to_string()),
    }
}

/// Replace each CRLF, LF or CR sequence with a single space.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Normalize a raw value and substitute [`UNKNOWN`] where the field kind
/// treats the value as missing.
pub fn format_field(kind: FieldKind, raw: Option<&Value>) -> String {
    apply_placeholder(kind, normalize(raw))
}

fn apply_placeholder(kind: FieldKind, cleaned: String) -> String {
    let trimmed = cleaned.trim();
    let unknown = match kind {
        FieldKind::Name | FieldKind::Date => trimmed.is_empty(),
        FieldKind::Amount => trimmed == "0" || trimmed == "0.0",
        FieldKind::Other => false,
    };
    if unknown {
        UNKNOWN.to_string()
    } else {
        cleaned
    }
}

// Integral floats print without a fraction (50.0 -> "50"), matching how the
// service's amounts are displayed elsewhere.
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(text: &str) -> Value {
        Value::String(text.to_string())
    }

    #[test]
    fn test_null_and_absent_are_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some(&Value::Null)), "");
    }

    #[test]
    fn test_line_breaks_become_single_space() {
        assert_eq!(normalize(Some(&s("Ana\r\nSilva"))), "Ana Silva");
        assert_eq!(normalize(Some(&s("a\nb\rc"))), "a b c");
        assert_eq!(normalize(Some(&s("a\n\nb"))), "a  b");
        assert_eq!(normalize(Some(&s("a\r\r\nb"))), "a  b");
    }

    #[test]
    fn test_other_characters_untouched() {
        let raw = "  R$ 1.234,56\t(Pix) ";
        assert_eq!(normalize(Some(&s(raw))), raw);
    }

    #[test]
    fn test_numbers_are_stringified() {
        assert_eq!(normalize(Some(&json!(50))), "50");
        assert_eq!(normalize(Some(&json!(50.0))), "50");
        assert_eq!(normalize(Some(&json!(0.5))), "0.5");
        assert_eq!(normalize(Some(&json!(-12.75))), "-12.75");
        assert_eq!(normalize(Some(&json!(0.0))), "0");
    }

    #[test]
    fn test_other_shapes_are_stringified() {
        assert_eq!(normalize(Some(&json!(true))), "true");
        assert_eq!(normalize(Some(&json!(["a", 1, null]))), "a,1,");
        assert_eq!(normalize(Some(&json!({"k": "v"}))), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_empty_name_and_date_are_unknown() {
        assert_eq!(format_field(FieldKind::Name, Some(&s("   "))), UNKNOWN);
        assert_eq!(format_field(FieldKind::Date, None), UNKNOWN);
        assert_eq!(format_field(FieldKind::Name, Some(&s("\r\n"))), UNKNOWN);
        assert_eq!(format_field(FieldKind::Name, Some(&s("Bob"))), "Bob");
    }

    #[test]
    fn test_zero_amount_is_unknown() {
        assert_eq!(format_field(FieldKind::Amount, Some(&s("0.0"))), UNKNOWN);
        assert_eq!(format_field(FieldKind::Amount, Some(&s(" 0 "))), UNKNOWN);
        assert_eq!(format_field(FieldKind::Amount, Some(&json!(0))), UNKNOWN);
        assert_eq!(format_field(FieldKind::Amount, Some(&s("0.5"))), "0.5");
        assert_eq!(format_field(FieldKind::Amount, Some(&s("0.00"))), "0.00");
    }

    #[test]
    fn test_empty_amount_is_kept_empty() {
        assert_eq!(format_field(FieldKind::Amount, None), "");
    }

    #[test]
    fn test_other_kind_is_plain_normalization() {
        assert_eq!(format_field(FieldKind::Other, None), "");
        assert_eq!(format_field(FieldKind::Other, Some(&s("0"))), "0");
    }

    #[test]
    fn test_untrimmed_value_is_returned_as_is() {
        assert_eq!(format_field(FieldKind::Name, Some(&s(" Bob "))), " Bob ");
    }

    #[test]
    fn test_format_is_idempotent() {
        let kinds = [
            FieldKind::Name,
            FieldKind::Date,
            FieldKind::Amount,
            FieldKind::Other,
        ];
        let inputs = ["", "   ", "0", "0.0", " 0.0 ", "Ana\r\nSilva", "50", "x\ry", "0.5"];
        for kind in kinds {
            for input in inputs {
                let once = format_field(kind, Some(&s(input)));
                let twice = format_field(kind, Some(&s(&once)));
                assert_eq!(twice, once, "{kind:?} {input:?}");
            }
        }
    }
}
