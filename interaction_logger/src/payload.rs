//! Request payload for `/api/log_interaction` and the text coercion that builds it.

use serde::Serialize;
use serde_json::Number;

/// Raw state of the form at the moment it was submitted.
///
/// Text inputs hold exactly what the user typed; nothing has been trimmed or
/// validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub student_id: String,
    pub content_id: String,
    pub score: String,
    pub time_spent: String,
    pub completed: bool,
}

/// JSON body posted for one interaction.
///
/// `None` serializes as `null`. For the two id fields that means the text
/// did not parse; for the optional fields it also covers an empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionPayload {
    pub student_id: Option<Number>,
    pub content_id: Option<Number>,
    pub score: Option<Number>,
    pub time_spent_seconds: Option<Number>,
    pub completed: bool,
}

impl InteractionPayload {
    pub fn from_form(form: &FormSnapshot) -> Self {
        Self {
            student_id: parse_int(&form.student_id),
            content_id: parse_int(&form.content_id),
            score: optional_int(&form.score),
            time_spent_seconds: optional_int(&form.time_spent),
            completed: form.completed,
        }
    }
}

impl From<&FormSnapshot> for InteractionPayload {
    fn from(form: &FormSnapshot) -> Self {
        Self::from_form(form)
    }
}

/// Empty input is absent; anything else goes through [`parse_int`].
pub fn optional_int(raw: &str) -> Option<Number> {
    if raw.is_empty() {
        None
    } else {
        parse_int(raw)
    }
}

/// Lenient integer parse in the style of a browser's `parseInt`.
///
/// Leading whitespace and an optional sign are skipped, a `0x` prefix selects
/// base 16, and the longest run of digits is taken with any trailing text
/// ignored (`"12abc"` is 12, `"3.7"` is 3). Integers beyond `i64` are kept as
/// the nearest `f64`. Returns `None` when no digits are found or the value
/// overflows to infinity.
pub fn parse_int(raw: &str) -> Option<Number> {
    let s = raw.trim_start_matches(is_js_whitespace);

    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = s
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return None;
    }

    if let Ok(magnitude) = i128::from_str_radix(digits, radix) {
        let value = if negative { -magnitude } else { magnitude };
        if let Ok(value) = i64::try_from(value) {
            return Some(value.into());
        }
    }

    let magnitude = if radix == 10 {
        digits.parse::<f64>().ok()?
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
    };
    Number::from_f64(if negative { -magnitude } else { magnitude })
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
