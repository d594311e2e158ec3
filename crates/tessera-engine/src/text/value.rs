/// Anything the text printer can render.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintValue {
    Integer(i64),
    Boolean(bool),
    Float(f64),
    Text(String),
}

impl PrintValue {
    /// The printed string. Floats use six decimals, then `digits` truncation;
    /// `digits` is ignored for every other variant.
    pub fn render(&self, digits: Option<usize>) -> String {
        match self {
            PrintValue::Integer(v) => v.to_string(),
            PrintValue::Boolean(true) => "True".to_owned(),
            PrintValue::Boolean(false) => "False".to_owned(),
            PrintValue::Float(v) => truncate_digits(&format!("{v:.6}"), digits).to_owned(),
            PrintValue::Text(s) => s.clone(),
        }
    }
}

macro_rules! integer_from {
    ($($t:ty),*) => {$(
        impl From<$t> for PrintValue {
            #[inline]
            fn from(v: $t) -> Self {
                PrintValue::Integer(i64::from(v))
            }
        }
    )*};
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for PrintValue {
    #[inline]
    fn from(v: bool) -> Self {
        PrintValue::Boolean(v)
    }
}

impl From<f32> for PrintValue {
    #[inline]
    fn from(v: f32) -> Self {
        PrintValue::Float(f64::from(v))
    }
}

impl From<f64> for PrintValue {
    #[inline]
    fn from(v: f64) -> Self {
        PrintValue::Float(v)
    }
}

impl From<&str> for PrintValue {
    #[inline]
    fn from(v: &str) -> Self {
        PrintValue::Text(v.to_owned())
    }
}

impl From<String> for PrintValue {
    #[inline]
    fn from(v: String) -> Self {
        PrintValue::Text(v)
    }
}

/// Cuts `text` after `digits` places past its first `.`.
///
/// `None` leaves the text alone, `Some(0)` also drops the point. Text without
/// a point, or with fewer places than requested, is returned whole. This is
/// truncation, never rounding.
pub fn truncate_digits(text: &str, digits: Option<usize>) -> &str {
    let (Some(digits), Some(dot)) = (digits, text.find('.')) else {
        return text;
    };
    let places = dot + 1;
    if digits == 0 {
        return &text[..dot];
    }
    let end = text[places..]
        .char_indices()
        .nth(digits)
        .map_or(text.len(), |(at, _)| places + at);
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_digits ───────────────────────────────────────────────────

    #[test]
    fn truncates_without_rounding() {
        assert_eq!(truncate_digits("3.14159", Some(2)), "3.14");
        assert_eq!(truncate_digits("2.999999", Some(1)), "2.9");
    }

    #[test]
    fn zero_digits_strips_the_point() {
        assert_eq!(truncate_digits("3.14159", Some(0)), "3");
    }

    #[test]
    fn none_is_unchanged() {
        assert_eq!(truncate_digits("3.14159", None), "3.14159");
    }

    #[test]
    fn short_or_pointless_text_is_kept_whole() {
        assert_eq!(truncate_digits("3.1", Some(4)), "3.1");
        assert_eq!(truncate_digits("42", Some(2)), "42");
    }

    #[test]
    fn places_are_counted_in_chars() {
        assert_eq!(truncate_digits("1.é5", Some(1)), "1.é");
        assert_eq!(truncate_digits("1.é5", Some(2)), "1.é5");
        assert_eq!(truncate_digits("2.½¾⅞", Some(2)), "2.½¾");
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn floats_use_six_decimals() {
        assert_eq!(PrintValue::from(1.5f32).render(None), "1.500000");
        assert_eq!(PrintValue::from(-0.25f64).render(Some(1)), "-0.2");
        assert_eq!(PrintValue::from(3.14159f64).render(Some(0)), "3");
    }

    #[test]
    fn digits_apply_to_floats_only() {
        assert_eq!(PrintValue::from("1.2345").render(Some(1)), "1.2345");
        assert_eq!(PrintValue::from(-17i32).render(Some(1)), "-17");
    }

    #[test]
    fn booleans_are_capitalised() {
        assert_eq!(PrintValue::from(true).render(None), "True");
        assert_eq!(PrintValue::from(false).render(None), "False");
    }
}
