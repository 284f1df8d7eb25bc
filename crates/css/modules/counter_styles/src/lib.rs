//! Marker text for list items, after CSS Counter Styles Level 3.
//! <https://www.w3.org/TR/css-counter-styles-3/>
//!
//! Rendering is a pure function of `(value, style)`. Every style is total: a
//! value outside a style's range is rendered with the `decimal` fallback
//! (counter-style `range`, §3.1.2).

#![allow(
    clippy::module_name_repetitions,
    reason = "NumberingStyle reads better than Style at call sites"
)]

mod style;
mod systems;

pub use style::{CustomStyle, NumberingStyle, SymbolSystem};

/// Render `value` as marker text in `style`.
///
/// Styles that cannot represent `value` fall back to decimal rendering, so this
/// never fails. Bullet styles ignore the value entirely.
pub fn format(value: i32, style: &NumberingStyle) -> String {
    let rendered = match style {
        NumberingStyle::None => Some(String::new()),
        NumberingStyle::Disc => Some(String::from("\u{2022}")),
        NumberingStyle::Circle => Some(String::from("\u{25e6}")),
        NumberingStyle::Square => Some(String::from("\u{25aa}")),
        NumberingStyle::Decimal => None,
        NumberingStyle::DecimalLeadingZero => Some(systems::decimal_leading_zero(value)),
        NumberingStyle::LowerRoman => systems::roman(value).map(|text| text.to_ascii_lowercase()),
        NumberingStyle::UpperRoman => systems::roman(value),
        NumberingStyle::LowerAlpha => systems::alphabetic(value, &systems::LATIN_LOWER),
        NumberingStyle::UpperAlpha => systems::alphabetic(value, &systems::LATIN_UPPER),
        NumberingStyle::LowerGreek => systems::alphabetic(value, &systems::GREEK_LOWER),
        NumberingStyle::Custom(custom) => custom.render(value),
    };
    rendered.unwrap_or_else(|| {
        if !matches!(style, NumberingStyle::Decimal) {
            log::trace!("{style:?} cannot represent {value}, using decimal");
        }
        value.to_string()
    })
}

/// Append the conventional suffix of `style` to already rendered marker text.
///
/// Empty text stays empty so `list-style-type: none` never paints a lone suffix.
pub fn with_suffix(text: &str, style: &NumberingStyle) -> String {
    if text.is_empty() {
        return String::new();
    }
    let suffix = style.suffix();
    let mut out = String::with_capacity(text.len() + suffix.len());
    out.push_str(text);
    out.push_str(suffix);
    out
}
