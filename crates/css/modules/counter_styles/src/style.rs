//! The closed set of numbering styles a list marker can use.

use crate::systems;

/// A `list-style-type` value.
///
/// The predefined styles cover CSS Lists 3 §3 and the commonly shipped subset of
/// CSS Counter Styles 3 §6; anything else is expressed as a [`CustomStyle`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberingStyle {
    None,
    Disc,
    Circle,
    Square,
    #[default]
    Decimal,
    DecimalLeadingZero,
    LowerRoman,
    UpperRoman,
    /// `lower-alpha` / `lower-latin`
    LowerAlpha,
    /// `upper-alpha` / `upper-latin`
    UpperAlpha,
    LowerGreek,
    Custom(CustomStyle),
}

impl NumberingStyle {
    /// Look up a predefined style by its CSS keyword (ASCII case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let style = match keyword.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "disc" => Self::Disc,
            "circle" => Self::Circle,
            "square" => Self::Square,
            "decimal" => Self::Decimal,
            "decimal-leading-zero" => Self::DecimalLeadingZero,
            "lower-roman" => Self::LowerRoman,
            "upper-roman" => Self::UpperRoman,
            "lower-alpha" | "lower-latin" => Self::LowerAlpha,
            "upper-alpha" | "upper-latin" => Self::UpperAlpha,
            "lower-greek" => Self::LowerGreek,
            _ => return None,
        };
        Some(style)
    }

    /// Suffix painted after the marker text.
    pub fn suffix(&self) -> &str {
        match self {
            Self::None | Self::Disc | Self::Circle | Self::Square => "",
            Self::Decimal
            | Self::DecimalLeadingZero
            | Self::LowerRoman
            | Self::UpperRoman
            | Self::LowerAlpha
            | Self::UpperAlpha
            | Self::LowerGreek => ".",
            Self::Custom(custom) => &custom.suffix,
        }
    }

    /// Whether the marker text depends on the item's ordinal at all.
    pub const fn is_ordinal(&self) -> bool {
        !matches!(self, Self::None | Self::Disc | Self::Circle | Self::Square)
    }
}

/// Counter style algorithms supported for custom styles.
///
/// CSS Counter Styles 3 §3.1.1 (`system`). `fixed` and `additive` are not
/// offered; roman numerals are the only additive style and are predefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolSystem {
    Cyclic,
    Numeric,
    Alphabetic,
    Symbolic,
}

/// An author-defined `@counter-style` reduced to what marker rendering needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CustomStyle {
    pub system: SymbolSystem,
    pub symbols: Vec<String>,
    pub suffix: String,
}

impl CustomStyle {
    pub fn new<I, S>(system: SymbolSystem, symbols: I, suffix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            system,
            symbols: symbols.into_iter().map(Into::into).collect(),
            suffix: suffix.into(),
        }
    }

    /// Render `value`, or `None` when it is outside this style's range.
    pub(crate) fn render(&self, value: i32) -> Option<String> {
        let symbols: Vec<&str> = self.symbols.iter().map(String::as_str).collect();
        match self.system {
            SymbolSystem::Cyclic => systems::cyclic(value, &symbols),
            SymbolSystem::Numeric => systems::numeric(value, &symbols),
            SymbolSystem::Alphabetic => systems::alphabetic(value, &symbols),
            SymbolSystem::Symbolic => systems::symbolic(value, &symbols),
        }
    }
}
