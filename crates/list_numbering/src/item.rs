use crate::cache::ValueCache;
use css_counter_styles::NumberingStyle;

/// Numbering state of one list item (an `<li>` or any `display: list-item` box).
#[derive(Debug, Default)]
pub struct ListItem {
    /// The `value` attribute, already parsed by the attribute collaborator.
    explicit_value: Option<i32>,
    /// Keeps its tree position but takes no ordinal and is skipped by neighbours.
    excluded: bool,
    /// Computed `list-style-type` of the item itself, when the style layer set one.
    style: Option<NumberingStyle>,
    cache: ValueCache,
}

impl ListItem {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn explicit_value(&self) -> Option<i32> {
        self.explicit_value
    }

    #[inline]
    pub fn has_explicit_value(&self) -> bool {
        self.explicit_value.is_some()
    }

    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    #[inline]
    pub fn style(&self) -> Option<&NumberingStyle> {
        self.style.as_ref()
    }

    #[inline]
    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    /// Returns `true` when the stored value actually changed.
    pub(crate) fn set_explicit_value(&mut self, value: Option<i32>) -> bool {
        if self.explicit_value == value {
            return false;
        }
        self.explicit_value = value;
        true
    }

    /// Returns `true` when the flag actually changed.
    pub(crate) fn set_excluded(&mut self, excluded: bool) -> bool {
        if self.excluded == excluded {
            return false;
        }
        self.excluded = excluded;
        true
    }

    pub(crate) fn set_style(&mut self, style: Option<NumberingStyle>) {
        self.style = style;
    }
}
