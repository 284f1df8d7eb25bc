//! List containers and how they seed the numbering of their items.
//! HTML: <https://html.spec.whatwg.org/multipage/grouping-content.html#the-ol-element>

use css_counter_styles::NumberingStyle;

/// Attributes of a numbering context (an `<ol>`, `<ul>` or `<menu>`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListScope {
    /// The `start` attribute. Without it the first ordinal is 1, or the item
    /// count for reversed lists.
    pub start: Option<i32>,
    pub reversed: bool,
    /// Computed `list-style-type` of the container; `None` defers to the
    /// configured default.
    pub style: Option<NumberingStyle>,
}

/// Scope used for items with no list ancestor: their parent numbers them.
pub(crate) static IMPLICIT_SCOPE: ListScope = ListScope {
    start: None,
    reversed: false,
    style: None,
};

impl ListScope {
    /// An `<ol>` with default attributes.
    pub fn ordered() -> Self {
        Self::default()
    }

    /// A `<ul>`: bullets, but items are still numbered internally.
    pub fn unordered() -> Self {
        Self {
            style: Some(NumberingStyle::Disc),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: i32) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: NumberingStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Ordinal increment between consecutive items.
    #[inline]
    pub const fn step(&self) -> i32 {
        if self.reversed { -1 } else { 1 }
    }

    /// Whether every ordinal in the scope hangs off the number of items, so a
    /// structural change anywhere renumbers everything.
    #[inline]
    pub const fn depends_on_item_count(&self) -> bool {
        self.reversed && self.start.is_none()
    }

    /// Ordinal of the first item. `item_count` is only consulted for reversed
    /// lists without an explicit `start`.
    pub fn first_value(&self, item_count: impl FnOnce() -> usize) -> i32 {
        match self.start {
            Some(start) => start,
            None if self.reversed => i32::try_from(item_count()).unwrap_or(i32::MAX),
            None => 1,
        }
    }
}
