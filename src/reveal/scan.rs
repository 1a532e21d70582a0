//! Scan: Grapheme units and math delimiter matching.
//!
//! The source text is split once into extended grapheme clusters. The
//! reveal cursor counts these units, so a prefix is always a valid
//! `&str` and never ends inside a combining sequence.

use unicode_segmentation::UnicodeSegmentation;

/// Width of a math delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// Inline math, `$...$`.
    Single,
    /// Display math, `$$...$$`.
    Double,
}

impl Delimiter {
    /// Number of units the delimiter occupies.
    pub const fn width(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Source text split into grapheme units.
#[derive(Debug, Clone)]
pub struct Units {
    text: String,
    /// Byte offset where each unit starts, followed by `text.len()`.
    bounds: Vec<usize>,
}

impl Units {
    /// Split `text` into grapheme units.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self { text, bounds }
    }

    /// Number of units.
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Check if there are no units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the unit at `index`.
    pub fn unit(&self, index: usize) -> Option<&str> {
        if index < self.len() {
            Some(&self.text[self.bounds[index]..self.bounds[index + 1]])
        } else {
            None
        }
    }

    /// Byte offset of the end of the first `units` units.
    #[inline]
    pub fn byte_offset(&self, units: usize) -> usize {
        self.bounds[units.min(self.len())]
    }

    /// The text made of the first `units` units.
    #[inline]
    pub fn prefix(&self, units: usize) -> &str {
        &self.text[..self.byte_offset(units)]
    }

    /// Check if the unit at `index` is exactly the delimiter character.
    pub fn is_delimiter(&self, index: usize, delimiter: char) -> bool {
        self.unit(index).is_some_and(|unit| is_single_char(unit, delimiter))
    }

    /// Classify the delimiter opening at `index`, if any.
    ///
    /// Two adjacent delimiter units form a double delimiter.
    pub fn delimiter_at(&self, index: usize, delimiter: char) -> Option<Delimiter> {
        if !self.is_delimiter(index, delimiter) {
            return None;
        }
        if self.is_delimiter(index + 1, delimiter) {
            Some(Delimiter::Double)
        } else {
            Some(Delimiter::Single)
        }
    }

    /// Find the start of the next `kind` delimiter at or after `from`.
    pub fn find_closing(&self, from: usize, kind: Delimiter, delimiter: char) -> Option<usize> {
        match kind {
            Delimiter::Single => (from..self.len()).find(|&j| self.is_delimiter(j, delimiter)),
            Delimiter::Double => (from..self.len().saturating_sub(1))
                .find(|&j| self.is_delimiter(j, delimiter) && self.is_delimiter(j + 1, delimiter)),
        }
    }

    /// The span opening at `index`: its kind and the index just past its
    /// closing delimiter. `None` for ordinary units and stray delimiters.
    pub fn span_at(&self, index: usize, delimiter: char) -> Option<(Delimiter, usize)> {
        let kind = self.delimiter_at(index, delimiter)?;
        let close = self.find_closing(index + kind.width(), kind, delimiter)?;
        Some((kind, close + kind.width()))
    }

    /// Index of the next unit at or after `from` that opens a closed span,
    /// or `len()` if none.
    pub fn next_span_start(&self, from: usize, delimiter: char) -> usize {
        (from..self.len())
            .find(|&j| self.span_at(j, delimiter).is_some())
            .unwrap_or_else(|| self.len())
    }
}

fn is_single_char(unit: &str, ch: char) -> bool {
    let mut chars = unit.chars();
    chars.next() == Some(ch) && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_ascii() {
        let units = Units::new("abc");
        assert_eq!(units.len(), 3);
        assert_eq!(units.unit(1), Some("b"));
        assert_eq!(units.unit(3), None);
        assert_eq!(units.prefix(2), "ab");
        assert_eq!(units.prefix(10), "abc");
    }

    #[test]
    fn test_units_graphemes() {
        // "e" + combining acute, then a CJK character
        let units = Units::new("e\u{301}日x");
        assert_eq!(units.len(), 3);
        assert_eq!(units.prefix(1), "e\u{301}");
        assert_eq!(units.prefix(2), "e\u{301}日");
    }

    #[test]
    fn test_units_empty() {
        let units = Units::new("");
        assert!(units.is_empty());
        assert_eq!(units.prefix(0), "");
        assert_eq!(units.byte_offset(5), 0);
    }

    #[test]
    fn test_delimiter_at() {
        let units = Units::new("a $x$ $$y$$");
        assert_eq!(units.delimiter_at(0, '$'), None);
        assert_eq!(units.delimiter_at(2, '$'), Some(Delimiter::Single));
        assert_eq!(units.delimiter_at(6, '$'), Some(Delimiter::Double));
    }

    #[test]
    fn test_delimiter_with_combining_mark_is_not_a_delimiter() {
        let units = Units::new("$\u{301}x");
        assert_eq!(units.delimiter_at(0, '$'), None);
    }

    #[test]
    fn test_find_closing() {
        let units = Units::new("$x+y$ b");
        assert_eq!(units.find_closing(1, Delimiter::Single, '$'), Some(4));

        let units = Units::new("$$E=mc^2$$");
        assert_eq!(units.find_closing(2, Delimiter::Double, '$'), Some(8));

        let units = Units::new("cost is $5 total");
        assert_eq!(units.find_closing(9, Delimiter::Single, '$'), None);

        // A lone closing `$` does not close a double span
        let units = Units::new("$$x$ y");
        assert_eq!(units.find_closing(2, Delimiter::Double, '$'), None);
    }

    #[test]
    fn test_span_at() {
        let units = Units::new("a $x$ $$y$$ $5");
        assert_eq!(units.span_at(0, '$'), None);
        assert_eq!(units.span_at(2, '$'), Some((Delimiter::Single, 5)));
        assert_eq!(units.span_at(6, '$'), Some((Delimiter::Double, 11)));
        assert_eq!(units.span_at(12, '$'), None);
    }

    #[test]
    fn test_next_span_start_skips_stray_delimiters() {
        let units = Units::new("ab$c");
        assert_eq!(units.next_span_start(0, '$'), 4);

        let units = Units::new("$x$ ab$ c");
        assert_eq!(units.next_span_start(0, '$'), 0);
        assert_eq!(units.next_span_start(3, '$'), 9);

        // An unclosed `$$` whose second unit opens a single span
        let units = Units::new("$$a$");
        assert_eq!(units.next_span_start(0, '$'), 1);
    }
}
