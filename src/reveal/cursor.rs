//! Reveal cursor: The tick-by-tick advance rule.
//!
//! The cursor walks the source text one step per tick. Ordinary text
//! advances by a fixed number of units; a delimited math span is
//! consumed whole in a single step so it never renders half-open.

use super::scan::{Delimiter, Units};
use crate::config::RevealConfig;

/// One advance of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Ordinary text in `[from, to)` was revealed.
    Prose {
        /// Cursor before the step.
        from: usize,
        /// Cursor after the step.
        to: usize,
    },
    /// A complete math span in `[from, to)` was revealed.
    MathSpan {
        /// Position of the opening delimiter.
        from: usize,
        /// Position just past the closing delimiter.
        to: usize,
        /// Delimiter width.
        delimiter: Delimiter,
    },
    /// An unmatched delimiter at `at` was revealed as ordinary text.
    StrayDelimiter {
        /// Position of the delimiter.
        at: usize,
    },
}

impl Step {
    /// Cursor position after this step.
    pub const fn end(self) -> usize {
        match self {
            Self::Prose { to, .. } | Self::MathSpan { to, .. } => to,
            Self::StrayDelimiter { at } => at + 1,
        }
    }
}

/// Cursor over a source text.
#[derive(Debug, Clone)]
pub struct RevealCursor {
    units: Units,
    pos: usize,
    math_mode: bool,
    prose_step: usize,
    math_step: usize,
    delimiter: char,
    /// Index of the next span opening at or after `pos` (cached).
    next_span: usize,
}

impl RevealCursor {
    /// Create a cursor at the start of `text`.
    pub fn new(text: impl Into<String>, config: &RevealConfig) -> Self {
        let units = Units::new(text);
        let next_span = units.next_span_start(0, config.delimiter);
        Self {
            units,
            pos: 0,
            math_mode: false,
            prose_step: config.prose_step.max(1),
            math_step: config.math_step.max(1),
            delimiter: config.delimiter,
            next_span,
        }
    }

    /// Current position in units.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Length of the source text in units.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the source text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Check if the whole text has been revealed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.units.len()
    }

    /// Whether a math span has been revealed yet.
    #[inline]
    pub const fn in_math_mode(&self) -> bool {
        self.math_mode
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &str {
        self.units.text()
    }

    /// The revealed prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        self.units.prefix(self.pos)
    }

    /// Advance by one step. Returns `None` once the text is exhausted.
    pub fn advance(&mut self) -> Option<Step> {
        if self.is_exhausted() {
            return None;
        }
        let from = self.pos;

        if let Some((delimiter, to)) = self.units.span_at(from, self.delimiter) {
            self.pos = to;
            self.math_mode = true;
            return Some(Step::MathSpan { from, to, delimiter });
        }
        if self.units.is_delimiter(from, self.delimiter) {
            self.pos = from + 1;
            return Some(Step::StrayDelimiter { at: from });
        }

        let step = if self.math_mode { self.math_step } else { self.prose_step };
        // Stop before the next span so it is revealed whole on its own tick.
        // Stray delimiters inside the step are ordinary text.
        let to = (from + step).min(self.lookahead());
        self.pos = to;
        Some(Step::Prose { from, to })
    }

    /// Jump straight to the end of the text.
    pub fn reveal_all(&mut self) {
        self.pos = self.units.len();
    }

    /// Start of the next span at or after the cursor, or `len()`.
    fn lookahead(&mut self) -> usize {
        if self.next_span < self.pos {
            self.next_span = self.units.next_span_start(self.pos, self.delimiter);
        }
        self.next_span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn prefixes(text: &str) -> Vec<String> {
        let mut cursor = RevealCursor::new(text, &RevealConfig::default());
        let mut out = Vec::new();
        while cursor.advance().is_some() {
            out.push(cursor.prefix().to_string());
        }
        out
    }

    #[test]
    fn test_plain_text_one_unit_per_step() {
        assert_eq!(prefixes("abc"), vec!["a", "ab", "abc"]);
    }

    #[test]
    fn test_single_span_revealed_atomically() {
        assert_eq!(
            prefixes("a $x+y$ b"),
            vec!["a", "a ", "a $x+y$", "a $x+y$ b"]
        );
    }

    #[test]
    fn test_double_span_revealed_atomically() {
        let mut cursor = RevealCursor::new("$$E=mc^2$$", &RevealConfig::default());
        let step = cursor.advance();
        assert_eq!(
            step,
            Some(Step::MathSpan { from: 0, to: 10, delimiter: Delimiter::Double })
        );
        assert_eq!(cursor.prefix(), "$$E=mc^2$$");
        assert!(cursor.in_math_mode());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn test_fast_steps_after_math_span() {
        assert_eq!(
            prefixes("$x$abcdefg"),
            vec!["$x$", "$x$abc", "$x$abcdef", "$x$abcdefg"]
        );
    }

    #[test]
    fn test_stray_delimiter_is_ordinary_text() {
        let text = "cost is $5 total";
        let out = prefixes(text);
        assert_eq!(out.len(), text.len());
        assert_eq!(out[7], "cost is ");
        assert_eq!(out[8], "cost is $");
        assert_eq!(out[9], "cost is $5");

        let mut cursor = RevealCursor::new(text, &RevealConfig::default());
        for _ in 0..8 {
            cursor.advance();
        }
        assert_eq!(cursor.advance(), Some(Step::StrayDelimiter { at: 8 }));
        assert!(!cursor.in_math_mode());
    }

    #[test]
    fn test_fast_step_stops_before_next_delimiter() {
        assert_eq!(
            prefixes("$a$ bcd$e$"),
            vec!["$a$", "$a$ bc", "$a$ bcd", "$a$ bcd$e$"]
        );
    }

    #[test]
    fn test_fast_step_passes_over_stray_delimiter() {
        assert_eq!(
            prefixes("$x$ab$5 total"),
            vec!["$x$", "$x$ab$", "$x$ab$5 t", "$x$ab$5 tota", "$x$ab$5 total"]
        );
    }

    #[test]
    fn test_unterminated_double_delimiter() {
        assert_eq!(prefixes("$$abc"), vec!["$", "$$", "$$a", "$$ab", "$$abc"]);
    }

    #[test]
    fn test_adjacent_spans_scan_left_to_right() {
        // `$a$` closes first, then `$b$` opens at the second `$`
        assert_eq!(prefixes("$a$$b$"), vec!["$a$", "$a$$b$"]);
    }

    #[test]
    fn test_empty_text() {
        let mut cursor = RevealCursor::new("", &RevealConfig::default());
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.prefix(), "");
    }

    #[test]
    fn test_custom_delimiter() {
        let config = RevealConfig::default().with_delimiter('%');
        let mut cursor = RevealCursor::new("%a%$", &config);
        assert!(matches!(cursor.advance(), Some(Step::MathSpan { to: 3, .. })));
        assert_eq!(cursor.advance(), Some(Step::Prose { from: 3, to: 4 }));
    }

    #[test]
    fn test_reveal_all() {
        let mut cursor = RevealCursor::new("hello $x$", &RevealConfig::default());
        cursor.reveal_all();
        assert_eq!(cursor.prefix(), "hello $x$");
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let text = "Let $p=0.5$ and $$\\sum_i x_i$$ then done.";
        let boundaries = |text: &str| {
            let mut cursor = RevealCursor::new(text, &RevealConfig::default());
            let mut spans = Vec::new();
            while let Some(step) = cursor.advance() {
                if let Step::MathSpan { from, to, .. } = step {
                    spans.push((from, to));
                }
            }
            (cursor.prefix().to_string(), spans)
        };
        assert_eq!(boundaries(text), boundaries(text));
        assert_eq!(boundaries(text).0, text);
        assert_eq!(boundaries(text).1.len(), 2);
    }

    fn steps(text: &str) -> (usize, Vec<Step>) {
        let mut cursor = RevealCursor::new(text, &RevealConfig::default());
        let steps = std::iter::from_fn(|| cursor.advance()).collect();
        (cursor.len(), steps)
    }

    proptest! {
        #[test]
        fn prop_delimiter_free_text_reveals_every_prefix(text in "[a-zA-Z0-9 .,]{0,64}") {
            let expected: Vec<String> = (1..=text.len()).map(|i| text[..i].to_string()).collect();
            prop_assert_eq!(prefixes(&text), expected);
        }

        #[test]
        fn prop_prefixes_grow_and_finish(text in "[ab $]{0,48}") {
            let out = prefixes(&text);
            let mut last = 0;
            for prefix in &out {
                prop_assert!(text.starts_with(prefix.as_str()));
                prop_assert!(prefix.len() > last);
                last = prefix.len();
            }
            prop_assert!(out.len() <= text.len());
            if !text.is_empty() {
                prop_assert_eq!(out.last().map(String::as_str), Some(text.as_str()));
            }
        }

        #[test]
        fn prop_math_span_never_partial(
            before in "[a-z ]{0,12}",
            body in "[a-z+=^]{1,8}",
            after in "[a-z ]{0,12}",
        ) {
            let text = format!("{before}${body}${after}");
            let open = before.len();
            let close = open + body.len() + 2;
            for prefix in prefixes(&text) {
                prop_assert!(prefix.len() <= open || prefix.len() >= close);
            }
        }

        #[test]
        fn prop_steps_of_three_after_math_span(tail in "[a-z ]{0,40}") {
            let text = format!("$x$ {tail}");
            let (len, steps) = steps(&text);
            prop_assert_eq!(steps[0], Step::MathSpan { from: 0, to: 3, delimiter: Delimiter::Single });
            for step in &steps[1..] {
                match *step {
                    Step::Prose { from, to } => prop_assert!(to - from == 3 || to == len),
                    other => prop_assert!(false, "unexpected step {:?}", other),
                }
            }
        }

        #[test]
        fn prop_stray_delimiter_does_not_shorten_fast_steps(
            before in "[a-z ]{0,20}",
            after in "[a-z ]{0,20}",
        ) {
            let text = format!("$x${before}${after}");
            let stray = 3 + before.len();
            let (len, steps) = steps(&text);
            let first_is_span = matches!(steps[0], Step::MathSpan { from: 0, to: 3, .. });
            prop_assert!(first_is_span);
            for step in &steps[1..] {
                match *step {
                    Step::Prose { from, to } => prop_assert!(to - from == 3 || to == len),
                    Step::StrayDelimiter { at } => prop_assert_eq!(at, stray),
                    Step::MathSpan { .. } => prop_assert!(false, "no span after the first"),
                }
            }
            prop_assert_eq!(steps.last().map(|step| step.end()), Some(len));
        }
    }
}
