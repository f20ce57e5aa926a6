use crate::{Col, Line, Location};

/// Half-open byte range `[start, end)` into a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past its end {end}");
        Self { start, end }
    }

    pub fn empty_at(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered text, or `None` if the span does not fit `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }

    /// Line and column of `start`. Columns count chars, not bytes.
    pub fn location(&self, source: &str) -> Location {
        let before = source.get(..self.start).unwrap_or(source);

        let line = 1 + before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
        let col = 1 + before[line_start..].chars().count();

        Location { line: Line(line), col: Col(col) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn length_and_slice() {
        let source = "var x = 42;";
        let span = Span::new(8, 10);

        assert_eq!(span.length(), 2);
        assert_eq!(span.slice(source), Some("42"));
        assert!(Span::empty_at(11).is_empty());
        assert_eq!(Span::empty_at(11).slice(source), Some(""));
        assert_eq!(Span::new(8, 40).slice(source), None);
    }

    #[test]
    fn location_counts_lines_and_chars() {
        let source = "print 1;\n  print é;\nx";

        assert_eq!(Span::new(0, 5).location(source), Location { line: Line(1), col: Col(1) });
        assert_eq!(Span::new(11, 16).location(source), Location { line: Line(2), col: Col(3) });
        // 'é' is two bytes wide but a single column
        assert_eq!(Span::new(19, 20).location(source), Location { line: Line(2), col: Col(10) });
        assert_eq!(Span::new(21, 22).location(source), Location { line: Line(3), col: Col(1) });
    }
}
