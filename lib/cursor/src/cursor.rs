use std::fmt::Formatter;

mod span;
pub use span::*;

/// Byte-addressed read position inside a source buffer.
///
/// Advancing always moves over a whole `char`, so `pos` stays on a UTF-8
/// boundary and slicing the source with it never panics.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> std::fmt::Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Printing the whole source is usually too verbose, so by default
        // we only print the position
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("pos", &self.pos)
                .field("location", &self.location())
                .field("source", &self.source)
                .finish()
        } else {
            f.debug_struct("Cursor").field("pos", &self.pos).finish()
        }
    }
}

impl<'a> PartialEq for Cursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        (self.source, self.pos) == (other.source, other.pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
pub struct Line(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
pub struct Col(pub usize);

/// Human-facing position, both components 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "l. {}, c. {}", line, col)]
pub struct Location {
    pub line: Line,
    pub col: Col,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Consumes the next char only if it equals `expected`.
    pub fn consume_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes chars while `predicate` holds, returns how many bytes were skipped.
    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.next();
        }
        self.pos - start
    }

    /// Text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }

    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    // O(n) in the position, only meant for error reporting.
    pub fn location(&self) -> Location {
        Span::empty_at(self.pos).location(self.source)
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slice_from() {
        let mut cursor: Cursor = "ab\ncd\n\n".into();

        cursor.next(); // 'a'

        let start = cursor.pos();

        cursor.next(); // 'b'
        cursor.next(); // '\n'
        cursor.next(); // 'c'

        assert_eq!(cursor.slice_from(start), "b\nc");
        assert_eq!(cursor.span_from(start), Span::new(1, 4));
    }

    #[test]
    fn peek_and_next() {
        let mut cursor = Cursor::new("ab");

        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('b'));
        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.pos(), 1);

        assert_eq!(cursor.peek(), Some('b'));
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.next(), Some('b'));

        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.pos(), 2);

        cursor = "".into();
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn multibyte_chars_advance_whole() {
        let mut cursor = Cursor::new("é!");

        assert_eq!(cursor.next(), Some('é'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.slice_from(0), "é");
        assert_eq!(cursor.next(), Some('!'));
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn consume_helpers() {
        let mut cursor = Cursor::new("  ==x");

        assert_eq!(cursor.consume_while(char::is_whitespace), 2);
        assert!(cursor.consume_if('='));
        assert!(cursor.consume_if('='));
        assert!(!cursor.consume_if('='));
        assert_eq!(cursor.consume_while(char::is_whitespace), 0);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn location() {
        let mut cursor = Cursor::new("ab\ncd\n\n");
        assert_eq!(cursor.location(), Location { line: Line(1), col: Col(1) });

        cursor.next(); // 'a'
        cursor.next(); // 'b'
        assert_eq!(cursor.location(), Location { line: Line(1), col: Col(3) });

        cursor.next(); // '\n'
        assert_eq!(cursor.location(), Location { line: Line(2), col: Col(1) });

        cursor.by_ref().for_each(drop);
        assert_eq!(cursor.location(), Location { line: Line(4), col: Col(1) });
        assert_eq!(cursor.location().to_string(), "l. 4, c. 1");
    }
}
