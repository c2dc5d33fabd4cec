//! Coordinate types used to reference specific locations within the parser input
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] pinpoints a single character within the parser input
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Coords {
    /// The absolute character offset, starting from zero
    pub absolute: usize,
    /// The line the character sits on, starting from one
    pub line: usize,
    /// The column within the current line
    pub column: usize,
}

impl Coords {
    /// Move the coordinates forward over a single character
    pub(crate) fn advance(&mut self, c: char) {
        self.absolute += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Coords {
    /// The default coordinates sit at the very start of the first line
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 0,
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

/// A [Span] is a linear interval within the parser input, between two [Coords]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Span {
    /// Start [Coords] for the span
    pub start: Coords,
    /// End [Coords] for the span
    pub end: Coords,
}

impl Span {
    /// The number of characters covered by the span, minimum of 1
    pub fn len(&self) -> usize {
        match self.start.absolute.cmp(&self.end.absolute) {
            Ordering::Less => self.end.absolute - self.start.absolute + 1,
            Ordering::Equal => 1,
            Ordering::Greater => self.start.absolute - self.end.absolute + 1,
        }
    }
}
