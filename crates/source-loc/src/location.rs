//! Position and location types for source text.

use std::cmp::{max, min};
use std::fmt;

/// A line/column position in a template (both 1-based).
///
/// Positions order by line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// The first character of a template.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Creates a new position.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in a template, from `start` (inclusive) to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    /// Where the construct begins.
    pub start: Position,
    /// Where the construct ends.
    pub end: Position,
}

impl SourceLocation {
    /// Creates a new location from start and end positions.
    #[inline]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty location at the given position.
    #[inline]
    pub fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns a location covering both this location and another.
    #[inline]
    pub fn cover(self, other: SourceLocation) -> SourceLocation {
        SourceLocation {
            start: min(self.start, other.start),
            end: max(self.end, other.end),
        }
    }

    /// Returns this location with its end moved to `end`.
    #[inline]
    pub fn with_end(self, end: Position) -> SourceLocation {
        SourceLocation {
            start: self.start,
            end,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position_default_is_start() {
        assert_eq!(Position::default(), Position::new(1, 1));
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 4));
    }

    #[test]
    fn test_location_point() {
        let loc = SourceLocation::point(Position::new(2, 5));
        assert_eq!(loc.start, loc.end);
        assert_eq!(loc.to_string(), "2:5-2:5");
    }

    #[test]
    fn test_location_cover() {
        let a = SourceLocation::new(Position::new(1, 5), Position::new(1, 10));
        let b = SourceLocation::new(Position::new(1, 8), Position::new(2, 3));
        let covered = a.cover(b);
        assert_eq!(covered.start, Position::new(1, 5));
        assert_eq!(covered.end, Position::new(2, 3));
        assert_eq!(b.cover(a), covered);
    }

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new(Position::new(1, 1), Position::new(1, 6))
            .with_end(Position::new(2, 7));
        assert_eq!(loc.to_string(), "1:1-2:7");
    }
}
