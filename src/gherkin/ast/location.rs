//! Source locations attached to AST nodes

use serde::Serialize;
use std::fmt;

/// A 1-based line/column pair. Both are `-1` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub line: i64,
    pub column: i64,
}

impl Location {
    pub const UNKNOWN: Location = Location {
        line: -1,
        column: -1,
    };

    pub fn new(line: usize, column: usize) -> Self {
        Location {
            line: line as i64,
            column: column as i64,
        }
    }

    pub fn is_known(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::UNKNOWN
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
