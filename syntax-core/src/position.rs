use std::fmt;

/// Represents the position of a character, token, or AST node in the
/// source text.
///
/// Positions are stamped on every token when it is produced and are
/// carried unchanged into diagnostics. Ordering is by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a position at the start of the input.
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The sentinel position used for end-of-input diagnostics.
    ///
    /// Orders after every real position.
    pub fn end_of_input() -> Self {
        Self {
            line: usize::MAX,
            column: usize::MAX,
            offset: usize::MAX,
        }
    }

    /// Returns true if this is the end-of-input sentinel.
    pub fn is_end_of_input(&self) -> bool {
        self.line == usize::MAX
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_of_input() {
            write!(f, "end of input")
        } else {
            write!(f, "line {}, column {}", self.line, self.column)
        }
    }
}
