use std::sync::Arc;
use syntax_core::{Position, TextSlice};

/// A cursor for traversing input text during lexing.
///
/// The cursor keeps the input in a shared buffer so that token text can be
/// handed out as cheap [`TextSlice`] values after the cursor has moved on.
#[derive(Debug, Clone)]
pub struct CharCursor {
    buffer: Arc<str>,
    current: usize,
    position: Position,
}

impl CharCursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        Self::with_arc(Arc::<str>::from(owned))
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            current: 0,
            position: Position::start(),
            buffer,
        }
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.current >= self.buffer.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.buffer[self.current..].chars().next()
    }

    /// Returns true if the remaining input starts with the given text.
    pub fn starts_with(&self, text: &str) -> bool {
        self.buffer[self.current..].starts_with(text)
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let len = ch.len_utf8();

        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        self.position.offset += len;
        self.current += len;

        Some(ch)
    }

    /// Returns a slice of the underlying buffer by byte range.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(Arc::clone(&self.buffer), start, end)
    }

    /// Creates a checkpoint that can be restored later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current: self.current,
            position: self.position,
        }
    }

    /// Restores the cursor to a previous checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.current;
        self.position = checkpoint.position;
    }
}

/// A checkpoint for cursor position.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    current: usize,
    position: Position,
}

impl Checkpoint {
    /// Returns the byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }
}
