//! Text editing driven by the on-screen numeric keypad.
//!
//! The keypad never touches a widget. It maps the current buffer and cursor
//! plus one key press to the next buffer and cursor, and reports whether the
//! edit should count as a change of the field's value. The caller applies the
//! new state to whatever renders the field.
//!
//! | Key      | Effect |
//! |----------|--------|
//! | digit    | inserted at the cursor |
//! | `.`      | inserted at the cursor unless the buffer is empty or already has one |
//! | delete   | removes the character before the cursor |
//! | negate   | prepends `-` unless the buffer is empty or already has one |
//!
//! # Example
//!
//! ```
//! use finance_core::keypad::{Key, KeypadState};
//!
//! let transition = KeypadState::default()
//!     .apply(Key::Digit(5))
//!     .state
//!     .apply(Key::Negate);
//!
//! assert_eq!(transition.state.buffer(), "-5");
//! assert_eq!(transition.state.cursor(), 2);
//! assert!(transition.changed);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A key on the custom keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A digit `0..=9`.
    Digit(u8),
    Period,
    Delete,
    Negate,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown key '{0}' (expected 0-9, '.', 'del' or 'neg')")]
pub struct ParseKeyError(String);

impl Key {
    /// Parses the name of a key as typed in the terminal front end.
    pub fn parse(s: &str) -> Result<Self, ParseKeyError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "." | "period" => Ok(Self::Period),
            "del" | "delete" | "backspace" => Ok(Self::Delete),
            "neg" | "negate" | "+/-" => Ok(Self::Negate),
            other => match other.as_bytes() {
                [b @ b'0'..=b'9'] => Ok(Self::Digit(b - b'0')),
                _ => Err(ParseKeyError(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Key {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Period => f.write_str("."),
            Self::Delete => f.write_str("del"),
            Self::Negate => f.write_str("neg"),
        }
    }
}

/// Contents of the focused field and the caret position within it.
///
/// The cursor counts characters, not bytes, and always lies in
/// `0..=buffer.chars().count()`. Deserialized states are clamped the same
/// way as [`KeypadState::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawKeypadState")]
pub struct KeypadState {
    buffer: String,
    cursor: usize,
}

#[derive(Deserialize)]
struct RawKeypadState {
    buffer: String,
    cursor: usize,
}

impl From<RawKeypadState> for KeypadState {
    fn from(raw: RawKeypadState) -> Self {
        Self::new(raw.buffer, raw.cursor)
    }
}

/// Result of one key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: KeypadState,
    /// Whether observers of the field value should be told about the edit.
    pub changed: bool,
}

impl KeypadState {
    /// Creates a state, clamping `cursor` to the end of `buffer`.
    pub fn new(
        buffer: impl Into<String>,
        cursor: usize,
    ) -> Self {
        let buffer = buffer.into();
        let cursor = cursor.min(buffer.chars().count());
        Self { buffer, cursor }
    }

    /// Creates a state with the cursor after the last character.
    pub fn at_end(buffer: impl Into<String>) -> Self {
        Self::new(buffer, usize::MAX)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Applies one key press.
    pub fn apply(
        &self,
        key: Key,
    ) -> Transition {
        match key {
            Key::Digit(d) if d <= 9 => self.insert_at_cursor(char::from(b'0' + d)),
            Key::Digit(_) => self.unchanged(),
            Key::Period => {
                if self.buffer.is_empty() || self.buffer.contains('.') {
                    self.unchanged()
                } else {
                    self.insert_at_cursor('.')
                }
            }
            Key::Delete => self.delete_before_cursor(),
            Key::Negate => {
                if self.buffer.is_empty() || self.buffer.contains('-') {
                    self.unchanged()
                } else {
                    Transition {
                        state: Self {
                            buffer: format!("-{}", self.buffer),
                            cursor: self.cursor + 1,
                        },
                        changed: true,
                    }
                }
            }
        }
    }

    fn unchanged(&self) -> Transition {
        Transition {
            state: self.clone(),
            changed: false,
        }
    }

    fn byte_offset(
        &self,
        char_index: usize,
    ) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }

    fn insert_at_cursor(
        &self,
        c: char,
    ) -> Transition {
        let mut buffer = self.buffer.clone();
        buffer.insert(self.byte_offset(self.cursor), c);
        Transition {
            state: Self {
                buffer,
                cursor: self.cursor + 1,
            },
            changed: true,
        }
    }

    fn delete_before_cursor(&self) -> Transition {
        let cursor = self.cursor.min(self.buffer.chars().count());
        if cursor == 0 {
            return self.unchanged();
        }
        let mut buffer = self.buffer.clone();
        let removed = buffer.remove(self.byte_offset(cursor - 1));
        Transition {
            state: Self {
                buffer,
                cursor: cursor - 1,
            },
            changed: removed != '.',
        }
    }
}
