//! State management for a single-line text input field.
//!
//! Used both by the nickname form and by the message compose field.

use unicode_width::UnicodeWidthStr;

/// Maximum allowed input length in characters.
const MAX_INPUT_LENGTH: usize = 4096;

/// State for a cursor-aware text input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeState {
    /// The current text being composed.
    text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
}

impl ComposeState {
    /// Returns the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position (character index).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Returns the display width of the text before the cursor.
    ///
    /// Wide characters occupy two terminal columns, so this is what the
    /// cursor column must be derived from, not the character index.
    pub fn width_before_cursor(&self) -> usize {
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        UnicodeWidthStr::width(&self.text[..byte_idx])
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts a character at the current cursor position.
    /// Returns false if the input would exceed the maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_INPUT_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Deletes the character at the cursor position (delete key).
    pub fn delete_char_at(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Moves the cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Moves the cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    /// Moves the cursor to the beginning of the text.
    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Moves the cursor to the end of the text.
    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    /// Clears all text and resets cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    /// Converts character index to byte index.
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
