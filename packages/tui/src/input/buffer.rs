use unicode_segmentation::UnicodeSegmentation;

/// Text input buffer with cursor management and editing operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBuffer {
    /// The actual text content
    content: String,
    /// Cursor position as byte index in the content string
    cursor_position: usize,
}

impl InputBuffer {
    /// Create a new empty input buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer pre-filled with `content`, cursor at the end
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor_position = content.len();
        Self {
            content,
            cursor_position,
        }
    }

    /// Get the current text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the current cursor position (byte index)
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of Unicode scalar values, the unit the server bounds lengths by
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Clear all content and reset cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor_position, s);
        self.cursor_position += s.len();
    }

    /// Delete the grapheme at the cursor position (Delete key behavior)
    pub fn delete_char(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        let end = self.content[self.cursor_position..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor_position + g.len())
            .unwrap_or(self.content.len());

        self.content.drain(self.cursor_position..end);
        true
    }

    /// Delete the grapheme before the cursor position (Backspace key behavior)
    pub fn backspace(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        match self.content[..self.cursor_position]
            .grapheme_indices(true)
            .next_back()
        {
            Some((start, _)) => {
                self.content.drain(start..self.cursor_position);
                self.cursor_position = start;
                true
            }
            None => false,
        }
    }

    /// Move cursor left by one grapheme
    pub fn move_left(&mut self) -> bool {
        match self.content[..self.cursor_position]
            .grapheme_indices(true)
            .next_back()
        {
            Some((start, _)) => {
                self.cursor_position = start;
                true
            }
            None => false,
        }
    }

    /// Move cursor right by one grapheme
    pub fn move_right(&mut self) -> bool {
        match self.content[self.cursor_position..].graphemes(true).next() {
            Some(grapheme) => {
                self.cursor_position += grapheme.len();
                true
            }
            None => false,
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_position = self.content.len();
    }

    /// Move cursor to the beginning of the previous word
    pub fn move_word_left(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        let chars: Vec<(usize, char)> = self.content[..self.cursor_position]
            .char_indices()
            .collect();
        let mut pos = chars.len();

        // Skip trailing whitespace and punctuation
        while pos > 0 && is_word_break(chars[pos - 1].1) {
            pos -= 1;
        }

        // Skip the current word
        while pos > 0 && !is_word_break(chars[pos - 1].1) {
            pos -= 1;
        }

        self.cursor_position = chars.get(pos).map(|(idx, _)| *idx).unwrap_or(0);
        true
    }

    /// Move cursor to the beginning of the next word
    pub fn move_word_right(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        let rest: Vec<(usize, char)> = self.content[self.cursor_position..]
            .char_indices()
            .collect();
        let mut pos = 0;

        // Skip current word
        while pos < rest.len() && !is_word_break(rest[pos].1) {
            pos += 1;
        }

        // Skip whitespace and punctuation
        while pos < rest.len() && is_word_break(rest[pos].1) {
            pos += 1;
        }

        self.cursor_position = rest
            .get(pos)
            .map(|(idx, _)| self.cursor_position + idx)
            .unwrap_or(self.content.len());
        true
    }

    /// Split the content around the cursor: text before, the grapheme under
    /// the cursor (if any), and the text after it
    pub fn split_at_cursor(&self) -> (&str, &str, &str) {
        let (before, rest) = self.content.split_at(self.cursor_position);
        let current_len = rest.graphemes(true).next().map(str::len).unwrap_or(0);
        let (current, after) = rest.split_at(current_len);
        (before, current, after)
    }
}

fn is_word_break(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_punctuation()
}
