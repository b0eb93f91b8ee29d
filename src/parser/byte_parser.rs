//! Low-level byte-by-byte scanner for ASCII-structured text.
//!
//! This module provides [ByteParser], a cursor over a borrowed byte slice
//! with peeking, consuming and context extraction. It is the foundation of
//! the Newick automaton in [crate::newick::parser].
//!
//! All structural characters of the Newick grammar are ASCII, so scanning
//! bytes is safe for UTF-8 input: multi-byte characters only ever end up
//! inside name, attribute or annotation text, never split by a delimiter.

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte cursor over borrowed input.
///
/// # Example
/// ```
/// use multihit::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("(A,B);");
/// assert_eq!(parser.next_byte(), Some(b'('));
/// assert!(parser.peek_is(b'A'));
/// assert_eq!(parser.position(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ByteParser<'a> {
    /// The bytes being scanned
    input: &'a [u8],
    /// Index of the next byte to be consumed
    pos: usize,
}

impl<'a> ByteParser<'a> {
    /// Creates a new [ByteParser] over a byte slice.
    pub fn from_bytes(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new [ByteParser] over the bytes of a string.
    pub fn for_str(input: &'a str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Checks if the current byte equals `ch` (case-sensitive).
    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns the current position, i.e. the offset of the next byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether `ch` occurs at or after the current position.
    pub fn contains(&self, ch: u8) -> bool {
        self.input[self.pos..].contains(&ch)
    }

    /// Returns the text around the character at `position` with `marker`
    /// inserted right after it.
    ///
    /// Takes up to `radius` bytes before the character and up to `radius`
    /// bytes after it, never splitting a multi-byte UTF-8 character. A
    /// position beyond the input is clamped to the last character, so this
    /// never indexes out of range.
    ///
    /// # Example
    /// ```
    /// use multihit::parser::ByteParser;
    ///
    /// let parser = ByteParser::for_str("(A,B)x(C);");
    /// assert_eq!(parser.context_around(5, 2, "<<"), "B)x<<(C");
    /// ```
    pub fn context_around(&self, position: usize, radius: usize, marker: &str) -> String {
        let Some((char_start, char_end)) = self.char_bounds(position) else {
            return marker.to_string();
        };
        let mut start = char_start.saturating_sub(radius);
        while start < char_start && is_continuation(self.input[start]) {
            start += 1;
        }
        let mut end = (char_end + radius).min(self.input.len());
        while end > char_end && end < self.input.len() && is_continuation(self.input[end]) {
            end -= 1;
        }

        let mut context = String::from_utf8_lossy(&self.input[start..char_end]).into_owned();
        context.push_str(marker);
        context.push_str(&String::from_utf8_lossy(&self.input[char_end..end]));
        context
    }

    /// Returns the character containing the byte at `position`, clamped like
    /// [context_around](Self::context_around).
    ///
    /// # Example
    /// ```
    /// use multihit::parser::ByteParser;
    ///
    /// let parser = ByteParser::for_str("(Kā");
    /// assert_eq!(parser.char_at(3), Some('ā'));
    /// assert_eq!(parser.char_at(9), Some('ā'));
    /// ```
    pub fn char_at(&self, position: usize) -> Option<char> {
        let (start, end) = self.char_bounds(position)?;
        String::from_utf8_lossy(&self.input[start..end]).chars().next()
    }

    /// Byte range of the UTF-8 character containing `position`, clamped to
    /// the last byte; `None` for empty input.
    fn char_bounds(&self, position: usize) -> Option<(usize, usize)> {
        let last = self.input.len().checked_sub(1)?;
        let at = position.min(last);

        let mut start = at;
        while start > 0 && at - start < 3 && is_continuation(self.input[start]) {
            start -= 1;
        }
        let mut end = start + 1;
        while end < self.input.len() && end - start < 4 && is_continuation(self.input[end]) {
            end += 1;
        }
        Some((start, end))
    }
}

/// Whether `b` continues a multi-byte UTF-8 sequence.
#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}
