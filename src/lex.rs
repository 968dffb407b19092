const FORM_FEED: u8 = b'\x0C';

/// A producer of whitespace and delimiter separated words.
///
/// The calculator parser only ever asks for the next word; an empty word
/// signals the end of input
pub trait WordSource<'a> {
    fn next_word(&mut self) -> &'a [u8];
}

pub(crate) trait LexBase<'a> {
    fn buffer(&self) -> &'a [u8];
    fn cursor(&self) -> usize;
    fn cursor_mut(&mut self) -> &mut usize;

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if Self::is_whitespace(b) {
                self.next_byte();
            } else if b == b'%' {
                self.next_byte();
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        self.buffer().get(self.cursor()).copied().map(|b| {
            *self.cursor_mut() += 1;
            b
        })
    }

    fn peek_byte(&self) -> Option<u8> {
        self.buffer().get(self.cursor()).copied()
    }

    fn consume_if_next_byte_is(&mut self, b: u8) -> bool {
        if self.peek_byte() == Some(b) {
            self.next_byte();
            return true;
        }

        false
    }

    /// Whitespace chars are defined as
    ///
    /// * NUL             0x0
    /// * Horizontal tab  0x9
    /// * Line feed       0xa
    /// * Form feed       0xc
    /// * Carriage return 0xd
    /// * Space           0x20
    ///
    fn is_whitespace(b: u8) -> bool {
        matches!(b, b'\0' | 0x9 | b'\n' | FORM_FEED | b'\r' | b' ')
    }

    fn is_delimiter(b: u8) -> bool {
        matches!(
            b,
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
        )
    }

    fn is_regular(b: u8) -> bool {
        !Self::is_whitespace(b) && !Self::is_delimiter(b)
    }

    /// `start` is inclusive, `end` is exclusive
    /// 0 indexed
    fn get_byte_range(&self, start: usize, end: usize) -> &'a [u8] {
        &self.buffer()[start..end]
    }

    /// Assumes the leading `%` has already been consumed
    fn skip_comment(&mut self) {
        while !self.next_is_eol() {
            self.next_byte();
        }
    }

    fn next_is_eol(&self) -> bool {
        match self.peek_byte() {
            Some(b'\r' | b'\n') => true,
            Some(..) => false,
            None => true,
        }
    }

    fn skip_regular(&mut self) {
        while let Some(b) = self.peek_byte() {
            if !Self::is_regular(b) {
                break;
            }

            self.next_byte();
        }
    }
}

/// Splits a calculator stream into words the same way a PDF content parser
/// does, so that stray names and strings are consumed as single words rather
/// than derailing brace matching
#[derive(Debug, Clone)]
pub struct WordLexer<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> LexBase<'a> for WordLexer<'a> {
    fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn cursor_mut(&mut self) -> &mut usize {
        &mut self.cursor
    }
}

impl<'a> WordLexer<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Assumes the leading `<` has already been consumed
    fn skip_hex_string(&mut self) {
        while let Some(b) = self.next_byte() {
            if b == b'>' {
                break;
            }
        }
    }

    /// Assumes the leading `(` has already been consumed
    fn skip_literal_string(&mut self) {
        let mut depth = 1_usize;

        while let Some(b) = self.next_byte() {
            match b {
                b'\\' => {
                    self.next_byte();
                }
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;

                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }
}

impl<'a> WordSource<'a> for WordLexer<'a> {
    fn next_word(&mut self) -> &'a [u8] {
        self.skip_whitespace();

        let start = self.cursor;

        let b = match self.next_byte() {
            Some(b) => b,
            None => return &[],
        };

        if Self::is_delimiter(b) {
            match b {
                b'/' => self.skip_regular(),
                b'<' => {
                    if !self.consume_if_next_byte_is(b'<') {
                        self.skip_hex_string();
                    }
                }
                b'>' => {
                    self.consume_if_next_byte_is(b'>');
                }
                b'(' => self.skip_literal_string(),
                _ => {}
            }
        } else {
            self.skip_regular();
        }

        self.get_byte_range(start, self.cursor)
    }
}

/// Parses as much of `bytes` as looks like a decimal number: an optional sign,
/// digits, and an optional fractional part. Anything that does not fit ends
/// the number; no number at all is `0.0`
pub fn parse_number_lossy(bytes: &[u8]) -> f32 {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let count_digits = |bytes: &[u8]| bytes.iter().take_while(|b| b.is_ascii_digit()).count();

    let mut len = count_digits(digits);

    if digits.get(len) == Some(&b'.') {
        len += 1;
        len += count_digits(&digits[len..]);
    }

    let value = fast_float::parse::<f32, _>(&digits[..len]).unwrap_or(0.0);

    if negative {
        -value
    } else {
        value
    }
}
