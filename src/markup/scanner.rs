/*!
 * Pull lexer for HTML markup.
 *
 * Produces a flat stream of events over raw input: text runs with entities
 * decoded, opening tags followed by their attributes, and closing tags.
 * Comments, declarations and processing instructions are consumed silently.
 * The lexer borrows from the input wherever no decoding is needed.
 */

use std::borrow::Cow;

use crate::errors::MarkupError;

/// A single markup event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// A run of character data, with entity references decoded
    Text(Cow<'a, str>),

    /// An opening tag; its attributes follow as separate events
    TagStart {
        /// Lowercased tag name
        name: Cow<'a, str>,
    },

    /// One attribute of the most recently opened tag
    Attribute {
        /// Lowercased attribute name
        name: Cow<'a, str>,
        /// Attribute value with entity references decoded, empty if absent
        value: Cow<'a, str>,
    },

    /// A closing tag, or the synthesized end of a self-closing tag
    TagEnd {
        /// Lowercased tag name
        name: Cow<'a, str>,
    },

    /// End of input
    Eof,
}

/// Streaming tokenizer over raw HTML input.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    /// Name range of the tag whose attributes are currently being lexed
    tag_name: Option<(usize, usize)>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `input`, positioned at the start.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            tag_name: None,
        }
    }

    /// Byte position of the next unconsumed input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Lex the next event, advancing the scanner past it.
    ///
    /// A self-closing `<name/>` yields `TagEnd` right after the tag's
    /// attribute events, as if `</name>` had followed.
    pub fn next_event(&mut self) -> Result<Event<'a>, MarkupError> {
        if let Some((begin, end)) = self.tag_name {
            self.skip_whitespace();

            if self.eat(b'>') {
                self.tag_name = None;
            } else if self.starts_with("/>") {
                self.pos += 2;
                self.tag_name = None;
                return Ok(Event::TagEnd {
                    name: self.name(begin, end),
                });
            } else if self.peek().is_none() {
                return Err(self.syntax_error("unterminated tag"));
            } else {
                return self.lex_attribute();
            }
        }

        self.next_in_content()
    }

    /// Lex text, tag boundaries and skippable constructs.
    fn next_in_content(&mut self) -> Result<Event<'a>, MarkupError> {
        loop {
            if self.peek().is_none() {
                return Ok(Event::Eof);
            }

            if self.peek() != Some(b'<') {
                let begin = self.pos;
                while matches!(self.peek(), Some(b) if b != b'<') {
                    self.pos += 1;
                }
                return Ok(Event::Text(decode_entities(&self.input[begin..self.pos])));
            }

            let tag_begin = self.pos;

            if self.starts_with("<!--") {
                match self.input[self.pos..].find("-->") {
                    Some(offset) => self.pos += offset + 3,
                    None => {
                        return Err(MarkupError::Syntax {
                            position: tag_begin,
                            message: "unterminated comment".to_string(),
                        });
                    }
                }
                continue;
            }

            if self.starts_with("<?") {
                match self.input[self.pos..].find("?>") {
                    Some(offset) => self.pos += offset + 2,
                    None => {
                        return Err(MarkupError::Syntax {
                            position: tag_begin,
                            message: "unterminated processing instruction".to_string(),
                        });
                    }
                }
                continue;
            }

            if self.starts_with("<!") {
                match self.input[self.pos..].find('>') {
                    Some(offset) => self.pos += offset + 1,
                    None => {
                        return Err(MarkupError::Syntax {
                            position: tag_begin,
                            message: "unterminated declaration".to_string(),
                        });
                    }
                }
                continue;
            }

            if self.starts_with("</") {
                self.pos += 2;
                let (begin, end) = self.lex_name()?;
                self.skip_whitespace();
                if !self.eat(b'>') {
                    return Err(self.syntax_error("expected '>' to end closing tag"));
                }
                return Ok(Event::TagEnd {
                    name: self.name(begin, end),
                });
            }

            self.pos += 1;
            let (begin, end) = self.lex_name()?;
            self.tag_name = Some((begin, end));
            return Ok(Event::TagStart {
                name: self.name(begin, end),
            });
        }
    }

    /// Lex one attribute, with optional bare or quoted value.
    fn lex_attribute(&mut self) -> Result<Event<'a>, MarkupError> {
        let name_begin = self.pos;
        while matches!(self.peek(), Some(b) if is_attribute_name_byte(b)) {
            self.pos += 1;
        }
        if self.pos == name_begin {
            return Err(self.syntax_error("expected attribute name or '>'"));
        }
        let name = self.name(name_begin, self.pos);

        self.skip_whitespace();
        if !self.eat(b'=') {
            return Ok(Event::Attribute {
                name,
                value: Cow::Borrowed(""),
            });
        }
        self.skip_whitespace();

        let value = if self.eat(b'"') {
            self.lex_quoted_value(b'"')?
        } else if self.eat(b'\'') {
            self.lex_quoted_value(b'\'')?
        } else {
            let begin = self.pos;
            while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace() && b != b'>') {
                self.pos += 1;
            }
            decode_entities(&self.input[begin..self.pos])
        };

        Ok(Event::Attribute { name, value })
    }

    /// Lex a quoted attribute value, consuming the closing quote.
    fn lex_quoted_value(&mut self, quote: u8) -> Result<Cow<'a, str>, MarkupError> {
        let begin = self.pos;
        while matches!(self.peek(), Some(b) if b != quote) {
            self.pos += 1;
        }
        if self.peek().is_none() {
            return Err(MarkupError::Syntax {
                position: begin,
                message: "unterminated attribute value".to_string(),
            });
        }
        let value = decode_entities(&self.input[begin..self.pos]);
        self.pos += 1;
        Ok(value)
    }

    /// Lex a tag name: an ASCII letter followed by name bytes.
    fn lex_name(&mut self) -> Result<(usize, usize), MarkupError> {
        let begin = self.pos;
        if !matches!(self.peek(), Some(b) if b.is_ascii_alphabetic()) {
            return Err(self.syntax_error("expected a tag name"));
        }
        self.pos += 1;
        while matches!(self.peek(), Some(b) if is_name_byte(b)) {
            self.pos += 1;
        }
        Ok((begin, self.pos))
    }

    /// Names are ASCII case-insensitive; normalize to lowercase, borrowing
    /// when the input already is.
    fn name(&self, begin: usize, end: usize) -> Cow<'a, str> {
        let raw = &self.input[begin..end];
        if raw.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(raw.to_ascii_lowercase())
        } else {
            Cow::Borrowed(raw)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn syntax_error(&self, message: &str) -> MarkupError {
        MarkupError::Syntax {
            position: self.pos,
            message: message.to_string(),
        }
    }
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.')
}

fn is_attribute_name_byte(byte: u8) -> bool {
    !byte.is_ascii_whitespace() && !matches!(byte, b'=' | b'>' | b'/' | b'"' | b'\'' | b'<')
}

/// Decode character entity references, borrowing when there are none.
/// Unknown or malformed references pass through unchanged.
fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('&') {
        output.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match decode_entity(rest) {
            Some((decoded, consumed)) => {
                output.push(decoded);
                rest = &rest[consumed..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    Cow::Owned(output)
}

/// Decode one reference starting at `&`, returning the character and the
/// number of input bytes the reference spans.
fn decode_entity(input: &str) -> Option<(char, usize)> {
    // Entity bodies are short; don't chase a ';' through the whole input.
    let semicolon = input
        .as_bytes()
        .iter()
        .take(32)
        .position(|&b| b == b';')?;
    let body = &input[1..semicolon];

    let decoded = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?
        }
    };

    Some((decoded, semicolon + 1))
}
