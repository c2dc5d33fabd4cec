//! A lexer which consumes a stream of `char`s and produces a stream of JSON [Token]s.
//!
//! The lexer is a simple LA(1) design: it peeks a single character, decides which token
//! family must follow based on the JSON grammar, and then consumes exactly that token.
//! String escape sequences (including `\uXXXX` forms and surrogate pairs) are translated
//! into their target characters, so [Token::Str] always carries the decoded text.
use crate::coords::{Coords, Span};
use crate::errors::{Details, ParserResult};
use crate::lexer_error;

/// Default buffer capacity for string and number scratch space
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Enumeration of valid JSON tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Colon,
    Comma,
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    EndOfInput,
}

/// A packed token consists of a [Token] and the [Span] associated with it
pub type PackedToken = (Token, Span);

/// Convenience macro for packing tokens along with their positional information
macro_rules! packed_token {
    ($t:expr, $s:expr, $e:expr) => {
        ($t, Span { start: $s, end: $e })
    };
    ($t:expr, $s:expr) => {
        ($t, Span { start: $s, end: $s })
    };
}

pub struct Lexer<'a> {
    /// The underlying source of characters
    chars: &'a mut dyn Iterator<Item = char>,
    /// Single-character lookahead slot
    peeked: Option<char>,
    /// Coordinates of the most recently consumed character
    coords: Coords,
    /// Scratch buffer for strings and numbers
    buffer: String,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a mut dyn Iterator<Item = char>) -> Self {
        Lexer {
            chars,
            peeked: None,
            coords: Coords::default(),
            buffer: String::with_capacity(DEFAULT_BUFFER_CAPACITY),
        }
    }

    /// Consume the next token from the input stream
    pub fn consume(&mut self) -> ParserResult<PackedToken> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(packed_token!(Token::EndOfInput, self.coords)),
            Some(c) => match c {
                '{' => self.match_single(Token::StartObject),
                '}' => self.match_single(Token::EndObject),
                '[' => self.match_single(Token::StartArray),
                ']' => self.match_single(Token::EndArray),
                ':' => self.match_single(Token::Colon),
                ',' => self.match_single(Token::Comma),
                '"' => self.match_string(),
                'n' => self.match_literal("null", Token::Null),
                't' => self.match_literal("true", Token::Bool(true)),
                'f' => self.match_literal("false", Token::Bool(false)),
                '-' | '0'..='9' => self.match_number(),
                c => {
                    self.bump();
                    lexer_error!(Details::InvalidCharacter(c), self.coords)
                }
            },
        }
    }

    /// Look at the next character without consuming it
    fn peek(&mut self) -> Option<char> {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked
    }

    /// Consume the next character, updating the input coordinates
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.peeked = None;
        self.coords.advance(c);
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    /// Match a single punctuation character token
    fn match_single(&mut self, token: Token) -> ParserResult<PackedToken> {
        self.bump();
        Ok(packed_token!(token, self.coords))
    }

    /// Match an exact literal sequence such as `null`, `true` or `false`
    fn match_literal(&mut self, literal: &str, token: Token) -> ParserResult<PackedToken> {
        let mut start = self.coords;
        for (index, expected) in literal.chars().enumerate() {
            match self.bump() {
                Some(c) if c == expected => {
                    if index == 0 {
                        start = self.coords;
                    }
                }
                Some(_) => {
                    return lexer_error!(
                        Details::MatchFailed(format!("expected \"{literal}\"")),
                        self.coords
                    )
                }
                None => return lexer_error!(Details::EndOfInput, self.coords),
            }
        }
        Ok(packed_token!(token, start, self.coords))
    }

    /// Match a number token. The raw characters are accumulated and then handed off to
    /// fast_float for the actual conversion, with an upfront prefix check given that
    /// fast_float is more permissive than the JSON grammar about leading zeros
    fn match_number(&mut self) -> ParserResult<PackedToken> {
        self.buffer.clear();
        let first = self.bump().unwrap_or_default();
        let start = self.coords;
        self.buffer.push(first);
        self.check_number_prefix(first, start)?;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '.' | 'e' | 'E' | '+' | '-' => {
                    self.bump();
                    self.buffer.push(c);
                }
                _ => break,
            }
        }
        match fast_float::parse(self.buffer.as_bytes()) {
            Ok(n) => Ok(packed_token!(Token::Num(n), start, self.coords)),
            Err(_) => lexer_error!(
                Details::InvalidNumericRepresentation(self.buffer.clone()),
                start
            ),
        }
    }

    /// A '-' must be followed by a digit, and a leading zero must not be followed by
    /// further digits
    fn check_number_prefix(&mut self, first: char, start: Coords) -> ParserResult<()> {
        let next = self.peek();
        match first {
            '-' if !matches!(next, Some('0'..='9')) => {
                lexer_error!(
                    Details::InvalidNumericRepresentation(self.buffer.clone()),
                    start
                )
            }
            '0' if matches!(next, Some('0'..='9')) => {
                lexer_error!(
                    Details::InvalidNumericRepresentation(self.buffer.clone()),
                    start
                )
            }
            _ => Ok(()),
        }
    }

    /// Match a string token, translating any escape sequences found along the way
    fn match_string(&mut self) -> ParserResult<PackedToken> {
        self.buffer.clear();
        self.bump();
        let start = self.coords;
        loop {
            match self.bump() {
                None => return lexer_error!(Details::EndOfInput, self.coords),
                Some('"') => break,
                Some('\\') => {
                    let c = self.match_escape_sequence()?;
                    self.buffer.push(c);
                }
                Some(c) if (c as u32) < 0x20 => {
                    return lexer_error!(Details::InvalidCharacter(c), self.coords)
                }
                Some(c) => self.buffer.push(c),
            }
        }
        Ok(packed_token!(
            Token::Str(self.buffer.clone()),
            start,
            self.coords
        ))
    }

    /// Translate a single escape sequence, the leading backslash already consumed
    fn match_escape_sequence(&mut self) -> ParserResult<char> {
        match self.bump() {
            None => lexer_error!(Details::EndOfInput, self.coords),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000c}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.match_unicode_escape_sequence(),
            Some(c) => lexer_error!(
                Details::InvalidEscapeSequence(format!("\\{c}")),
                self.coords
            ),
        }
    }

    /// Translate a `\uXXXX` escape. A leading surrogate must be followed by a second
    /// `\uXXXX` escape carrying the trailing surrogate
    fn match_unicode_escape_sequence(&mut self) -> ParserResult<char> {
        let high = self.match_hex_quad()?;
        if (0xd800..=0xdbff).contains(&high) {
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return lexer_error!(
                    Details::InvalidUnicodeEscapeSequence(format!("\\u{high:04x}")),
                    self.coords
                );
            }
            let low = self.match_hex_quad()?;
            if !(0xdc00..=0xdfff).contains(&low) {
                return lexer_error!(
                    Details::InvalidUnicodeEscapeSequence(format!("\\u{high:04x}\\u{low:04x}")),
                    self.coords
                );
            }
            let combined = 0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00);
            return match char::from_u32(combined) {
                Some(c) => Ok(c),
                None => lexer_error!(
                    Details::InvalidUnicodeEscapeSequence(format!("\\u{high:04x}\\u{low:04x}")),
                    self.coords
                ),
            };
        }
        match char::from_u32(high) {
            Some(c) => Ok(c),
            None => lexer_error!(
                Details::InvalidUnicodeEscapeSequence(format!("\\u{high:04x}")),
                self.coords
            ),
        }
    }

    /// Consume exactly four hex digits and return their value
    fn match_hex_quad(&mut self) -> ParserResult<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => {
                    value = (value << 4) + c.to_digit(16).unwrap_or_default();
                }
                Some(c) => {
                    return lexer_error!(
                        Details::InvalidUnicodeEscapeSequence(format!("\\u..{c}")),
                        self.coords
                    )
                }
                None => return lexer_error!(Details::EndOfInput, self.coords),
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{Lexer, Token};
    use crate::lines_from_relative_file;
    use std::env;
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    fn tokens_of(source: &str, count: usize) -> Vec<Token> {
        let mut chars = source.chars();
        let mut lexer = Lexer::new(&mut chars);
        (0..count).map(|_| lexer.consume().unwrap().0).collect()
    }

    #[test]
    fn should_parse_basic_tokens() {
        assert_eq!(
            tokens_of("{}[],:", 7),
            [
                Token::StartObject,
                Token::EndObject,
                Token::StartArray,
                Token::EndArray,
                Token::Comma,
                Token::Colon,
                Token::EndOfInput
            ]
        );
    }

    #[test]
    fn should_parse_null_and_booleans() {
        assert_eq!(
            tokens_of("null true    falsetruefalse", 6),
            [
                Token::Null,
                Token::Bool(true),
                Token::Bool(false),
                Token::Bool(true),
                Token::Bool(false),
                Token::EndOfInput
            ]
        );
    }

    #[test]
    fn should_translate_escape_sequences() {
        assert_eq!(
            tokens_of(r#""a\nb\t\"c\" Aé""#, 1),
            [Token::Str("a\nb\t\"c\" A\u{e9}".to_string())]
        );
    }

    #[test]
    fn should_translate_surrogate_pairs() {
        assert_eq!(
            tokens_of(r#""😀""#, 1),
            [Token::Str("\u{1f600}".to_string())]
        );
        assert_eq!(
            tokens_of(r#""\ud83d\ude00""#, 1),
            [Token::Str("\u{1f600}".to_string())]
        );
        // a leading surrogate must be followed by a trailing one
        let mut chars = r#""\ud83dA""#.chars();
        let mut lexer = Lexer::new(&mut chars);
        assert!(lexer.consume().is_err());
    }

    #[test]
    fn should_parse_numerics() {
        let lines = lines_from_relative_file!("fixtures/utf-8/numbers.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut chars = l.chars();
                let mut lexer = Lexer::new(&mut chars);
                let token = lexer.consume().unwrap();
                assert_eq!(token.0, Token::Num(fast_float::parse(l.as_str()).unwrap()));
            }
        }
    }

    #[test]
    fn should_correctly_handle_invalid_numbers() {
        let lines = lines_from_relative_file!("fixtures/utf-8/invalid_numbers.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut chars = l.chars();
                let mut lexer = Lexer::new(&mut chars);
                assert!(lexer.consume().is_err(), "should have rejected: {l}");
            }
        }
    }

    #[test]
    fn should_parse_strings() {
        let lines = lines_from_relative_file!("fixtures/utf-8/strings.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut chars = l.chars();
                let mut lexer = Lexer::new(&mut chars);
                match lexer.consume().unwrap().0 {
                    Token::Str(s) => assert_eq!(s, l.trim_matches('"')),
                    token => panic!("expected a string token, got {token:?}"),
                }
            }
        }
    }

    #[test]
    fn should_correctly_identify_dodgy_strings() {
        let lines = lines_from_relative_file!("fixtures/utf-8/dodgy_strings.txt");
        for l in lines.flatten() {
            if !l.is_empty() {
                let mut chars = l.chars();
                let mut lexer = Lexer::new(&mut chars);
                let mut error = None;
                loop {
                    match lexer.consume() {
                        Ok((Token::EndOfInput, _)) => break,
                        Ok(_) => (),
                        Err(err) => {
                            error = Some(err);
                            break;
                        }
                    }
                }
                assert!(error.is_some(), "should have rejected: {l}");
            }
        }
    }

    #[test]
    fn should_correctly_report_errors_for_booleans() {
        let mut chars = "true farse".chars();
        let mut lexer = Lexer::new(&mut chars);
        assert!(lexer.consume().is_ok());
        let result = lexer.consume();
        assert!(result.is_err());
        println!("Parse error: {:?}", result);
    }
}
