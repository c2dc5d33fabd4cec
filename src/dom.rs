//! The DOM parser.
//!
//! Consumes a token stream from the [Lexer] and builds a complete [JsonValue] tree. Any
//! JSON value is accepted at the root, scalars included, and anything left in the input
//! after the document ends is reported as an error. Duplicate object keys keep the first
//! occurrence.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::decoders::{char_source, Encoding};
use crate::errors::{Details, ParserResult};
use crate::lexer::{Lexer, Token};
use crate::parser_error;
use crate::value::JsonValue;

/// Main JSON parser struct
#[derive(Debug, Default)]
pub struct Parser {
    encoding: Encoding,
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self { encoding }
    }

    /// Parse the file at the given path into a [JsonValue]
    pub fn parse_file<PathLike: AsRef<Path>>(&self, path: PathLike) -> ParserResult<JsonValue> {
        match File::open(&path) {
            Ok(f) => {
                let mut reader = BufReader::new(f);
                let mut chars = char_source(&mut reader, self.encoding);
                self.parse(&mut chars)
            }
            Err(_) => parser_error!(Details::InvalidFile),
        }
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<JsonValue> {
        let mut reader = BufReader::new(bytes);
        let mut chars = char_source(&mut reader, self.encoding);
        self.parse(&mut chars)
    }

    pub fn parse_str(&self, str: &str) -> ParserResult<JsonValue> {
        let mut reader = BufReader::new(str.as_bytes());
        let mut chars = char_source(&mut reader, self.encoding);
        self.parse(&mut chars)
    }

    /// Parse a complete document from a stream of chars. The document must be fully
    /// consumed; trailing non-whitespace input is an error
    pub fn parse(&self, chars: &mut impl Iterator<Item = char>) -> ParserResult<JsonValue> {
        let mut lexer = Lexer::new(chars);
        let value = self.parse_value(&mut lexer)?;
        match lexer.consume()? {
            (Token::EndOfInput, _) => Ok(value),
            (_, span) => parser_error!(Details::TrailingInput, span.start),
        }
    }

    fn parse_value(&self, lexer: &mut Lexer) -> ParserResult<JsonValue> {
        match lexer.consume()? {
            (Token::StartObject, _) => self.parse_object(lexer),
            (Token::StartArray, _) => self.parse_array(lexer),
            (Token::Str(str), _) => Ok(JsonValue::String(str)),
            (Token::Num(value), _) => Ok(JsonValue::Number(value)),
            (Token::Bool(value), _) => Ok(JsonValue::Boolean(value)),
            (Token::Null, _) => Ok(JsonValue::Null),
            (_, span) => parser_error!(Details::UnexpectedToken, span.start),
        }
    }

    /// An object is just a list of comma separated KV pairs
    fn parse_object(&self, lexer: &mut Lexer) -> ParserResult<JsonValue> {
        let mut pairs: Vec<(String, JsonValue)> = vec![];
        loop {
            match lexer.consume()? {
                (Token::Str(key), _) => {
                    let should_be_colon = lexer.consume()?;
                    match should_be_colon {
                        (Token::Colon, _) => {
                            let value = self.parse_value(lexer)?;
                            // first occurrence of a key wins
                            if !pairs.iter().any(|(existing, _)| existing == &key) {
                                pairs.push((key, value));
                            }
                        }
                        (_, span) => {
                            return parser_error!(Details::PairExpected, span.start);
                        }
                    }
                }
                (Token::Comma, _) => (),
                (Token::EndObject, _) => return Ok(JsonValue::Object(pairs)),
                (_, span) => {
                    return parser_error!(Details::InvalidObject, span.start);
                }
            }
        }
    }

    /// An array is just a list of comma separated values
    fn parse_array(&self, lexer: &mut Lexer) -> ParserResult<JsonValue> {
        let mut values: Vec<JsonValue> = vec![];
        loop {
            match lexer.consume()? {
                (Token::StartObject, _) => values.push(self.parse_object(lexer)?),
                (Token::StartArray, _) => values.push(self.parse_array(lexer)?),
                (Token::Str(str), _) => values.push(JsonValue::String(str)),
                (Token::Num(value), _) => values.push(JsonValue::Number(value)),
                (Token::Bool(value), _) => values.push(JsonValue::Boolean(value)),
                (Token::Null, _) => values.push(JsonValue::Null),
                (Token::Comma, _) => (),
                (Token::EndArray, _) => return Ok(JsonValue::Array(values)),
                (_, span) => {
                    return parser_error!(Details::InvalidArray, span.start);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::Parser;
    use crate::relative_file;
    use crate::value::JsonValue;
    use bytesize::ByteSize;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Instant;

    #[test]
    fn should_parse_char_iterators_directly() {
        let source = r#"{
            "test" : 1232.0,
            "some other" : "thasdasd",
            "a bool" : true,
            "an array" : [1,2,3,4,5.8,6,7.2,7,8,10]
        }"#;
        let parser = Parser::default();
        let parsed = parser.parse(&mut source.chars());
        println!("{parsed:?}");
        assert!(parsed.is_ok())
    }

    #[test]
    fn should_parse_scalar_documents() {
        let parser = Parser::default();
        assert_eq!(parser.parse_str("42").unwrap(), JsonValue::Number(42.0));
        assert_eq!(
            parser.parse_str("\"hello\"").unwrap(),
            JsonValue::from("hello")
        );
        assert_eq!(parser.parse_str("null").unwrap(), JsonValue::Null);
        assert_eq!(parser.parse_str("true").unwrap(), JsonValue::Boolean(true));
    }

    #[test]
    fn should_keep_the_first_of_duplicate_keys() {
        let parser = Parser::default();
        let parsed = parser.parse_str(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(parsed["a"], JsonValue::Number(1.0));
    }

    #[test]
    fn should_tolerate_trailing_commas() {
        let parser = Parser::default();
        assert!(parser.parse_str(r#"{"a": 1,}"#).is_ok());
        assert!(parser.parse_str(r#"[1, 2, 3,]"#).is_ok());
    }

    #[test]
    fn should_reject_trailing_input() {
        let parser = Parser::default();
        assert!(parser.parse_str(r#"{"a": 1} trailing"#).is_err());
        assert!(parser.parse_str("1 2").is_err());
    }

    #[test]
    fn should_successfully_bail_on_invalid_input() {
        for f in fs::read_dir("fixtures/json/invalid").unwrap() {
            let path = f.unwrap().path();
            let parser = Parser::default();
            let parsed = parser.parse_file(&path);
            println!("Parse result = {:?}", parsed);
            assert!(parsed.is_err());
        }
    }

    #[test]
    fn should_parse_basic_test_files() {
        for f in fs::read_dir("fixtures/json/valid").unwrap() {
            let path = f.unwrap().path();
            println!("Parsing {:?}", &path);
            if path.is_file() {
                let len = fs::metadata(&path).unwrap().len();
                let start = Instant::now();
                let path = relative_file!(path.to_str().unwrap());
                let parser = Parser::default();
                let parsed = parser.parse_file(&path);
                if parsed.is_err() {
                    println!("Parse of {:?} failed with errors: {:?}", &path, &parsed)
                }
                assert!(parsed.is_ok());
                println!(
                    "Parsed {} in {:?} [{:?}]",
                    ByteSize(len),
                    start.elapsed(),
                    path,
                );
            }
        }
    }
}
