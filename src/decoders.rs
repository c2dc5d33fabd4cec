//! The parser operates over a stream of `char`s produced by some flavour of iterator. By
//! default that iterator is a decoder which takes a stream of bytes from an underlying
//! source and converts it into a stream of `char`s. Currently UTF-8 and ASCII inputs are
//! supported.
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

/// Enumeration of the supported input encodings
#[derive(Debug, Copy, Clone, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
}

/// Create a `char` iterator over a buffered byte source, decoding with the given [Encoding]
pub(crate) fn char_source<'a, Buffer: BufRead>(
    buffer: &'a mut Buffer,
    encoding: Encoding,
) -> Box<dyn Iterator<Item = char> + 'a> {
    match encoding {
        Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
    }
}
