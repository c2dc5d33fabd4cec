//! A JSON value model with a lazy, composable query engine on top.
//!
//! The crate is split into two halves:
//!
//! - a codec: [dom::Parser] reads JSON text from files, byte slices, strings or raw
//!   `char` iterators into an owned [JsonValue] tree, and `Display` on [JsonValue]
//!   writes compact JSON back out;
//! - a query engine: [JsonValue::query] starts an immutable chain of matchers
//!   (keys, indices, slices, wildcards, recursive descent, predicates) which
//!   evaluates lazily when iterated. See the [query] module for the details.
//!
//! Scalar conversions (booleans, numbers, text, timestamps) live in [convert].
//!
//! ```
//! use sift_json::dom::Parser;
//!
//! let json = Parser::default()
//!     .parse_str(r#"{"values": [1, 2, 3, 4]}"#)
//!     .unwrap();
//! let picked: Vec<_> = json.query().key("values").slice(1..3).iter().collect();
//! assert_eq!(picked.len(), 2);
//! ```
pub mod convert;
pub mod coords;
mod decoders;
pub mod dom;
pub mod errors;
pub mod lexer;
pub mod query;
#[cfg(test)]
mod test_macros;
pub mod value;

pub use convert::{DateNumberFormat, DateStringFormat};
pub use decoders::Encoding;
pub use dom::Parser;
pub use errors::{ParserError, ParserResult};
pub use query::{Axis, Matcher, Predicate, Query, QueryIter};
pub use value::JsonValue;
