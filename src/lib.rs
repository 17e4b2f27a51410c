#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate is a json parser and writer that keeps track of the shape of every number it reads. Integers come back as 32 or 64 bit, signed or unsigned values, decimals as single or double precision floats, and objects remember the order of their keys.
//!
//! ## How to use it ?
//!
//! ### Parsing
//!
//! ```rust
//! use tagged_json::{parse, value::Value};
//!
//! let parsed = parse(r#"{"id": 42, "delta": -3, "ratio": 0.25}"#).unwrap();
//!
//! assert_eq!(parsed.get("id"), Some(&Value::UInt32(42)));
//! assert_eq!(parsed.get("delta"), Some(&Value::Int32(-3)));
//! assert_eq!(parsed.get("ratio"), Some(&Value::Float(0.25)));
//! ```
//!
//! The numeric type only depends on how the literal is written:
//!
//! - a fractional part with more than 7 digits gives a `Double`, otherwise a `Float`
//! - without a fractional part, a leading `-` gives a signed integer, otherwise an unsigned one
//! - literals of 11 characters or more are stored on 64 bits, shorter ones on 32 bits
//!
//! ### Writing
//!
//! ```rust
//! use tagged_json::{parse, to_string};
//!
//! let parsed = parse("[1, 2, 3]").unwrap();
//!
//! assert_eq!(to_string(&parsed).unwrap(), "[1,2,3]");
//! ```
//!
//! The output is always compact. Floats are written with 7 decimals and doubles with 15.
//!
//! ### Options
//!
//! ```rust
//! use tagged_json::{options::ParseOptions, value::Value, Parser};
//!
//! let parser = Parser::new(ParseOptions::new().permissive_keywords().max_depth(8));
//!
//! assert_eq!(parser.parse("ture").unwrap(), Value::Bool(true));
//! ```
//!
//! ## Limitations
//!
//! - Escape sequences are not interpreted: a string ends at the first `"` and is written back as is.
//! - Characters after the root value are ignored.
//! - Tokens that can't start a value are skipped inside arrays and objects. In an object, the key that preceded such a token is dropped.
//! - A document that doesn't start with a value parses to the string [`INVALID_JSON`].
//! - Integers are narrowed to the width chosen from the literal's length: a 10 character literal above `u32::MAX` keeps its low 32 bits, and literals beyond 64 bits saturate.
//! - Arrays and objects nested deeper than [`options::DEFAULT_MAX_DEPTH`] levels are rejected unless [`options::ParseOptions::max_depth`] raises the limit.

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate serde;

mod input;
mod parser;
mod ser;
mod writer;

pub mod error;
pub mod options;
pub mod value;

pub use parser::{parse, parse_bytes, ParseResult, Parser, Token, INVALID_JSON};
pub use writer::{to_string, Writer, INITIAL_CAPACITY};
