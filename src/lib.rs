// SPDX-License-Identifier: Unlicense
//! Precedence-climbing parser for integer arithmetic and comparison
//! expressions. Nodes live in an arena; index 0 is reserved as the null node.
pub mod ast;
pub mod driver;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use parser::{parse, parse_with_config, Parse, ParseError, ParserConfig};
