//! Lexer module for Gherkin feature files
//!
//! Tokenization happens in two passes. The first pass is a plain logos lexer
//! producing [`Lexeme`]s for the whole buffer, with no knowledge of lines.
//! The second pass, in the [`Scanner`], classifies lexemes per line (a keyword
//! only counts when it opens its line, `|` only on table rows, `@` only on tag
//! lines) and hands out [`Token`]s with one token of lookahead.
//!
//! Keeping the logos lexer context free means the line rules live in one
//! place, and the raw lexeme stream stays available for token dumps.

pub mod scanner;
pub mod source_map;
pub mod tokens;

pub use scanner::{Scanner, SpannedToken, Token};
pub use source_map::SourceMap;
pub use tokens::{tokenize, tokenize_with_spans, Lexeme};
