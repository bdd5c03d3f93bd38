//! Lexeme definitions for Gherkin feature files
//!
//! Lexemes are produced by the logos derive macro. Keyword literals win over
//! the generic `Word` pattern on equal length, so `Feature` is a keyword while
//! `Features` is a word.

use logos::Logos;

/// Everything the raw lexer can produce
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum Lexeme {
    #[token("Feature")]
    #[token("feature")]
    Feature,

    #[token("Scenario")]
    #[token("scenario")]
    Scenario,

    #[token("Given")]
    #[token("given")]
    Given,

    #[token("When")]
    #[token("when")]
    When,

    #[token("Then")]
    #[token("then")]
    Then,

    // No lowercase form: "and" opens too many prose lines
    #[token("And")]
    And,

    #[token("|")]
    Pipe,

    #[token("@")]
    At,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Number,

    // Any other single non-whitespace character (punctuation, non-ASCII)
    #[regex(r"[^\sA-Za-z0-9_|@]")]
    Symbol,
}

impl Lexeme {
    /// Check if this lexeme is one of the Gherkin keywords
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Lexeme::Feature
                | Lexeme::Scenario
                | Lexeme::Given
                | Lexeme::When
                | Lexeme::Then
                | Lexeme::And
        )
    }

    /// Check if this lexeme is free text the parser never looks at
    pub fn is_text(&self) -> bool {
        matches!(self, Lexeme::Word | Lexeme::Number | Lexeme::Symbol)
    }
}

/// Convenience function to tokenize a string and collect all lexemes.
/// Unlexable input is dropped.
pub fn tokenize(source: &str) -> Vec<Lexeme> {
    Lexeme::lexer(source)
        .filter_map(|result| result.ok())
        .collect()
}

/// Tokenize a string keeping byte spans. Unlexable input is reported as `Err`
/// so the scanner can turn it into an error token.
pub fn tokenize_with_spans(source: &str) -> Vec<(Result<Lexeme, ()>, logos::Span)> {
    let mut lexer = Lexeme::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        lexemes.push((result, lexer.span()));
    }

    lexemes
}
