//! Line-aware token scanner
//!
//! The scanner sits between the logos lexer and the parser. It pre-splits the
//! buffer into lines once, classifies every lexeme against its line, and then
//! hands the parser one significant [`Token`] at a time. Text the parser does
//! not care about (`Other`) is skipped silently.
//!
//! Classification rules:
//! - a keyword is significant only when it is the first lexeme of its line
//! - `|` is significant only on lines that start with `|` (table rows)
//! - `@` is significant only on lines that start with `@` (tag lines)
//!
//! One token of lookahead is available through [`Scanner::peek_next_token`],
//! which is what lets the parser decide whether a construct (a table row, a
//! feature description) continues past the current token.

use super::source_map::SourceMap;
use super::tokens::{tokenize_with_spans, Lexeme};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Tokens as seen by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    FeatureKeyword,
    ScenarioKeyword,
    GivenKeyword,
    WhenKeyword,
    ThenKeyword,
    AndKeyword,
    TableDelimiter,
    TagMarker,
    EndOfInput,
    Error,
    Other,
}

impl Token {
    /// Check if this token is something the parser acts on
    pub fn is_gherkin(&self) -> bool {
        !matches!(self, Token::EndOfInput | Token::Error | Token::Other)
    }

    /// Check if this token terminates scanning
    pub fn is_ending(&self) -> bool {
        matches!(self, Token::EndOfInput | Token::Error)
    }

    /// Check if this token opens a step
    pub fn is_step_keyword(&self) -> bool {
        matches!(
            self,
            Token::GivenKeyword | Token::WhenKeyword | Token::ThenKeyword | Token::AndKeyword
        )
    }

    /// Canonical keyword literal, independent of the casing used in the source
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Token::FeatureKeyword => Some("Feature"),
            Token::ScenarioKeyword => Some("Scenario"),
            Token::GivenKeyword => Some("Given"),
            Token::WhenKeyword => Some("When"),
            Token::ThenKeyword => Some("Then"),
            Token::AndKeyword => Some("And"),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(keyword) => write!(f, "{keyword}"),
            None => match self {
                Token::TableDelimiter => write!(f, "|"),
                Token::TagMarker => write!(f, "@"),
                Token::EndOfInput => write!(f, "end of input"),
                Token::Error => write!(f, "error"),
                _ => write!(f, "text"),
            },
        }
    }
}

/// A classified token with its 1-based position and byte span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
    pub span: Range<usize>,
}

/// Pull-based scanner with one token of lookahead
pub struct Scanner<'a> {
    source_name: String,
    map: SourceMap<'a>,
    /// Every classified token, `Other` included; always ends with `EndOfInput`
    tokens: Vec<SpannedToken>,
    /// Index of the first token not yet consumed
    cursor: usize,
    current: SpannedToken,
    /// Index of the peeked token, if a lookahead is pending
    peeked: Option<usize>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over a fully buffered source text. `source_name` is
    /// only used in diagnostics.
    pub fn new(source: &'a str, source_name: impl Into<String>) -> Self {
        let map = SourceMap::new(source);
        let tokens = classify(source, &map);

        Scanner {
            source_name: source_name.into(),
            map,
            tokens,
            cursor: 0,
            current: SpannedToken {
                token: Token::Other,
                line: 1,
                column: 1,
                span: 0..0,
            },
            peeked: None,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Classified token stream, including the text the parser skips
    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    /// Classify a token as terminal for scanning
    pub fn is_ending_token(token: Token) -> bool {
        token.is_ending()
    }

    /// Advance to the next significant token, discarding skipped text.
    /// Once the end is reached, `EndOfInput` is returned forever.
    pub fn next_token(&mut self) -> Token {
        let index = match self.peeked.take() {
            Some(index) => index,
            None => self.find_significant(self.cursor),
        };

        self.current = self.tokens[index].clone();
        self.cursor = (index + 1).min(self.tokens.len() - 1);
        self.current.token
    }

    /// Look one significant token ahead without consuming it.
    ///
    /// Returns `true` when the lookahead is a Gherkin token, `false` when it
    /// is an ending token. The lookahead itself is available through
    /// [`Scanner::peeked`] until the next call to [`Scanner::next_token`].
    pub fn peek_next_token(&mut self) -> bool {
        let index = match self.peeked {
            Some(index) => index,
            None => self.find_significant(self.cursor),
        };
        self.peeked = Some(index);
        !self.tokens[index].token.is_ending()
    }

    /// The pending lookahead token
    pub fn peeked(&self) -> Option<&SpannedToken> {
        self.peeked.map(|index| &self.tokens[index])
    }

    /// Whether the pending lookahead sits on the current token's line
    pub fn next_on_same_line(&self) -> bool {
        self.peeked()
            .map(|next| next.line == self.current.line)
            .unwrap_or(false)
    }

    /// The most recently consumed token
    pub fn current(&self) -> &SpannedToken {
        &self.current
    }

    pub fn line(&self) -> usize {
        self.current.line
    }

    pub fn column(&self) -> usize {
        self.current.column
    }

    /// Indentation of the current token's line, as a 1-based column
    pub fn current_indent(&self) -> usize {
        let leading = self
            .map
            .line(self.current.line)
            .map(|text| text.chars().take_while(|c| *c == ' ' || *c == '\t').count())
            .unwrap_or(0);
        leading + 1
    }

    /// Text of a 1-based source line
    pub fn line_text(&self, line: usize) -> &'a str {
        self.map.line(line).unwrap_or("")
    }

    pub fn line_count(&self) -> usize {
        self.map.line_count()
    }

    /// Text of the current line starting `skip` characters after the current
    /// token's first character
    pub fn rest_of_line(&self, skip: usize) -> &'a str {
        let text = self.line_text(self.current.line);
        let start = self.current.column - 1 + skip;
        match text.char_indices().nth(start) {
            Some((offset, _)) => &text[offset..],
            None => "",
        }
    }

    fn find_significant(&self, from: usize) -> usize {
        self.tokens[from..]
            .iter()
            .position(|t| t.token != Token::Other)
            .map(|offset| from + offset)
            .unwrap_or(self.tokens.len() - 1)
    }
}

/// Lex the whole buffer and demote lexemes that are out of place on their line
fn classify(source: &str, map: &SourceMap<'_>) -> Vec<SpannedToken> {
    let mut tokens = Vec::new();
    let mut line_lead: Option<(usize, Result<Lexeme, ()>)> = None;

    for (result, span) in tokenize_with_spans(source) {
        let (line, column) = map.position(span.start);
        let first_on_line = line_lead.map(|(l, _)| l != line).unwrap_or(true);
        if first_on_line {
            line_lead = Some((line, result));
        }
        let lead = line_lead.map(|(_, lead)| lead);

        let token = match result {
            Err(()) => Token::Error,
            Ok(lexeme) if lexeme.is_keyword() && !first_on_line => Token::Other,
            Ok(Lexeme::Feature) => Token::FeatureKeyword,
            Ok(Lexeme::Scenario) => Token::ScenarioKeyword,
            Ok(Lexeme::Given) => Token::GivenKeyword,
            Ok(Lexeme::When) => Token::WhenKeyword,
            Ok(Lexeme::Then) => Token::ThenKeyword,
            Ok(Lexeme::And) => Token::AndKeyword,
            Ok(Lexeme::Pipe) if lead == Some(Ok(Lexeme::Pipe)) => Token::TableDelimiter,
            Ok(Lexeme::At) if lead == Some(Ok(Lexeme::At)) => Token::TagMarker,
            Ok(_) => Token::Other,
        };

        tokens.push(SpannedToken {
            token,
            line,
            column,
            span,
        });
    }

    let (line, column) = map.position(source.len());
    tokens.push(SpannedToken {
        token: Token::EndOfInput,
        line,
        column,
        span: source.len()..source.len(),
    });

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(source: &str) -> Vec<(Token, usize, usize)> {
        let mut scanner = Scanner::new(source, "test");
        let mut out = Vec::new();
        loop {
            let token = scanner.next_token();
            out.push((token, scanner.line(), scanner.column()));
            if Scanner::is_ending_token(token) {
                break;
            }
        }
        out
    }

    #[test]
    fn test_skips_free_text() {
        let tokens = significant("Feature: Login\n  As a user\n");
        assert_eq!(
            tokens,
            vec![(Token::FeatureKeyword, 1, 1), (Token::EndOfInput, 3, 1)]
        );
    }

    #[test]
    fn test_keyword_only_at_line_start() {
        let tokens = significant("  Given the Feature is on\n");
        assert_eq!(
            tokens,
            vec![(Token::GivenKeyword, 1, 3), (Token::EndOfInput, 2, 1)]
        );
    }

    #[test]
    fn test_table_and_tag_lines() {
        let tokens = significant("@a @b\n| x | y |\nsee a|b or me@host\n");
        assert_eq!(
            tokens,
            vec![
                (Token::TagMarker, 1, 1),
                (Token::TagMarker, 1, 4),
                (Token::TableDelimiter, 2, 1),
                (Token::TableDelimiter, 2, 5),
                (Token::TableDelimiter, 2, 9),
                (Token::EndOfInput, 4, 1),
            ]
        );
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let tokens = significant("# Given nothing\n");
        assert_eq!(tokens, vec![(Token::EndOfInput, 2, 1)]);
    }

    #[test]
    fn test_end_of_input_repeats() {
        let mut scanner = Scanner::new("", "test");
        assert_eq!(scanner.next_token(), Token::EndOfInput);
        assert_eq!(scanner.next_token(), Token::EndOfInput);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = Scanner::new("Given a\nWhen b\n", "test");
        assert_eq!(scanner.next_token(), Token::GivenKeyword);

        assert!(scanner.peek_next_token());
        assert_eq!(scanner.peeked().map(|t| t.token), Some(Token::WhenKeyword));
        assert!(!scanner.next_on_same_line());
        assert_eq!(scanner.line(), 1);

        assert_eq!(scanner.next_token(), Token::WhenKeyword);
        assert_eq!(scanner.line(), 2);
        assert!(!scanner.peek_next_token());
        assert_eq!(scanner.peeked().map(|t| t.token), Some(Token::EndOfInput));
    }

    #[test]
    fn test_peek_same_line() {
        let mut scanner = Scanner::new("| a | b |\n", "test");
        scanner.next_token();
        assert!(scanner.peek_next_token());
        assert!(scanner.next_on_same_line());
        assert_eq!(scanner.peeked().map(|t| t.column), Some(5));
    }

    #[test]
    fn test_indent_and_rest_of_line() {
        let mut scanner = Scanner::new("\n    Given a thing  \n", "test");
        assert_eq!(scanner.next_token(), Token::GivenKeyword);
        assert_eq!(scanner.line(), 2);
        assert_eq!(scanner.current_indent(), 5);
        assert_eq!(scanner.column(), 5);
        assert_eq!(scanner.rest_of_line("Given".len()), " a thing  ");
        assert_eq!(scanner.rest_of_line(100), "");
    }

    #[test]
    fn test_lowercase_keywords() {
        let tokens = significant("feature: x\nscenario: y\n");
        assert_eq!(tokens[0].0, Token::FeatureKeyword);
        assert_eq!(tokens[1].0, Token::ScenarioKeyword);
    }

    #[test]
    fn test_rescan_is_identical() {
        let source = "@tag\nFeature: A\n  Scenario: B\n    Given c\n      | d |\n";
        let first = Scanner::new(source, "a").tokens().to_vec();
        let second = Scanner::new(source, "b").tokens().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_token_keywords() {
        assert_eq!(Token::FeatureKeyword.keyword(), Some("Feature"));
        assert_eq!(Token::AndKeyword.keyword(), Some("And"));
        assert_eq!(Token::TableDelimiter.keyword(), None);
        assert!(Token::ThenKeyword.is_step_keyword());
        assert!(!Token::ScenarioKeyword.is_step_keyword());
        assert!(Token::TagMarker.is_gherkin());
        assert!(!Token::Other.is_gherkin());
        assert!(Token::Error.is_ending());
    }
}
