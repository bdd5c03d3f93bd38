//! Gherkin parser
//!
//! Gherkin has no closing tokens: a construct ends when a token arrives that
//! cannot continue it. The parser therefore keeps a single [`Mode`] flag for
//! the construct currently accumulating tokens and, before handling each
//! token, closes that construct if the token does not belong to it.
//!
//! Structure is reported to a [`Formatter`] as nested `start_rule` /
//! `end_rule` calls. The resulting tree is:
//!
//!     Feature
//!     ├─ Tags            (only when tags precede the Feature header)
//!     ├─ Comments        (always empty)
//!     └─ ScenarioDefinitions
//!        └─ Scenario*
//!           ├─ Steps
//!           │  └─ Step*
//!           │     └─ Arguments  (data table, optional)
//!           │        └─ Rows
//!           │           └─ Cells*
//!           │              └─ Cell*
//!           └─ Tags
//!              └─ Tag*
//!
//! Tags written between the Feature header and a `Scenario` line belong to
//! that scenario. They are buffered when seen and emitted when the scenario
//! closes, since the `Tags` group follows `Steps`.

use crate::gherkin::ast::{Ast, Location, RuleKind};
use crate::gherkin::config::DebugFlags;
use crate::gherkin::error::ParseError;
use crate::gherkin::formatter::{AstBuilder, Formatter, JsonEmitter};
use crate::gherkin::lexer::{Scanner, Token};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

#[cfg(test)]
mod tests;

static TAG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\S*").unwrap());

/// The unterminated construct, if any, that the next token may continue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    None,
    InTable,
    InTags,
    InStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTag {
    name: String,
    location: Location,
}

pub struct Parser<'s, 'f> {
    scanner: Scanner<'s>,
    formatter: &'f mut dyn Formatter,
    mode: Mode,
    feature_seen: bool,
    /// The Feature's own `Tags` group has been opened
    feature_tags: bool,
    /// A `ScenarioDefinitions` group is open
    scenarios: bool,
    /// Tags seen since the last `Scenario` line
    pending_tags: Vec<PendingTag>,
    /// Tags owned by the open scenario, emitted when it closes
    scenario_tags: Vec<PendingTag>,
    /// Line of the open table row
    row_line: Option<usize>,
    trace: bool,
}

impl<'s, 'f> Parser<'s, 'f> {
    pub fn new(
        source: &'s str,
        source_name: impl Into<String>,
        formatter: &'f mut dyn Formatter,
    ) -> Self {
        Parser {
            scanner: Scanner::new(source, source_name),
            formatter,
            mode: Mode::None,
            feature_seen: false,
            feature_tags: false,
            scenarios: false,
            pending_tags: Vec::new(),
            scenario_tags: Vec::new(),
            row_line: None,
            trace: false,
        }
    }

    /// Enable `gherkin::parser` debug events
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run the whole document through the formatter.
    ///
    /// On success the formatter has been finished. On error the formatter is
    /// left with rules open and its output must be discarded.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.formatter.start_rule(RuleKind::Feature);

        loop {
            let token = self.scanner.next_token();
            if self.trace {
                debug!(
                    target: "gherkin::parser",
                    line = self.scanner.line(),
                    column = self.scanner.column(),
                    mode = ?self.mode,
                    "token {token}"
                );
            }

            match token {
                Token::FeatureKeyword => self.feature()?,
                Token::ScenarioKeyword => self.scenario()?,
                Token::GivenKeyword | Token::WhenKeyword | Token::ThenKeyword | Token::AndKeyword => {
                    self.step(token)
                }
                Token::TableDelimiter => self.table_delimiter(),
                Token::TagMarker => self.tag(),
                Token::EndOfInput | Token::Error => return self.end(),
                Token::Other => {}
            }
        }
    }

    /// Close the open construct if `token` cannot continue it
    fn maybe_end_mode(&mut self, token: Token) {
        match self.mode {
            Mode::InTags => {
                self.formatter.end_rule(RuleKind::Tags);
            }
            Mode::InTable if token != Token::TableDelimiter => {
                self.formatter.end_rule(RuleKind::Cells);
                self.formatter.end_rule(RuleKind::Rows);
                self.formatter.end_rule(RuleKind::Arguments);
                self.formatter.end_rule(RuleKind::Step);
                self.row_line = None;
            }
            Mode::InStep if token != Token::TableDelimiter => {
                self.formatter.end_rule(RuleKind::Step);
            }
            _ => return,
        }
        self.mode = Mode::None;
    }

    fn location(&self) -> Location {
        Location::new(self.scanner.line(), self.scanner.column())
    }

    fn feature(&mut self) -> Result<(), ParseError> {
        self.maybe_end_mode(Token::FeatureKeyword);
        let (line, column) = (self.scanner.line(), self.scanner.column());

        if self.feature_seen {
            return Err(ParseError::DuplicateFeature {
                source_name: self.scanner.source_name().to_string(),
                line,
                column,
            });
        }

        let keyword = "Feature";
        let rest = self.scanner.rest_of_line(keyword.len());
        let name = match rest.strip_prefix(':') {
            Some(name) => name.trim().to_string(),
            None => {
                return Err(ParseError::MissingColon {
                    source_name: self.scanner.source_name().to_string(),
                    line,
                    column: column + keyword.len(),
                })
            }
        };
        let description = self.description(line);

        if let Some(rule) = self.formatter.current_rule() {
            rule.set_keyword(keyword)
                .set_name(name)
                .set_description(description)
                .set_language("en")
                .set_location(Location::new(line, column));
        }
        self.formatter.start_rule(RuleKind::Comments);
        self.formatter.end_rule(RuleKind::Comments);
        self.feature_seen = true;
        Ok(())
    }

    /// Free text between the Feature line and the next significant token
    fn description(&mut self, feature_line: usize) -> String {
        let end_line = if self.scanner.peek_next_token() {
            self.scanner
                .peeked()
                .map(|next| next.line)
                .unwrap_or(feature_line + 1)
        } else {
            self.scanner.line_count() + 1
        };

        let lines: Vec<&str> = (feature_line + 1..end_line)
            .map(|line| self.scanner.line_text(line).trim())
            .filter(|text| !text.starts_with('#'))
            .collect();
        lines.join("\n").trim().to_string()
    }

    fn scenario(&mut self) -> Result<(), ParseError> {
        self.maybe_end_mode(Token::ScenarioKeyword);

        if !self.feature_seen {
            return Err(ParseError::ScenarioBeforeFeature {
                source_name: self.scanner.source_name().to_string(),
                line: self.scanner.line(),
                column: self.scanner.column(),
            });
        }

        if self.scenarios {
            self.end_scenario();
        } else {
            self.formatter.start_rule(RuleKind::ScenarioDefinitions);
            self.scenarios = true;
        }
        self.scenario_tags = std::mem::take(&mut self.pending_tags);

        let keyword = "Scenario";
        let rest = self.scanner.rest_of_line(keyword.len()).trim_start();
        let name = rest.strip_prefix(':').unwrap_or(rest).trim().to_string();
        let location = Location::new(self.scanner.line(), self.scanner.current_indent());

        self.formatter
            .start_rule(RuleKind::Scenario)
            .set_keyword(keyword)
            .set_name(name)
            .set_location(location);
        self.formatter.start_rule(RuleKind::Steps);
        Ok(())
    }

    /// Close the open scenario: its steps, then its tags, then itself
    fn end_scenario(&mut self) {
        self.formatter.end_rule(RuleKind::Steps);

        self.formatter.start_rule(RuleKind::Tags);
        for tag in std::mem::take(&mut self.scenario_tags) {
            self.formatter
                .start_rule(RuleKind::Tag)
                .set_name(tag.name)
                .set_location(tag.location);
            self.formatter.end_rule(RuleKind::Tag);
        }
        self.formatter.end_rule(RuleKind::Tags);

        self.formatter.end_rule(RuleKind::Scenario);
    }

    fn step(&mut self, token: Token) {
        self.maybe_end_mode(token);

        if !self.scenarios {
            if self.trace {
                debug!(target: "gherkin::parser", line = self.scanner.line(), "step outside a scenario dropped");
            }
            return;
        }

        let keyword = token.keyword().unwrap_or_default();
        let text = self.scanner.rest_of_line(keyword.len()).trim().to_string();
        let location = self.location();

        self.formatter
            .start_rule(RuleKind::Step)
            .set_keyword(keyword)
            .set_text(text)
            .set_location(location);
        self.mode = Mode::InStep;
    }

    /// A `|` on a table line. Each delimiter followed by another one on the
    /// same line produces the cell between them.
    fn table_delimiter(&mut self) {
        self.maybe_end_mode(Token::TableDelimiter);

        if self.mode != Mode::InStep && self.mode != Mode::InTable {
            if self.trace {
                debug!(target: "gherkin::parser", line = self.scanner.line(), "table outside a step ignored");
            }
            return;
        }

        let (line, column) = (self.scanner.line(), self.scanner.column());
        let next_column = if self.scanner.peek_next_token() {
            self.scanner
                .peeked()
                .filter(|next| next.token == Token::TableDelimiter && next.line == line)
                .map(|next| next.column)
        } else {
            None
        };
        // Closing delimiter of a row
        let Some(next_column) = next_column else {
            return;
        };

        let cell_location = Location::new(line, column + 1);
        if self.mode == Mode::InStep {
            self.formatter
                .start_rule(RuleKind::Arguments)
                .set_location(cell_location);
            self.formatter.start_rule(RuleKind::Rows);
            self.mode = Mode::InTable;
        }
        if self.row_line != Some(line) {
            if self.row_line.is_some() {
                self.formatter.end_rule(RuleKind::Cells);
            }
            self.formatter
                .start_rule(RuleKind::Cells)
                .set_location(cell_location);
            self.row_line = Some(line);
        }

        let value: String = self
            .scanner
            .line_text(line)
            .chars()
            .skip(column)
            .take(next_column - column - 1)
            .collect();
        self.formatter
            .start_rule(RuleKind::Cell)
            .set_value(value.trim())
            .set_location(cell_location);
        self.formatter.end_rule(RuleKind::Cell);
    }

    fn tag(&mut self) {
        if self.mode != Mode::InTags {
            self.maybe_end_mode(Token::TagMarker);
        }

        let name = TAG_NAME
            .find(self.scanner.rest_of_line(0))
            .map(|m| m.as_str())
            .unwrap_or("@")
            .to_string();
        let location = self.location();

        if self.feature_seen {
            self.pending_tags.push(PendingTag { name, location });
            return;
        }

        // Tags ahead of the Feature header belong to the Feature
        if self.mode != Mode::InTags {
            if self.feature_tags {
                if self.trace {
                    debug!(target: "gherkin::parser", %name, "detached feature tag dropped");
                }
                return;
            }
            self.formatter.start_rule(RuleKind::Tags);
            self.feature_tags = true;
            self.mode = Mode::InTags;
        }
        self.formatter
            .start_rule(RuleKind::Tag)
            .set_name(name)
            .set_location(location);
        self.formatter.end_rule(RuleKind::Tag);
    }

    fn end(&mut self) -> Result<(), ParseError> {
        self.maybe_end_mode(Token::EndOfInput);

        if !self.feature_seen {
            return Err(ParseError::MissingFeature {
                source_name: self.scanner.source_name().to_string(),
            });
        }

        if self.scenarios {
            self.end_scenario();
        } else {
            self.formatter.start_rule(RuleKind::ScenarioDefinitions);
        }
        self.formatter.end_rule(RuleKind::ScenarioDefinitions);

        if self.trace && !self.pending_tags.is_empty() {
            debug!(
                target: "gherkin::parser",
                count = self.pending_tags.len(),
                "tags without a following scenario dropped"
            );
        }
        self.pending_tags.clear();

        self.formatter.end_rule(RuleKind::Feature);
        self.formatter.finish();
        Ok(())
    }
}

/// Parse a document into an [`Ast`]
pub fn parse_ast(source: &str, source_name: &str) -> Result<Ast, ParseError> {
    parse_ast_with(source, source_name, &DebugFlags::default())
}

pub fn parse_ast_with(
    source: &str,
    source_name: &str,
    flags: &DebugFlags,
) -> Result<Ast, ParseError> {
    let mut builder = AstBuilder::new(flags.astbuilder);
    Parser::new(source, source_name, &mut builder)
        .with_trace(flags.parser)
        .parse()?;
    Ok(builder.into_ast())
}

/// Parse a document straight into its JSON document, without building a tree
pub fn parse_json(source: &str, source_name: &str) -> Result<Value, ParseError> {
    parse_json_with(source, source_name, &DebugFlags::default())
}

pub fn parse_json_with(
    source: &str,
    source_name: &str,
    flags: &DebugFlags,
) -> Result<Value, ParseError> {
    let mut emitter = JsonEmitter::new(flags.formatter);
    Parser::new(source, source_name, &mut emitter)
        .with_trace(flags.parser)
        .parse()?;
    Ok(emitter.into_value())
}
