use super::*;
use crate::gherkin::ast::Rule;
use crate::gherkin::formats::ast_to_json;
use crate::gherkin::testing::assert_ast;
use rstest::rstest;
use serde_json::json;

/// Sink that records the call sequence
#[derive(Default)]
struct Recorder {
    open: Vec<Rule>,
    events: Vec<String>,
}

impl Formatter for Recorder {
    fn start_rule(&mut self, kind: RuleKind) -> &mut Rule {
        self.events.push(format!("+{kind}"));
        self.open.push(Rule::new(kind));
        self.open.last_mut().unwrap()
    }

    fn current_rule(&mut self) -> Option<&mut Rule> {
        self.open.last_mut()
    }

    fn end_rule(&mut self, kind: RuleKind) {
        let rule = self.open.pop().unwrap();
        assert_eq!(rule.kind, kind);
        self.events.push(format!("-{kind}"));
    }

    fn finish(&mut self) {
        self.events.push("finish".into());
    }
}

fn events(source: &str) -> Vec<String> {
    let mut recorder = Recorder::default();
    Parser::new(source, "test", &mut recorder).parse().unwrap();
    recorder.events
}

#[test]
fn test_simple_scenario() {
    let ast = parse_ast("Feature: F\n  Scenario: S\n    Given a thing\n", "test").unwrap();

    assert_ast(&ast)
        .name("F")
        .description("")
        .language("en")
        .location(1, 1)
        .tags(&[])
        .scenario_count(1)
        .scenario(0, |s| {
            s.name("S")
                .location(2, 3)
                .tags(&[])
                .step_count(1)
                .step(0, |st| {
                    st.keyword("Given")
                        .text("a thing")
                        .location(3, 5)
                        .no_table()
                })
        });
}

#[test]
fn test_event_sequence() {
    assert_eq!(
        events("Feature: F\n  Scenario: S\n    Given a\n"),
        vec![
            "+Feature",
            "+Comments",
            "-Comments",
            "+ScenarioDefinitions",
            "+Scenario",
            "+Steps",
            "+Step",
            "-Step",
            "-Steps",
            "+Tags",
            "-Tags",
            "-Scenario",
            "-ScenarioDefinitions",
            "-Feature",
            "finish",
        ]
    );
}

#[test]
fn test_feature_without_scenarios() {
    assert_eq!(
        events("Feature: F\n"),
        vec![
            "+Feature",
            "+Comments",
            "-Comments",
            "+ScenarioDefinitions",
            "-ScenarioDefinitions",
            "-Feature",
            "finish",
        ]
    );

    let document = parse_json("Feature: F\n", "test").unwrap();
    assert_eq!(document["scenarioDefinitions"], json!([]));
    assert_eq!(document["comments"], json!([]));
    assert!(document.get("tags").is_none());
}

#[test]
fn test_data_table() {
    let source = "\
Feature: F
  Scenario: S
    Given users
      | a | b |
      |a|b|
    When done
";
    let ast = parse_ast(source, "test").unwrap();

    assert_ast(&ast).scenario(0, |s| {
        s.step_count(2)
            .step(0, |st| {
                st.text("users")
                    .table(&[&["a", "b"], &["a", "b"]])
                    .row_location(0, 4, 8)
                    .row_location(1, 5, 8)
            })
            .step(1, |st| st.keyword("When").no_table())
    });

    let step = ast.steps(ast.scenarios()[0])[0];
    let arguments = ast.child_of_kind(step, RuleKind::Arguments).unwrap();
    assert_eq!(ast.rule(arguments).location, Location::new(4, 8));

    let second_row = ast.rows(step)[1];
    let cells = ast.children(second_row);
    assert_eq!(ast.rule(cells[0]).location, Location::new(5, 8));
    assert_eq!(ast.rule(cells[1]).location, Location::new(5, 10));
}

#[test]
fn test_table_cells_are_trimmed_and_may_be_empty() {
    let source = "Feature: F\nScenario: S\nGiven t\n|  spaced out  ||\n";
    let ast = parse_ast(source, "test").unwrap();
    assert_ast(&ast).scenario(0, |s| s.step(0, |st| st.table(&[&["spaced out", ""]])));
}

#[test]
fn test_table_json_shape() {
    let document = parse_json("Feature: F\nScenario: S\nGiven t\n| x |\n", "test").unwrap();
    let step = &document["scenarioDefinitions"][0]["steps"][0];

    assert_eq!(
        step["argument"],
        json!({
            "type": "DataTable",
            "location": {"line": 4, "column": 2},
            "rows": [{
                "type": "TableRow",
                "location": {"line": 4, "column": 2},
                "cells": [{
                    "type": "TableCell",
                    "location": {"line": 4, "column": 2},
                    "value": "x",
                }],
            }],
        })
    );
}

#[test]
fn test_scenario_tags_attach_to_following_scenario() {
    let source = "\
Feature: F
  @smoke @fast
  Scenario: S
    Given x
  @slow
  Scenario: T
    Given y
";
    let ast = parse_ast(source, "test").unwrap();

    assert_ast(&ast)
        .tags(&[])
        .scenario_count(2)
        .scenario(0, |s| s.name("S").tags(&["@smoke", "@fast"]))
        .scenario(1, |s| s.name("T").tags(&["@slow"]).step_count(1));

    let tag = ast.tags(ast.scenarios()[0])[1];
    assert_eq!(ast.rule(tag).location, Location::new(2, 10));
}

#[test]
fn test_feature_tags() {
    let ast = parse_ast("@wip\n@billing\nFeature: F\n", "test").unwrap();
    assert_ast(&ast)
        .tags(&["@wip", "@billing"])
        .location(3, 1)
        .scenario_count(0);

    let document = ast_to_json(&ast);
    assert_eq!(document["tags"][0]["name"], json!("@wip"));
}

#[test]
fn test_trailing_tags_are_dropped() {
    let ast = parse_ast("Feature: F\n  Scenario: S\n  @orphan\n", "test").unwrap();
    assert_ast(&ast).scenario(0, |s| s.tags(&[]));
}

#[test]
fn test_description() {
    let source = "\
Feature: F
  As a user
  # not part of it

  I want things
  Scenario: S
";
    let ast = parse_ast(source, "test").unwrap();
    assert_ast(&ast).description("As a user\n\nI want things");
}

#[test]
fn test_description_at_end_of_input() {
    let ast = parse_ast("Feature: F\n  Some text", "test").unwrap();
    assert_ast(&ast).description("Some text");
}

#[test]
fn test_keywords_are_canonical() {
    let ast = parse_ast("feature: f\n  scenario: s\n    given x\n    when y\n", "test").unwrap();
    assert_eq!(ast.feature().keyword.as_deref(), Some("Feature"));
    assert_ast(&ast).scenario(0, |s| {
        s.step(0, |st| st.keyword("Given"))
            .step(1, |st| st.keyword("When"))
    });
}

#[rstest]
#[case("Given", "Given")]
#[case("When", "When")]
#[case("Then", "Then")]
#[case("And", "And")]
#[case("then", "Then")]
fn test_step_keywords(#[case] keyword: &str, #[case] expected: &str) {
    let source = format!("Feature: F\nScenario: S\n  {keyword} it works\n");
    let ast = parse_ast(&source, "test").unwrap();
    assert_ast(&ast).scenario(0, |s| {
        s.step(0, |st| st.keyword(expected).text("it works").location(3, 3))
    });
}

#[test]
fn test_step_text_keeps_quotes_and_inner_keywords() {
    let source = "Feature: F\nScenario: S\nGiven I type \"When | @done\" here\n";
    let ast = parse_ast(source, "test").unwrap();
    assert_ast(&ast).scenario(0, |s| {
        s.step_count(1)
            .step(0, |st| st.text("I type \"When | @done\" here").no_table())
    });
}

#[test]
fn test_step_before_scenario_is_dropped() {
    let ast = parse_ast("Feature: F\n  Given x\n  Scenario: S\n", "test").unwrap();
    assert_ast(&ast).scenario(0, |s| s.step_count(0));
}

#[test]
fn test_table_outside_step_is_ignored() {
    let source = "Feature: F\n  Scenario: S\n  | a |\n    Given x\n";
    let ast = parse_ast(source, "test").unwrap();
    assert_ast(&ast).scenario(0, |s| s.step_count(1).step(0, |st| st.no_table()));
}

#[test]
fn test_scenario_name_without_colon() {
    let ast = parse_ast("Feature: F\n  Scenario   Loose name  \n", "test").unwrap();
    assert_ast(&ast).scenario(0, |s| s.name("Loose name"));
}

#[test]
fn test_missing_colon() {
    let err = parse_ast("Feature F\n", "bad.feature").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingColon {
            source_name: "bad.feature".into(),
            line: 1,
            column: 8,
        }
    );
    assert!(parse_json("Feature F\n", "bad.feature").is_err());
}

#[rstest]
#[case("")]
#[case("just some text\n")]
#[case("@tag\n")]
fn test_missing_feature(#[case] source: &str) {
    assert_eq!(
        parse_ast(source, "x"),
        Err(ParseError::MissingFeature {
            source_name: "x".into()
        })
    );
}

#[test]
fn test_duplicate_feature() {
    let err = parse_ast("Feature: A\nFeature: B\n", "x").unwrap_err();
    assert_eq!(err.position(), Some((2, 1)));
    assert!(matches!(err, ParseError::DuplicateFeature { .. }));
}

#[test]
fn test_scenario_before_feature() {
    let err = parse_ast("  Scenario: S\nFeature: F\n", "x").unwrap_err();
    assert_eq!(
        err,
        ParseError::ScenarioBeforeFeature {
            source_name: "x".into(),
            line: 1,
            column: 3,
        }
    );
}

#[test]
fn test_sinks_agree() {
    let source = "\
@epic
Feature: Checkout
  Buying things

  @smoke
  Scenario: Pay
    Given a cart
      | item | qty |
      | pen  | 2   |
    When I pay
    Then it works
    And I get a receipt

  Scenario: Empty
";
    let ast = parse_ast(source, "test").unwrap();
    let streamed = parse_json(source, "test").unwrap();
    assert_eq!(streamed, ast_to_json(&ast));
}

#[test]
fn test_full_json_document() {
    let document = parse_json("Feature: F\n  @t\n  Scenario: S\n    Given a thing\n", "test").unwrap();
    assert_eq!(
        document,
        json!({
            "type": "Feature",
            "keyword": "Feature",
            "language": "en",
            "location": {"line": 1, "column": 1},
            "name": "F",
            "description": "",
            "comments": [],
            "scenarioDefinitions": [{
                "type": "Scenario",
                "keyword": "Scenario",
                "location": {"line": 3, "column": 3},
                "name": "S",
                "steps": [{
                    "type": "Step",
                    "keyword": "Given",
                    "location": {"line": 4, "column": 5},
                    "text": "a thing",
                }],
                "tags": [{
                    "type": "Tag",
                    "location": {"line": 2, "column": 3},
                    "name": "@t",
                }],
            }],
        })
    );
}

#[test]
fn test_trace_does_not_change_output() {
    let source = "Feature: F\nScenario: S\nGiven t\n| x |\n";
    let traced = parse_ast_with(source, "test", &DebugFlags::all()).unwrap();
    assert_eq!(traced, parse_ast(source, "test").unwrap());
}
