//! Testing utilities for AST assertions
//!
//! A fluent API over [`Ast`] so a test states the whole document shape it
//! expects instead of walking node ids by hand:
//!
//! ```rust-example
//! use gherkin_ast::gherkin::testing::assert_ast;
//!
//! assert_ast(&ast)
//!     .name("Login")
//!     .scenario_count(1)
//!     .scenario(0, |s| {
//!         s.name("Good password")
//!             .tags(&["@smoke"])
//!             .step(0, |st| st.keyword("Given").text("a registered user"))
//!     });
//! ```
//!
//! Every failure message names the path to the node (`scenarios[0].steps[1]`).

use crate::gherkin::ast::{Ast, Location, NodeId, RuleKind};

/// Create an assertion builder for a document
pub fn assert_ast(ast: &Ast) -> FeatureAssertion<'_> {
    FeatureAssertion { ast }
}

fn tag_names(ast: &Ast, id: NodeId) -> Vec<&str> {
    ast.tags(id)
        .iter()
        .filter_map(|tag| ast.rule(*tag).name.as_deref())
        .collect()
}

fn check_location(ast: &Ast, id: NodeId, line: usize, column: usize, context: &str) {
    assert_eq!(
        ast.rule(id).location,
        Location::new(line, column),
        "{context}: location mismatch"
    );
}

pub struct FeatureAssertion<'a> {
    ast: &'a Ast,
}

impl<'a> FeatureAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.ast.feature().name.as_deref(),
            Some(expected),
            "feature: name mismatch"
        );
        self
    }

    pub fn description(self, expected: &str) -> Self {
        assert_eq!(
            self.ast.feature().description(),
            Some(expected),
            "feature: description mismatch"
        );
        self
    }

    pub fn language(self, expected: &str) -> Self {
        assert_eq!(self.ast.feature().language(), Some(expected));
        self
    }

    pub fn location(self, line: usize, column: usize) -> Self {
        check_location(self.ast, self.ast.root(), line, column, "feature");
        self
    }

    /// Assert the Feature's own tags, in order
    pub fn tags(self, expected: &[&str]) -> Self {
        assert_eq!(
            tag_names(self.ast, self.ast.root()),
            expected,
            "feature: tags mismatch"
        );
        self
    }

    pub fn scenario_count(self, expected: usize) -> Self {
        let names: Vec<_> = self
            .ast
            .scenarios()
            .iter()
            .map(|id| self.ast.rule(*id).name.clone().unwrap_or_default())
            .collect();
        assert_eq!(
            names.len(),
            expected,
            "Expected {} scenarios, found {}: {:?}",
            expected,
            names.len(),
            names
        );
        self
    }

    pub fn scenario<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ScenarioAssertion<'a>) -> ScenarioAssertion<'a>,
    {
        let scenarios = self.ast.scenarios();
        assert!(
            index < scenarios.len(),
            "Scenario index {} out of bounds (feature has {} scenarios)",
            index,
            scenarios.len()
        );
        assertion(ScenarioAssertion {
            ast: self.ast,
            id: scenarios[index],
            context: format!("scenarios[{index}]"),
        });
        self
    }
}

pub struct ScenarioAssertion<'a> {
    ast: &'a Ast,
    id: NodeId,
    context: String,
}

impl<'a> ScenarioAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.ast.rule(self.id).name.as_deref(),
            Some(expected),
            "{}: name mismatch",
            self.context
        );
        self
    }

    pub fn location(self, line: usize, column: usize) -> Self {
        check_location(self.ast, self.id, line, column, &self.context);
        self
    }

    pub fn tags(self, expected: &[&str]) -> Self {
        assert_eq!(
            tag_names(self.ast, self.id),
            expected,
            "{}: tags mismatch",
            self.context
        );
        self
    }

    pub fn step_count(self, expected: usize) -> Self {
        let texts: Vec<_> = self
            .ast
            .steps(self.id)
            .iter()
            .map(|id| self.ast.rule(*id).display_label())
            .collect();
        assert_eq!(
            texts.len(),
            expected,
            "{}: expected {} steps, found {}: {:?}",
            self.context,
            expected,
            texts.len(),
            texts
        );
        self
    }

    pub fn step<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StepAssertion<'a>) -> StepAssertion<'a>,
    {
        let steps = self.ast.steps(self.id);
        assert!(
            index < steps.len(),
            "{}: step index {} out of bounds ({} steps)",
            self.context,
            index,
            steps.len()
        );
        assertion(StepAssertion {
            ast: self.ast,
            id: steps[index],
            context: format!("{}.steps[{index}]", self.context),
        });
        self
    }
}

pub struct StepAssertion<'a> {
    ast: &'a Ast,
    id: NodeId,
    context: String,
}

impl StepAssertion<'_> {
    pub fn keyword(self, expected: &str) -> Self {
        assert_eq!(
            self.ast.rule(self.id).keyword.as_deref(),
            Some(expected),
            "{}: keyword mismatch",
            self.context
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.ast.rule(self.id).text(),
            Some(expected),
            "{}: text mismatch",
            self.context
        );
        self
    }

    pub fn location(self, line: usize, column: usize) -> Self {
        check_location(self.ast, self.id, line, column, &self.context);
        self
    }

    pub fn no_table(self) -> Self {
        assert!(
            self.ast
                .child_of_kind(self.id, RuleKind::Arguments)
                .is_none(),
            "{}: unexpected data table",
            self.context
        );
        self
    }

    /// Assert the data table cell values, row by row
    pub fn table(self, expected: &[&[&str]]) -> Self {
        let actual = self.ast.table(self.id);
        let expected: Vec<Vec<&str>> = expected.iter().map(|row| row.to_vec()).collect();
        assert_eq!(actual, expected, "{}: table mismatch", self.context);
        self
    }

    /// Assert the location of row `row`, which is its first cell's location
    pub fn row_location(self, row: usize, line: usize, column: usize) -> Self {
        let rows = self.ast.rows(self.id);
        assert!(row < rows.len(), "{}: row {} out of bounds", self.context, row);
        check_location(self.ast, rows[row], line, column, &self.context);
        self
    }
}
