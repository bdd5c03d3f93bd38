//! Debug configuration
//!
//! Each subsystem emits `tracing` debug events only when its flag is set.
//! Flags come from the `GHERKIN_DEBUG` environment variable or the
//! command line, e.g. `GHERKIN_DEBUG=parser,astbuilder` or `all`.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the debug flag list
pub const DEBUG_ENV: &str = "GHERKIN_DEBUG";

/// Per-subsystem debug switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugFlags {
    pub parser: bool,
    pub astbuilder: bool,
    pub formatter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDebugFlag(pub String);

impl fmt::Display for UnknownDebugFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown debug flag '{}', expected one of: parser, astbuilder, formatter, all",
            self.0
        )
    }
}

impl std::error::Error for UnknownDebugFlag {}

impl FromStr for DebugFlags {
    type Err = UnknownDebugFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = DebugFlags::default();
        for key in s
            .split(|c: char| c == ',' || c == ':' || c.is_whitespace())
            .filter(|key| !key.is_empty())
        {
            match key.to_lowercase().as_str() {
                "parser" => flags.parser = true,
                "astbuilder" => flags.astbuilder = true,
                "formatter" => flags.formatter = true,
                "all" => flags = DebugFlags::all(),
                _ => return Err(UnknownDebugFlag(key.to_string())),
            }
        }
        Ok(flags)
    }
}

impl DebugFlags {
    pub fn all() -> Self {
        DebugFlags {
            parser: true,
            astbuilder: true,
            formatter: true,
        }
    }

    /// Read flags from `GHERKIN_DEBUG`. Unset or empty means all off.
    pub fn from_env() -> Result<Self, UnknownDebugFlag> {
        match env::var(DEBUG_ENV) {
            Ok(value) => value.parse(),
            Err(_) => Ok(DebugFlags::default()),
        }
    }

    pub fn any(&self) -> bool {
        self.parser || self.astbuilder || self.formatter
    }

    /// `tracing` filter directives: `warn` plus `debug` for each enabled target
    pub fn filter_directives(&self) -> String {
        let mut directives = vec!["warn".to_string()];
        for (enabled, target) in [
            (self.parser, "gherkin::parser"),
            (self.astbuilder, "gherkin::astbuilder"),
            (self.formatter, "gherkin::formatter"),
        ] {
            if enabled {
                directives.push(format!("{target}=debug"));
            }
        }
        directives.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", DebugFlags::default())]
    #[case("parser", DebugFlags { parser: true, ..Default::default() })]
    #[case("parser,formatter", DebugFlags { parser: true, formatter: true, ..Default::default() })]
    #[case("astbuilder:formatter", DebugFlags { astbuilder: true, formatter: true, ..Default::default() })]
    #[case(" Parser  AstBuilder ", DebugFlags { parser: true, astbuilder: true, ..Default::default() })]
    #[case("all", DebugFlags::all())]
    fn test_parse_flags(#[case] input: &str, #[case] expected: DebugFlags) {
        assert_eq!(input.parse::<DebugFlags>(), Ok(expected));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = "parser,lexer".parse::<DebugFlags>().unwrap_err();
        assert_eq!(err, UnknownDebugFlag("lexer".into()));
        assert!(err.to_string().contains("unknown debug flag 'lexer'"));
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(DebugFlags::default().filter_directives(), "warn");
        let flags = DebugFlags {
            parser: true,
            formatter: true,
            ..Default::default()
        };
        assert_eq!(
            flags.filter_directives(),
            "warn,gherkin::parser=debug,gherkin::formatter=debug"
        );
        assert!(flags.any());
        assert!(!DebugFlags::default().any());
    }
}
