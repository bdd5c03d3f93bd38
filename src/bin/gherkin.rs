//! Command-line interface for gherkin-ast
//!
//! Usage:
//!   gherkin generate-ast `<path>` [--format `<format>`] [--debug `<flags>`]  - Parse a feature file and print it
//!   gherkin tokens `<path>` [--json]                                      - Dump the scanner tokens
//!   gherkin list-formats                                                - List available output formats
//!
//! Debug flags (`parser`, `astbuilder`, `formatter`, `all`) can also be set
//! with the `GHERKIN_DEBUG` environment variable; `--debug` wins.

use clap::{Arg, ArgAction, Command};
use gherkin_ast::gherkin::config::DebugFlags;
use gherkin_ast::gherkin::logging::init_logging;
use gherkin_ast::gherkin::processor::{available_formats, process_file, ProcessingSpec};

fn main() {
    let matches = Command::new("gherkin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse Gherkin feature files into an AST or JSON document")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate-ast")
                .about("Parse a feature file and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the feature file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'json', 'ast-treeviz')")
                        .default_value("json"),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .help("Debug flags: parser, astbuilder, formatter or all"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the classified scanner tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the feature file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print tokens as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("generate-ast", sub_matches)) => {
            let path = sub_matches.get_one::<String>("path").unwrap();
            let format = sub_matches.get_one::<String>("format").unwrap();
            let debug = sub_matches.get_one::<String>("debug");
            handle_generate_command(path, format, debug.map(String::as_str));
        }
        Some(("tokens", sub_matches)) => {
            let path = sub_matches.get_one::<String>("path").unwrap();
            let format = if sub_matches.get_flag("json") {
                "token-json"
            } else {
                "token-simple"
            };
            handle_generate_command(path, format, None);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn debug_flags(cli: Option<&str>) -> DebugFlags {
    let parsed = match cli {
        Some(value) => value.parse(),
        None => DebugFlags::from_env(),
    };
    parsed.unwrap_or_else(|e| exit_with(e))
}

/// Handle the generate-ast and tokens commands
fn handle_generate_command(path: &str, format: &str, debug: Option<&str>) {
    let flags = debug_flags(debug);
    init_logging(&flags);

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| exit_with(e));
    let output = process_file(path, &spec, &flags).unwrap_or_else(|e| exit_with(e));

    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
