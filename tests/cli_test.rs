//! Tests for argument parsing and command dispatch

use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;

use orgforest::cli::args::{Cli, Commands};
use orgforest::cli::commands::execute_command;
use orgforest::exitcode;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/org")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn given_tree_with_filters_when_parsing_then_fills_filter_args() {
    // Act
    let cli = Cli::try_parse_from([
        "orgforest", "-dd", "tree", "rows.json", "--company", "Acme", "-s", "dados",
    ])
    .unwrap();

    // Assert
    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Tree { rows, filters }) => {
            assert_eq!(rows, PathBuf::from("rows.json"));
            assert_eq!(filters.company.as_deref(), Some("Acme"));
            assert_eq!(filters.team, None);
            assert_eq!(filters.search.as_deref(), Some("dados"));
        }
        other => panic!("expected tree command, got {:?}", other),
    }
}

/// Command line with every `*.json` argument resolved to a fixture path.
fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("orgforest".to_string())
        .chain(args.iter().map(|a| {
            if a.ends_with(".json") {
                fixture(a)
            } else {
                a.to_string()
            }
        }))
        .collect()
}

#[rstest]
#[case(&["tree", "acme.json"])]
#[case(&["tree", "acme.json", "--company", "Beta", "--team", "Dados"])]
#[case(&["roots", "acme.json"])]
#[case(&["show", "acme.json", "Ana-Souza-2"])]
#[case(&["options", "acme.json", "--company", "Acme"])]
fn given_fixture_sheet_when_executing_then_succeeds(#[case] args: &[&str]) {
    let cli = Cli::try_parse_from(argv(args)).unwrap();

    assert!(execute_command(&cli).is_ok());
}

#[rstest]
#[case(&[], exitcode::USAGE)]
#[case(&["show", "acme.json", "Nobody-0"], exitcode::NOINPUT)]
#[case(&["tree", "missing_title.json"], exitcode::DATAERR)]
#[case(&["tree", "malformed.json"], exitcode::DATAERR)]
#[case(&["roots", "absent.json"], exitcode::NOINPUT)]
fn given_failing_invocation_when_executing_then_maps_exit_code(
    #[case] args: &[&str],
    #[case] expected: i32,
) {
    let cli = Cli::try_parse_from(argv(args)).unwrap();

    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), expected);
}
