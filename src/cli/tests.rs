//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cli::{run, Cli, Commands};
use clap::Parser;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generate_command_parses() {
    let cli = Cli::try_parse_from([
        "attrgen",
        "generate",
        "--design",
        "cellar.yaml",
        "--output",
        "out.rs",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            design,
            output,
            config,
        } => {
            assert_eq!(design.to_string_lossy(), "cellar.yaml");
            assert_eq!(output.unwrap().to_string_lossy(), "out.rs");
            assert!(config.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
    assert!(!cli.verbose);
}

#[test]
fn test_check_command_parses_with_verbose() {
    let cli = Cli::try_parse_from(["attrgen", "check", "-d", "cellar.yaml", "--verbose"]).unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Check { design } => assert_eq!(design.to_string_lossy(), "cellar.yaml"),
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_ident_command_parses() {
    let cli = Cli::try_parse_from(["attrgen", "ident", "user_id", "test-B", "--lower"]).unwrap();
    match cli.command {
        Commands::Ident { names, lower, snake } => {
            assert_eq!(names, vec!["user_id", "test-B"]);
            assert!(lower);
            assert!(!snake);
        }
        _ => panic!("Expected Ident command"),
    }
}

#[test]
fn test_ident_requires_names() {
    assert!(Cli::try_parse_from(["attrgen", "ident"]).is_err());
}

#[test]
fn test_ident_lower_conflicts_with_snake() {
    assert!(Cli::try_parse_from(["attrgen", "ident", "a", "--lower", "--snake"]).is_err());
}

#[test]
fn test_generate_requires_design() {
    assert!(Cli::try_parse_from(["attrgen", "generate"]).is_err());
}

#[test]
fn test_run_generate_writes_output() {
    let temp_dir = TempDir::new().unwrap();
    let design = temp_dir.path().join("design.yaml");
    fs::write(
        &design,
        "types:\n  - name: Bottle\n    attributes:\n      - { name: name, type: string }\n",
    )
    .unwrap();
    let output = temp_dir.path().join("gen").join("bottle.rs");

    let cli = Cli::try_parse_from([
        "attrgen",
        "generate",
        "--design",
        design.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    run(cli).unwrap();

    let source = fs::read_to_string(&output).unwrap();
    assert!(source.contains("pub struct Bottle {"));
    assert!(source.contains("pub struct BottlePrivate {"));
}

#[test]
fn test_run_check_fails_on_issues() {
    let temp_dir = TempDir::new().unwrap();
    let design = temp_dir.path().join("design.yaml");
    fs::write(
        &design,
        "types:\n  - name: Bottle\n    attributes:\n      - { name: winery, type: Winery }\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from(["attrgen", "check", "--design", design.to_str().unwrap()]).unwrap();
    let err = run(cli).unwrap_err();
    assert!(err.to_string().contains("issue(s) found"));
}
