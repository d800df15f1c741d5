//! CLI parse tests.

use super::Cli;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

fn parse_err(args: &[&str]) -> ErrorKind {
    Cli::try_parse_from(args).unwrap_err().kind()
}

#[test]
fn cli_parse_version_only() {
    let cli = parse(&["brewgen", "23.1.11"]);
    assert_eq!(cli.release, "23.1.11");
    assert!(cli.template.is_none());
    assert!(cli.config.is_none());
    assert!(!cli.fail_on_http_error);
    assert!(cli.log_file.is_none());
}

#[test]
fn cli_parse_all_options() {
    let cli = parse(&[
        "brewgen",
        "22.2.0",
        "--template",
        "formula.rb.tmpl",
        "--config",
        "/tmp/brewgen.toml",
        "--fail-on-http-error",
        "--log-file",
        "/tmp/brewgen.log",
    ]);
    assert_eq!(cli.release, "22.2.0");
    assert_eq!(cli.template, Some(PathBuf::from("formula.rb.tmpl")));
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/brewgen.toml")));
    assert!(cli.fail_on_http_error);
    assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/brewgen.log")));
}

#[test]
fn cli_parse_missing_version() {
    assert_eq!(
        parse_err(&["brewgen"]),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_parse_extra_positional() {
    assert_eq!(
        parse_err(&["brewgen", "23.1.11", "extra"]),
        ErrorKind::UnknownArgument
    );
}

#[test]
fn cli_parse_help_and_version() {
    assert_eq!(parse_err(&["brewgen", "--help"]), ErrorKind::DisplayHelp);
    assert_eq!(parse_err(&["brewgen", "--version"]), ErrorKind::DisplayVersion);
}

#[test]
fn cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
