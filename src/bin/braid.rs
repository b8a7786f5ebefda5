//! Command-line interface for braid
//! This binary tokenizes braid files and prints or checks the resulting
//! token stream.
//!
//! Usage:
//!   braid tokens `<path>` [--format `<format>`]  - Print the post-processed token stream
//!   braid check `<path>`                       - Tokenize and report the result

use clap::{Arg, Command};

use braid::lexing::{tokenize, Token};

fn main() {
    let matches = Command::new("braid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting braid token streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Print the post-processed token stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the braid file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('debug' or 'json')")
                        .default_value("debug"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Tokenize a file and report the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the braid file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn lex_source(source: &str) -> Vec<Token> {
    tokenize(source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) {
    let source = read_source(path);
    let tokens = lex_source(&source);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error serializing tokens: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        "debug" => {
            for token in &tokens {
                println!(
                    "{:>4}:{:<4} {:<13} {:?}",
                    token.line,
                    token.column,
                    token.kind.to_string(),
                    token.text
                );
            }
        }
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let source = read_source(path);
    let tokens = lex_source(&source);
    println!("{}: {} tokens", path, tokens.len());
}
