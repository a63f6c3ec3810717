use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use clex::{
    format_error,
    lexer::{lexer::tokenize, tokens::TokenKind},
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tokenize a C-like source file", long_about = None)]
struct Cli {
    /// Source file to tokenize
    file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Leave comments out of the listing
    #[arg(long)]
    skip_comments: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let file_name = cli.file.to_string_lossy().into_owned();
    let file_contents = match read_to_string(&cli.file) {
        Ok(contents) => contents,
        Err(e) => {
            error!(file = %file_name, "failed to read source file: {}", e);
            eprintln!("Error reading input file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(&file_contents) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprint!("{}", format_error(&e, &file_contents, &file_name));
            return ExitCode::FAILURE;
        }
    };

    debug!("Tokenized in {:?}", start.elapsed());

    println!("Tokens:");
    for token in tokens
        .iter()
        .filter(|t| !(cli.skip_comments && t.is_one_of_many(&[TokenKind::Comment])))
    {
        token.debug();
    }

    ExitCode::SUCCESS
}
