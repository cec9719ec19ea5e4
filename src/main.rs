use std::{fs, process::ExitCode};

use clap::Parser;
use linecalc::interpret_document;
use tracing_subscriber::{EnvFilter, fmt};

/// linecalc interprets a calculator notepad document line by line and prints
/// one result per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells linecalc to look at a file instead of inline text.
    #[arg(short, long)]
    file: bool,

    /// Culture tag deciding which culture-specific parsers apply (e.g.
    /// `fr-FR` reads `12,5` as a decimal number).
    #[arg(short, long, env = "LINECALC_CULTURE", default_value = "en-US")]
    culture: String,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG controls the log level, warnings only by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(false)
         .init();

    let document = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(document) => document,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    match interpret_document(&document, &args.culture) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
