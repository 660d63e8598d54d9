// varlang: translator for a minimal Var/Begin/End language

use std::fs;
use std::process;

use clap::Parser;

use varlang::translate;

/// Translate Var/Begin/End programs into normalized target text
#[derive(Parser)]
#[command(name = "varlang")]
#[command(about = "Translate Var/Begin/End programs into normalized target text")]
struct Cli {
    /// Path to the source file
    source_file: String,

    /// Reject reads of a variable before its first assignment
    #[arg(long)]
    strict: bool,

    /// Print the parse tree instead of translated output
    #[arg(long)]
    dump_ast: bool,

    /// Output file (if not specified, prints to stdout)
    #[arg(short = 'o', long)]
    output: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.source_file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading '{}': {}", cli.source_file, e);
            process::exit(1);
        }
    };

    if cli.dump_ast {
        match translate::parse(&source) {
            Ok(ast) => print!("{}", ast),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    let result = if cli.strict {
        translate::translate_strict(&source)
    } else {
        translate::translate(&source)
    };

    let output = match result {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Error writing '{}': {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
