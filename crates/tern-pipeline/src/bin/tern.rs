use clap::{Parser, ValueEnum};
use eyre::Result;
use std::path::PathBuf;
use tern_core::diagnostics::DiagnosticDisplayOptions;
use tern_pipeline::{check_file, init_tracing};
use tern_typing::TypingOptions;
use tracing::error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Diagnostics followed by the type of every top-level binding
    Types,
    /// The typed tree as JSON
    Json,
}

/// Type-check tern source files.
#[derive(Parser)]
#[command(name = "tern", version)]
struct Cli {
    /// Source files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Report type errors as warnings (same as TERN_LOSSY=1)
    #[arg(long)]
    lossy: bool,

    /// Render diagnostics with source excerpts
    #[arg(long)]
    pretty: bool,

    #[arg(long, value_enum, default_value_t = Output::Types)]
    output: Output,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    init_tracing(level);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:?}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every file checked without errors.
fn run(cli: &Cli) -> Result<bool> {
    let mut options = TypingOptions::from_env();
    options.lossy |= cli.lossy;
    let display = if cli.pretty {
        DiagnosticDisplayOptions::pretty()
    } else {
        DiagnosticDisplayOptions::plain()
    };

    let mut clean = true;
    for path in &cli.files {
        let report = check_file(path, options)?;
        if !report.diagnostics.is_empty() {
            eprintln!("{}", report.render(&display));
        }
        match cli.output {
            Output::Types => {
                let bindings = report.render_bindings();
                if !bindings.is_empty() {
                    println!("{}", bindings);
                }
            }
            Output::Json => println!("{}", report.to_json()?),
        }
        clean &= !report.has_errors();
    }
    Ok(clean)
}
