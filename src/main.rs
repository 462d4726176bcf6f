// tinyc: syntax checker for a tiny C-like language

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser as _;
use crossterm::style::{Color, Stylize};
use tracing_subscriber::{fmt, EnvFilter};

use tinyc::{load_source, ParseError, Parser, Token};

/// Check a tinyc program for lexical and syntax errors.
#[derive(Debug, clap::Parser)]
#[command(name = "tinyc", version, about)]
struct Args {
    /// Source file to check (`-` reads stdin, omit to check the built-in sample)
    path: Option<PathBuf>,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable coloured status output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    fmt()
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let name = args
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<sample>".to_string());
    tracing::info!("checking {}", name);

    let source = load_source(args.path.as_deref())?;

    let color = !args.no_color;
    let mut parser = match Parser::from_source(&source) {
        Ok(parser) => parser,
        Err(e) => fail(&e, color),
    };

    if args.tokens {
        print_tokens(parser.tokens())?;
    }

    match parser.parse_program() {
        Ok(()) => {
            let message = "Parsing completed successfully! No syntax errors.";
            let color = color && io::stdout().is_terminal();
            println!("{}", status_line(message, Color::Green, color));
            Ok(())
        }
        Err(e) => fail(&e, color),
    }
}

/// Report the first error and exit with a failing status.
fn fail(err: &ParseError, color: bool) -> ! {
    let color = color && io::stderr().is_terminal();
    eprintln!("{}", status_line(&err.to_string(), Color::Red, color));
    std::process::exit(1);
}

/// Colour `message` only when it is headed for a terminal.
fn status_line(message: &str, color: Color, enabled: bool) -> String {
    if enabled {
        message.with(color).to_string()
    } else {
        message.to_string()
    }
}

fn print_tokens(tokens: &[Token]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for token in tokens {
        writeln!(
            out,
            "{:>4}:{:<4} {:<14} {}",
            token.location.line,
            token.location.column,
            format!("{:?}", token.kind),
            token.text
        )?;
    }
    Ok(())
}
