use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "arosh")]
#[command(about = "Parse shell command lines and echo their syntax tree")]
#[command(version)]
struct Cli {
    /// Parse the command line given as argument
    #[arg(short = 'c')]
    command: Option<String>,

    /// Print the token stream instead of the syntax tree
    #[arg(long = "tokens")]
    tokens: bool,

    /// Output tokens or trees as JSON, one document per line
    #[arg(long = "json")]
    json: bool,

    /// File whose lines are parsed one at a time (default: stdin)
    #[arg()]
    file: Option<PathBuf>,
}

fn main() {
    // Respects RUST_LOG; logs go to stderr so stdout carries only trees
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("arosh: {}", e);
            2
        }
    };
    std::process::exit(code);
}

/// Returns whether every line parsed.
fn run(cli: &Cli) -> io::Result<bool> {
    if let Some(ref line) = cli.command {
        return echo_line(cli, line);
    }

    let reader: Box<dyn BufRead> = match cli.file {
        Some(ref path) => {
            tracing::debug!(path = %path.display(), "reading lines from file");
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut all_parsed = true;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        all_parsed &= echo_line(cli, &line)?;
    }
    Ok(all_parsed)
}

/// Echo one line back as tokens or as a tree. A line that fails to parse is
/// reported on stderr and dropped.
fn echo_line(cli: &Cli, line: &str) -> io::Result<bool> {
    if cli.tokens {
        let tokens = arosh::tokenize(line);
        if cli.json {
            println!("{}", serde_json::to_string(&tokens)?);
        } else {
            let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
            println!("{}", rendered.join(", "));
        }
        return Ok(true);
    }

    match arosh::parse(line) {
        Ok(program) => {
            if cli.json {
                println!("{}", serde_json::to_string(&program)?);
            } else {
                println!("{}", program);
            }
            Ok(true)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(false)
        }
    }
}
