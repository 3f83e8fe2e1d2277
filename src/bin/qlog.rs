use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::Parser;
use quicklog::{Field, LogFile, LogParser, ParseOptions};
use tracing::debug;

/// Print a quick-entry contact log as a table.
#[derive(Debug, Parser)]
#[command(name = "qlog", version, about = "Parse a quick-entry amateur radio log")]
struct Args {
    /// Log file to read, or `-` for stdin.
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// Increment the sent exchange on rows that omit it.
    #[arg(long = "auto-incr")]
    auto_incr: bool,

    /// Fail on the first diagnostic instead of listing them.
    #[arg(long)]
    strict: bool,

    /// Emit the parsed log as JSON.
    #[arg(long)]
    json: bool,

    /// More log output (repeat for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quicklog={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))
}

fn render_table(log: &LogFile) -> String {
    let header: Vec<String> = Field::ALL.iter().map(|f| f.name().to_string()).collect();
    let cells: Vec<Vec<String>> = log
        .iter()
        .map(|row| row.values().map(|(_, v)| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain([header[i].len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cols: &[String]| {
        cols.iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<width$}", width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header[..]));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in &cells {
        out.push_str(&line(&row[..]));
        out.push('\n');
    }
    out
}

fn render_header(log: &LogFile) -> String {
    let operators = log
        .operators()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    [
        ("My Call", log.my_call()),
        ("My Grid", log.my_grid()),
        ("Operators", operators.as_str()),
        ("My QSL Message", log.qsl_msg()),
        ("My WWFF", log.my_wwff()),
        ("My SOTA", log.my_sota()),
        ("My POTA", log.my_pota()),
        ("My QTH Nickname", log.qth_nickname()),
    ]
    .iter()
    .map(|(k, v)| format!("{k}: {v}\n"))
    .collect()
}

fn run(args: &Args) -> Result<()> {
    let text = read_input(&args.input)?;
    let parser = LogParser::new(ParseOptions {
        auto_increment_exchange: args.auto_incr,
        ..ParseOptions::default()
    });

    let log = if args.strict {
        match parser.parse_strict(text.lines()) {
            Ok(log) => log,
            Err(err) => {
                eprintln!("[!!] {err}\n    {}", err.line);
                process::exit(2);
            }
        }
    } else {
        parser.parse(text.lines())
    };
    debug!(rows = log.len(), "parsed {}", args.input.display());

    for err in log.diagnostics() {
        eprintln!("[!!] {err}\n    {}", err.line);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        print!("{}", render_header(&log));
        println!();
        print!("{}", render_table(&log));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    if let Err(err) = run(&args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
