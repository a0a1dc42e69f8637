mod debug_report;

use orakor::document::{find_documents, read_document};
use orakor::{DocumentError, Extraction, Options, RuleSet, Tally, extract_with};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    let loaded;
    let rules = match &config.rules {
        Some(path) => match RuleSet::from_path(path) {
            Ok(rules) => {
                loaded = rules;
                &loaded
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        },
        None => RuleSet::builtin(),
    };

    let documents = match find_documents(&config.path) {
        Ok(documents) => documents,
        Err(err @ DocumentError::NotFound(_)) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {}: {err}", err.path().display());
            std::process::exit(1);
        }
    };

    let tally = match run(&documents, rules, &config.options) {
        Ok(tally) => tally,
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return,
        Err(err) => {
            eprintln!("error: failed to write output: {err}");
            std::process::exit(1);
        }
    };

    if config.stats {
        debug_report::print_tally(&tally, config.color);
    }
}

/// A record as printed: the extraction plus the file it came from.
#[derive(Serialize)]
struct FileRecord<'a> {
    #[serde(flatten)]
    hit: &'a Extraction,
    file: &'a str,
}

#[derive(Serialize)]
struct FileError<'a> {
    file: &'a str,
    error: String,
}

/// Extract from every document, one JSON object per line on stdout.
fn run(documents: &[PathBuf], rules: &RuleSet, options: &Options) -> io::Result<Tally> {
    let mut out = io::stdout().lock();
    let mut tally = Tally::default();

    for path in documents {
        let started = Instant::now();
        let file = path.display().to_string();

        let text = match read_document(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(file = %file, error = %err, "skipping document");
                write_line(&mut out, &FileError { file: &file, error: err.to_string() })?;
                tally.record_failure();
                continue;
            }
        };

        let mut extractor = extract_with(&text, rules, options);
        for hit in extractor.by_ref() {
            write_line(&mut out, &FileRecord { hit: &hit, file: &file })?;
        }
        tally.record(extractor.stats(), started.elapsed());
        out.flush()?;
    }

    Ok(tally)
}

fn write_line(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    path: PathBuf,
    rules: Option<PathBuf>,
    options: Options,
    stats: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut path: Option<PathBuf> = None;
    let mut rules: Option<PathBuf> = None;
    let mut options = Options::default();
    let mut stats = false;
    let mut color = io::stderr().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("orakor {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--stats" => stats = true,
            "--rules" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                rules = Some(PathBuf::from(value));
            }
            "--daypart-radius" => {
                let value = args.next().ok_or_else(|| "error: --daypart-radius expects a value".to_string())?;
                options.daypart_radius = parse_radius("--daypart-radius", &value)?;
            }
            "--context-radius" => {
                let value = args.next().ok_or_else(|| "error: --context-radius expects a value".to_string())?;
                options.context_radius = parse_radius("--context-radius", &value)?;
            }
            "--" => {
                for rest in args.by_ref() {
                    set_path(&mut path, &rest)?;
                }
                break;
            }
            _ if arg.starts_with("--rules=") => {
                rules = Some(PathBuf::from(arg.trim_start_matches("--rules=")));
            }
            _ if arg.starts_with("--daypart-radius=") => {
                options.daypart_radius = parse_radius("--daypart-radius", arg.trim_start_matches("--daypart-radius="))?;
            }
            _ if arg.starts_with("--context-radius=") => {
                options.context_radius = parse_radius("--context-radius", arg.trim_start_matches("--context-radius="))?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => set_path(&mut path, &arg)?,
        }
    }

    let Some(path) = path else {
        return Err(format!("error: no input path provided\n\n{}", help_text()));
    };

    Ok(CliConfig { path, rules, options, stats, color })
}

fn set_path(path: &mut Option<PathBuf>, value: &str) -> Result<(), String> {
    if path.is_some() {
        return Err("error: input path provided multiple times".to_string());
    }
    *path = Some(Path::new(value).to_path_buf());
    Ok(())
}

fn parse_radius(flag: &str, value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a non-negative integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "orakor {version}

Extract time-of-day expressions from Hungarian HTML documents.

Usage:
  orakor [OPTIONS] [--] <file-or-dir>

Prints one JSON object per extracted expression to stdout. A directory is
searched recursively for .htm/.html files.

Options:
  --rules <path>             Rule document to use instead of the built-in one.
  --daypart-radius <n>       Characters within which a daypart word settles
                             AM/PM. Default: {daypart}
  --context-radius <n>       Characters of context kept on each side of a
                             match. Default: {context}
  --stats                    Print a per-rule summary to stderr at the end.
  --color                    Force ANSI color in the summary.
  --no-color                 Disable ANSI color in the summary.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter for stderr diagnostics. Default: warn

Exit codes:
  0  Success (unreadable documents are reported inline).
  1  A directory could not be listed, or stdout could not be written.
  2  Invalid arguments, invalid rule document, or missing input path.
",
        version = env!("CARGO_PKG_VERSION"),
        daypart = orakor::DEFAULT_DAYPART_RADIUS,
        context = orakor::DEFAULT_CONTEXT_RADIUS,
    )
}
