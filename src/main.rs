//! Purpose: `jsonfetch` CLI entry point.
//! Role: Binary crate root; parses args, runs the pipeline, writes pretty JSON on stdout.
//! Invariants: With no arguments, fetches the default endpoint and prints it with sorted keys.
//! Invariants: Stdout receives output only after the pipeline fully succeeded.
//! Invariants: Errors are emitted on stderr (human text on a TTY, JSON otherwise).
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::{Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use jsonfetch::api::{
    DEFAULT_INDENT, DEFAULT_URL, Error, ErrorKind, PipelineOptions, Variant, parse_url,
    run_pipeline, to_exit_code,
};
use serde_json::{Map, Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

#[derive(Parser)]
#[command(
    name = "jsonfetch",
    version,
    about = "Fetch a JSON document over HTTP and pretty-print it",
    long_about = None,
    after_help = r#"EXAMPLES
  $ jsonfetch                                   # default endpoint, sorted keys
  $ jsonfetch --inspect                         # raw bytes, pretty JSON, first element type
  $ jsonfetch --url http://localhost:8000/data.json --indent 2 --no-sort-keys

LOGGING
  Set RUST_LOG (e.g. RUST_LOG=debug) to see request diagnostics on stderr."#
)]
struct Cli {
    #[arg(
        long,
        value_name = "URL",
        help = "Endpoint to fetch (default: the locations.json example endpoint)",
        value_hint = ValueHint::Url
    )]
    url: Option<String>,
    #[arg(
        long,
        help = "Print raw response bytes and the first element's type around the pretty JSON"
    )]
    inspect: bool,
    #[arg(
        long,
        overrides_with = "no_sort_keys",
        help = "Sort object keys (default for the plain dump)"
    )]
    sort_keys: bool,
    #[arg(
        long,
        overrides_with = "sort_keys",
        help = "Keep object keys in document order (default for --inspect)"
    )]
    no_sort_keys: bool,
    #[arg(
        long,
        default_value_t = DEFAULT_INDENT as u8,
        value_parser = clap::value_parser!(u8).range(0..=16),
        help = "Spaces per indentation level"
    )]
    indent: u8,
    #[arg(long, help = "Write non-ASCII characters as UTF-8 instead of \\u escapes")]
    no_ensure_ascii: bool,
    #[arg(
        long,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Overall request timeout in seconds (default: none)"
    )]
    timeout_secs: Option<u64>,
    #[arg(
        long,
        default_value = "never",
        value_enum,
        help = "Colorize pretty JSON output: auto|always|never"
    )]
    color: ColorMode,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl Cli {
    fn into_options(self) -> Result<PipelineOptions, Error> {
        let variant = if self.inspect {
            Variant::Inspect
        } else {
            Variant::Dump
        };
        let url = self.url.unwrap_or_else(|| DEFAULT_URL.to_string());
        parse_url(&url)?;

        let mut options = PipelineOptions::new(variant).with_url(url);
        if self.sort_keys {
            options.render.sort_keys = true;
        } else if self.no_sort_keys {
            options.render.sort_keys = false;
        }
        options.render.indent = usize::from(self.indent);
        options.render.ensure_ascii = !self.no_ensure_ascii;
        options.render.color = self.color.use_color(io::stdout().is_terminal());
        options.fetch.timeout = self.timeout_secs.map(Duration::from_secs);
        Ok(options)
    }
}

fn run<I>(args: I) -> Result<RunOutcome, Error>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(RunOutcome::with_code(0));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `jsonfetch --help`."));
            }
        },
    };

    init_tracing();
    let options = cli.into_options()?;
    debug!(url = %options.url, variant = ?options.variant, "starting pipeline");

    let output = run_pipeline(&options).map_err(add_network_hint)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output.write_to(&mut handle).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_source(err)
    })?;
    Ok(RunOutcome::ok())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn add_network_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Network || err.hint().is_some() {
        return err;
    }
    err.with_hint("Network request failed. Check connectivity and the --url value.")
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, true));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Io\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    match err.message() {
        Some(message) => message.to_string(),
        None => format!("{:?} error", err.kind()).to_ascii_lowercase(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(url) = err.url() {
        inner.insert("url".to_string(), json!(url));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(url) = err.url() {
        lines.push(format!(
            "{} {url}",
            colorize_label("url:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(status) = err.status() {
        lines.push(format!(
            "{} {status}",
            colorize_label("status:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
