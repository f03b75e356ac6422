mod config;
mod report;
mod tee;

use clap::Parser;
use config::{Config, OutputFormat};
use rsyncstats::{ParseError, Stats};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract transfer totals (bytes sent/received, rate, total size) from
/// rsync output. Run rsync with --stats or -v, without -h, under
/// LC_ALL=C.UTF-8.
#[derive(Parser, Debug)]
#[command(name = "rsyncstats", version, about)]
struct Cli {
    /// File holding rsync output (default: stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, default_value = "rsyncstats.toml")]
    config: PathBuf,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Copy the input to stdout while scanning it; the report goes to stderr
    #[arg(long, overrides_with = "no_passthrough")]
    passthrough: bool,

    /// Do not copy the input, even if the config asks for it
    #[arg(long, overrides_with = "passthrough")]
    no_passthrough: bool,

    /// Exit with status 2 when no summary line was found
    #[arg(long, overrides_with = "no_require_found")]
    require_found: bool,

    /// Exit with status 0 without a summary line, even if the config requires one
    #[arg(long, overrides_with = "require_found")]
    no_require_found: bool,

    /// Debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// `Some(true)` for `--flag`, `Some(false)` for `--no-flag`, `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    /// Apply command-line overrides on top of the config file.
    fn merge_into(&self, cfg: &mut Config) {
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
        if let Some(on) = switch(self.passthrough, self.no_passthrough) {
            cfg.output.passthrough = on;
        }
        if let Some(on) = switch(self.require_found, self.no_require_found) {
            cfg.output.require_found = on;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "rsyncstats=debug"
    } else {
        "rsyncstats=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    ExitCode::from(run(
        &cli,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        std::io::stderr(),
    ))
}

/// Parse `input`, copying it to `out` as it is consumed when `passthrough`
/// is set. After a parse error the rest of the input is still copied so the
/// producer upstream is not cut off mid-write.
fn scan<I: Read, O: Write>(input: I, passthrough: bool, out: &mut O) -> Result<Stats, ParseError> {
    if !passthrough {
        return rsyncstats::parse(input);
    }
    let mut tee = tee::TeeReader::new(input, out);
    let result = rsyncstats::parse(&mut tee);
    if result.is_err() {
        if let Err(e) = std::io::copy(&mut tee, &mut std::io::sink()) {
            tracing::debug!("stopped copying remaining input: {e}");
        }
    }
    result
}

/// Exit status: 0 on success, 1 on any error, 2 when a summary line was
/// required but never seen.
fn run<R: Read, O: Write, E: Write>(cli: &Cli, stdin: R, mut out: O, mut err: E) -> u8 {
    let mut cfg = match config::load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e}");
            return 1;
        }
    };
    cli.merge_into(&mut cfg);

    let passthrough = cfg.output.passthrough;
    let result = match &cli.input {
        Some(path) => match std::fs::File::open(path) {
            Ok(f) => scan(f, passthrough, &mut out),
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to open input: {e}");
                return 1;
            }
        },
        None => scan(stdin, passthrough, &mut out),
    };
    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("{e}");
            return 1;
        }
    };

    let rendered = match report::render(&stats, cfg.output.format) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("failed to render report: {e}");
            return 1;
        }
    };
    // Keep the report apart from passed-through rsync output
    let written = if passthrough {
        err.write_all(rendered.as_bytes()).and_then(|()| err.flush())
    } else {
        out.write_all(rendered.as_bytes()).and_then(|()| out.flush())
    };
    if let Err(e) = written {
        tracing::error!("failed to write report: {e}");
        return 1;
    }

    if !stats.found {
        tracing::warn!("no rsync transfer totals found; was rsync run with --stats or -v?");
        if cfg.output.require_found {
            return 2;
        }
    }
    0
}
