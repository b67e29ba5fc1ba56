//! route-lint command line.
//!
//! ```text
//! route-lint [--config route-lint.toml] [--format text|json] [--watch] <FILES>...
//! ```
//!
//! Exit status: 0 when every table is clean, 1 when diagnostics were
//! reported, 2 when a file or the config could not be loaded.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use route_lint::config::loader::{load_document, resolve_config};
use route_lint::config::watcher::DocumentWatcher;
use route_lint::lifecycle::{signals, Shutdown};
use route_lint::observability::init_logging;
use route_lint::{LintReport, LintSession, Linter};

#[derive(Parser)]
#[command(name = "route-lint")]
#[command(about = "Validate API gateway route tables", long_about = None)]
struct Cli {
    /// Route documents to lint (.json, .yaml, .yml or .toml).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Lint configuration file (defaults to ./route-lint.toml if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Re-lint the document whenever it changes.
    #[arg(short, long)]
    watch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_LOAD_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_LOAD_FAILURE);
        }
    };
    init_logging(&config.logging.level);

    tracing::info!(
        files = cli.files.len(),
        watch = cli.watch,
        "route-lint v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let linter = Linter::new(config);

    if cli.watch {
        return watch(&cli, linter).await;
    }

    let mut session = LintSession::new();
    let mut reports = Vec::with_capacity(cli.files.len());
    let mut load_failed = false;

    for path in &cli.files {
        match lint_file(&linter, &mut session, path) {
            Some(report) => reports.push(report),
            None => load_failed = true,
        }
    }

    if let Err(e) = print_reports(&reports, cli.format) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_LOAD_FAILURE);
    }

    if load_failed {
        ExitCode::from(EXIT_LOAD_FAILURE)
    } else if reports.iter().all(LintReport::is_clean) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DIAGNOSTICS)
    }
}

/// Lint one file with a freshly reset session. `None` when it fails to load.
fn lint_file(linter: &Linter, session: &mut LintSession, path: &Path) -> Option<LintReport> {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            return None;
        }
    };

    session.reset();
    let report = linter.lint_document(session, &document).with_source(path);
    tracing::info!(
        path = %path.display(),
        routes = report.routes,
        diagnostics = report.diagnostics.len(),
        "Route table linted"
    );
    Some(report)
}

async fn watch(cli: &Cli, linter: Linter) -> ExitCode {
    let [path] = cli.files.as_slice() else {
        eprintln!("Error: --watch takes exactly one file");
        return ExitCode::from(EXIT_LOAD_FAILURE);
    };

    if let Some(report) = lint_file(&linter, &mut LintSession::new(), path) {
        if let Err(e) = print_reports(&[report], cli.format) {
            eprintln!("Error: {}", e);
        }
    }

    let (watcher, mut reports) = DocumentWatcher::new(path, linter);
    let _guard = match watcher.run() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to watch {}: {}", path.display(), e);
            return ExitCode::from(EXIT_LOAD_FAILURE);
        }
    };

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown));

    loop {
        tokio::select! {
            Some(report) = reports.recv() => {
                if let Err(e) = print_reports(&[report], cli.format) {
                    eprintln!("Error: {}", e);
                }
            }
            _ = stop.recv() => break,
        }
    }

    tracing::info!("Watch stopped");
    ExitCode::SUCCESS
}

fn print_reports(reports: &[LintReport], format: Format) -> Result<(), serde_json::Error> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        Format::Text => {
            for report in reports {
                let source = report
                    .source
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<document>".to_string());
                for diagnostic in &report.diagnostics {
                    println!("{}: {}", source, diagnostic);
                }
            }
            let problems: usize = reports.iter().map(|r| r.diagnostics.len()).sum();
            println!("{} problem(s) in {} file(s)", problems, reports.len());
        }
    }
    Ok(())
}
