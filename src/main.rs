//! Numlint CLI - detect magic numbers in JavaScript and TypeScript sources.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use numlint::{collect_source_files, report, Detector, DetectorConfig, ReporterKind};

/// Exit status when the run completed without findings
const EXIT_CLEAN: u8 = 0;
/// Exit status when at least one magic number was reported
const EXIT_FINDINGS: u8 = 1;
/// Exit status when the run failed
const EXIT_ERROR: u8 = 2;

/// Events buffered between the detector and the reporter
const EVENT_BUFFER: usize = 256;

/// Detect magic numbers in JavaScript and TypeScript code.
#[derive(Parser, Debug)]
#[command(name = "numlint", version, about, long_about = None)]
struct Cli {
    /// Files or directories to scan.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format: simple, detailed or json.
    #[arg(short, long, default_value = "detailed")]
    reporter: ReporterKind,

    /// Disable coloured output.
    #[arg(short = 'C', long)]
    no_color: bool,

    /// Comma separated numbers to ignore, e.g. 0,1. A leading minus sign is
    /// not part of a literal, so ignoring 1 also covers -1.
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    ignore: Vec<f64>,

    /// Only accept literals bound with `const`.
    #[arg(short, long)]
    enforce_const: bool,

    /// Report literals used in object literals and member assignments.
    #[arg(short, long)]
    detect_objects: bool,

    /// Path to a JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(0) => ExitCode::from(EXIT_CLEAN),
        Ok(_) => ExitCode::from(EXIT_FINDINGS),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Scan the requested paths and report to stdout
///
/// Returns the number of findings written.
async fn run(cli: Cli) -> Result<usize> {
    let config = load_config(&cli)?;

    let files = collect_source_files(&cli.paths);
    if files.is_empty() {
        bail!("No JavaScript or TypeScript files found in the given paths");
    }
    tracing::info!(
        files = files.len(),
        reporter = cli.reporter.as_str(),
        "scanning"
    );

    let color = !cli.no_color && std::io::stdout().is_terminal();
    let mut reporter = cli.reporter.build(color);
    let detector = Detector::new(files, config);

    let (tx, rx) = async_channel::bounded(EVENT_BUFFER);
    let detection = async move {
        let result = detector.run(&tx).await;
        drop(tx);
        result
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let (run_result, report_result) =
        tokio::join!(detection, report(rx, reporter.as_mut(), &mut out));

    let summary = run_result.context("Detection failed")?;
    let written = report_result.context("Failed to write report")?;

    tracing::info!(
        files = summary.file_count,
        findings = summary.finding_count,
        "scan complete"
    );

    Ok(written)
}

/// Resolve the detector configuration from the config file and flags
///
/// Flags can only switch options on; `--ignore` values extend the file's list.
fn load_config(cli: &Cli) -> Result<DetectorConfig> {
    let base = match &cli.config {
        Some(path) => DetectorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DetectorConfig::default(),
    };

    let enforce_const = base.enforce_const || cli.enforce_const;
    let detect_objects = base.detect_objects || cli.detect_objects;

    Ok(base
        .with_enforce_const(enforce_const)
        .with_detect_objects(detect_objects)
        .with_ignore(cli.ignore.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["numlint", "src"]).unwrap();
        assert_eq!(cli.reporter, ReporterKind::Detailed);
        assert!(!cli.no_color);
        assert!(cli.ignore.is_empty());
        assert_eq!(cli.paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_paths_required() {
        assert!(Cli::try_parse_from(["numlint"]).is_err());
    }

    #[test]
    fn test_flags_parsed() {
        let cli = Cli::try_parse_from([
            "numlint", "-r", "json", "-C", "-i", "0,1,2.5", "-e", "-d", "-vv", "a.js", "b.js",
        ])
        .unwrap();

        assert_eq!(cli.reporter, ReporterKind::Json);
        assert!(cli.no_color);
        assert_eq!(cli.ignore, vec![0.0, 1.0, 2.5]);
        assert!(cli.enforce_const);
        assert!(cli.detect_objects);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.paths.len(), 2);
    }

    #[test]
    fn test_ignore_help_uses_unsigned_example() {
        let command = Cli::command();
        let ignore = command
            .get_arguments()
            .find(|arg| arg.get_id() == "ignore")
            .unwrap();
        let help = ignore.get_help().unwrap().to_string();

        assert!(help.contains("e.g. 0,1"));
        assert!(!help.contains("0,1,-1"));
    }

    #[tokio::test]
    async fn test_ignoring_one_covers_negative_one() {
        let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
        write!(file, "foo(-1);\nfoo(1);\nfoo(2);").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["numlint", "-i", "1", &path]).unwrap();
        let config = load_config(&cli).unwrap();
        let report = Detector::new(vec![file.path().to_path_buf()], config)
            .collect()
            .await
            .unwrap();

        let values: Vec<&str> = report.findings.iter().map(|f| f.value.raw()).collect();
        assert_eq!(values, vec!["2"]);
    }

    #[test]
    fn test_unknown_reporter_rejected() {
        assert!(Cli::try_parse_from(["numlint", "-r", "xml", "a.js"]).is_err());
    }

    #[test]
    fn test_flags_extend_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"detectObjects": true, "ignore": [0]}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["numlint", "-c", &path, "-e", "-i", "1", "a.js"]).unwrap();
        let config = load_config(&cli).unwrap();

        assert!(config.enforce_const);
        assert!(config.detect_objects);
        assert_eq!(config.ignore, vec![0.0, 1.0]);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["numlint", "-c", "/nonexistent/numlint.json", "a.js"])
            .unwrap();
        let err = load_config(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }
}
