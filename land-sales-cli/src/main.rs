//! NSW Land Sales CLI Application
//!
//! Decodes every extracted bulk sale file in a directory and writes:
//! - one CSV of sale records in file order
//! - a manifest listing the files read and written
//! - an optional JSON report with per-file counts and footer checks

use anyhow::{bail, Context, Result};
use clap::Parser;
use land_sales_decoder::{assemble, Decoder, FileDecode, FileFailure, NoProgress, Progress};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

mod config;
mod input;
mod output;
mod progress;
mod report;

use progress::Tracker;

/// NSW Land Sales - Convert bulk property sale files to CSV
#[derive(Parser, Debug)]
#[command(name = "land-sales")]
#[command(about = "Decode NSW bulk property sale files into one CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Directory holding the extracted .DAT files
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// CSV output path
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Manifest output path
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Write a JSON report of counts, footer checks and diagnostics
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail a file whose footer counts disagree with its contents
    #[arg(long)]
    strict: bool,

    /// Number of files decoded in parallel (0 = one per core)
    #[arg(short, long, value_name = "COUNT")]
    jobs: Option<usize>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("NSW Land Sales CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", land_sales_decoder::VERSION);

    let config = resolve_config(&args)?;
    run(&config)
}

/// Load the config file if given, then apply command-line overrides
fn resolve_config(args: &Args) -> Result<config::AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.input.data_dir = dir.clone();
    }
    if let Some(csv) = &args.csv {
        config.output.csv_path = csv.clone();
    }
    if let Some(manifest) = &args.manifest {
        config.output.manifest_path = manifest.clone();
    }
    if args.report.is_some() {
        config.output.report_path = args.report.clone();
    }
    if args.strict {
        config.decoder.strict_footer = true;
    }
    if let Some(jobs) = args.jobs {
        config.runtime.jobs = jobs;
    }

    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn run(config: &config::AppConfig) -> Result<()> {
    let paths = input::scan_data_dir(&config.input.data_dir, &config.input.extension)?;
    log::info!(
        "Found {} .{} files in {:?}",
        paths.len(),
        config.input.extension,
        config.input.data_dir
    );

    let decoder = Decoder::new(config.decoder.clone());
    let tracker = Tracker::new("Parsing", paths.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.runtime.jobs)
        .build()
        .context("Failed to start decoding workers")?;

    // Collect keeps input order regardless of which worker finishes first
    let outcomes: Vec<(String, land_sales_decoder::Result<FileDecode>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| decode_one(&decoder, path, &tracker))
            .collect()
    });

    let assembly = assemble(outcomes, &mut NoProgress);
    let read_mib = tracker.bytes() as f64 / (1024.0 * 1024.0);
    log::info!(
        "Decoded {} records from {} files ({:.1}MiB), {} failed",
        assembly.records.len(),
        assembly.summaries.len(),
        read_mib,
        tracker.failed()
    );

    let rows = output::write_csv(&config.output.csv_path, &assembly.records)?;
    log::info!("Wrote {} rows to {:?}", rows, config.output.csv_path);

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let mut written = paths.clone();
    written.push(config.output.csv_path.clone());
    if let Some(report_path) = &config.output.report_path {
        let run_report = report::RunReport::new(
            &generated_at,
            assembly.records.len(),
            &assembly.summaries,
            &assembly.failures,
        );
        report::write_report(report_path, &run_report)?;
        log::info!("Wrote report to {:?}", report_path);
        written.push(report_path.clone());
    }

    report::write_manifest(&config.output.manifest_path, &generated_at, &written)?;
    log::info!("Wrote manifest to {:?}", config.output.manifest_path);

    if !assembly.failures.is_empty() {
        for failure in &assembly.failures {
            log::error!("{}", failure);
        }
        bail!("{} of {} files failed to decode", assembly.failures.len(), paths.len());
    }

    Ok(())
}

/// Decode one file on a worker and report it to the shared tracker
fn decode_one(
    decoder: &Decoder,
    path: &Path,
    tracker: &Tracker,
) -> (String, land_sales_decoder::Result<FileDecode>) {
    let file = path.display().to_string();
    let mut progress = tracker;
    let outcome = match decoder.decode_file(path) {
        Ok(decoded) => {
            progress.on_file(&decoded.summary());
            Ok(decoded)
        }
        Err(error) => {
            let failure = FileFailure {
                file: file.clone(),
                error,
            };
            progress.on_failure(&failure);
            Err(failure.error)
        }
    };
    (file, outcome)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["land-sales"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_flags_override_config() {
        let parsed = args(&["--data-dir", "in", "--csv", "out.csv", "--strict", "-j", "3"]);
        let config = resolve_config(&parsed).unwrap();
        assert_eq!(config.input.data_dir, PathBuf::from("in"));
        assert_eq!(config.output.csv_path, PathBuf::from("out.csv"));
        assert_eq!(config.output.manifest_path, PathBuf::from("./manifest.txt"));
        assert!(config.decoder.strict_footer);
        assert_eq!(config.runtime.jobs, 3);
    }

    #[test]
    fn test_run_over_directory() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("extracted");
        fs::create_dir(&data).unwrap();
        fs::write(
            data.join("ARCHIVE_SALES_1990_0.DAT"),
            "A;214;VG;19940301 10:15;USER01\n\
             B;214;VG;1;L1;;;;;;01/02/2020;1;;5;M;;;A;\n\
             Z;2;1\n",
        )
        .unwrap();
        fs::write(data.join("README.DAT"), "not a sale file").unwrap();

        let mut config = config::AppConfig::default();
        config.input.data_dir = data.clone();
        config.output.csv_path = dir.path().join("land_value.csv");
        config.output.manifest_path = dir.path().join("manifest.txt");
        config.output.report_path = Some(dir.path().join("report.json"));
        config.runtime.jobs = 2;
        run(&config).unwrap();

        let csv = fs::read_to_string(&config.output.csv_path).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("214,"));
        assert!(lines[1].ends_with(",archive"));

        let manifest = fs::read_to_string(&config.output.manifest_path).unwrap();
        assert!(manifest.starts_with("NSW Land Data Manifest (as of "));
        assert!(manifest.contains("ARCHIVE_SALES_1990_0.DAT"));
        assert!(manifest.contains("land_value.csv"));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(report["records"], 1);
        assert_eq!(report["files"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_run_fails_after_writing_outputs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ARCHIVE_SALES_BAD.DAT"), "B;214;VG;1;L1\n").unwrap();

        let mut config = config::AppConfig::default();
        config.input.data_dir = dir.path().to_path_buf();
        config.output.csv_path = dir.path().join("out.csv");
        config.output.manifest_path = dir.path().join("manifest.txt");

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("1 of 1 files failed"));
        assert!(config.output.csv_path.exists());
    }
}
