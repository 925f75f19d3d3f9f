use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use playtime_core::core_api::{
    CoreError, CoreErrorCode, Engine, InputPaths, OutputTarget, Report, ReportConfig, TimeFormat,
};
use playtime_render::{render_debug_summary, render_report};

/// Multi-letter single-dash spellings accepted for compatibility with older scripts.
const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("-pd", "--playersDirectory"),
    ("-uc", "--usercache"),
    ("-sa", "--serverAge"),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Full,
    Days,
    Hours,
    Minutes,
    Seconds,
    Average,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory with per-player stats files (<uuid>.json)
    #[arg(long = "playersDirectory", value_name = "DIR")]
    players_directory: PathBuf,
    /// Calculation format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Full)]
    format: FormatArg,
    /// Report file; must be empty or absent
    #[arg(
        short,
        long = "outputFile",
        value_name = "FILE",
        required_unless_present = "debug"
    )]
    output_file: Option<PathBuf>,
    /// Usercache file for username lookups
    #[arg(long, value_name = "FILE")]
    usercache: PathBuf,
    /// Server age in days
    #[arg(
        long = "serverAge",
        value_name = "DAYS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    server_age: Option<u32>,
    /// Print per-player summaries to stdout instead of writing a report
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn input_paths(&self) -> InputPaths {
        let output = match (&self.output_file, self.debug) {
            (Some(path), false) => OutputTarget::File(resolve_path(path)),
            _ => OutputTarget::Stdout,
        };
        InputPaths {
            players_dir: resolve_path(&self.players_directory),
            output,
            usercache: resolve_path(&self.usercache),
            format: to_core_format(self.format),
            server_age: self.server_age,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {}", e.message);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CoreError> {
    let inputs = cli.input_paths();
    log::debug!("players directory: {}", inputs.players_dir.display());
    log::debug!("output: {:?}", inputs.output);
    log::debug!("usercache: {}", inputs.usercache.display());

    let engine = Engine::new();
    let config = engine.validate(&inputs)?;
    if config.format() == TimeFormat::Average && config.server_age().is_none() {
        log::warn!("average format without --serverAge reports no play time lines");
    }

    let report = engine.build_report(&config)?;
    match config.output() {
        OutputTarget::File(path) => write_report(&config, path, &report),
        OutputTarget::Stdout => print_debug(&report),
    }
}

fn write_report(config: &ReportConfig, path: &Path, report: &Report) -> Result<(), CoreError> {
    fs::write(path, render_report(report))
        .map_err(|e| CoreError::from_io(&e, "failed to write output file", path))?;
    log::debug!(
        "wrote {} players in {} format to {}",
        report.unique_players(),
        config.format(),
        path.display()
    );
    Ok(())
}

fn print_debug(report: &Report) -> Result<(), CoreError> {
    for record in report.players() {
        let summary = render_debug_summary(record, report.format());
        let rendered = serde_json::to_string(&summary).map_err(|e| {
            CoreError::new(CoreErrorCode::Io, format!("failed to render summary: {e}"))
        })?;
        println!("{}", record.name);
        println!("{rendered}");
    }
    Ok(())
}

/// Rewrites `-pd`, `-uc` and `-sa` (optionally `-pd=VALUE`) to their long forms.
fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            for (legacy, long) in LEGACY_FLAGS {
                if text == legacy {
                    return OsString::from(long);
                }
                if let Some(value) = text.strip_prefix(legacy).and_then(|v| v.strip_prefix('=')) {
                    return OsString::from(format!("{long}={value}"));
                }
            }
            arg
        })
        .collect()
}

fn resolve_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn to_core_format(format: FormatArg) -> TimeFormat {
    match format {
        FormatArg::Full => TimeFormat::Full,
        FormatArg::Days => TimeFormat::Days,
        FormatArg::Hours => TimeFormat::Hours,
        FormatArg::Minutes => TimeFormat::Minutes,
        FormatArg::Seconds => TimeFormat::Seconds,
        FormatArg::Average => TimeFormat::Average,
    }
}
