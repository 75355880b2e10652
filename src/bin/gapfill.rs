use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use walkdir::WalkDir;

use gapfill_rs::logger;
use gapfill_rs::{ParseOptions, ReportSink, SeriesFile, TsvSink};

#[derive(Parser)]
#[command(
    name = "gapfill",
    version,
    about = "Fill gaps in delimited sensor reading series"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve missing readings in one or more inputs.
    Fill(Box<FillArgs>),
    /// Inspect a series and print a summary.
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// One `<label>: <value>` line per resolved missing reading.
    Report,
    /// The filled series as timestamp/value records.
    Tsv,
}

#[derive(Parser, Clone)]
struct FillArgs {
    /// Input files or directories (recurses directories).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (computed file names).
    #[arg(long, conflicts_with = "out")]
    out_dir: Option<PathBuf>,

    /// Output file (only valid with a single input; defaults to stdout).
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Sink kind: report or tsv.
    #[arg(long, value_enum, default_value_t = SinkKind::Report)]
    sink: SinkKind,

    /// Field delimiter. Defaults to '\t'.
    #[arg(long)]
    delimiter: Option<char>,

    /// Substring that marks a value field as a missing reading.
    #[arg(long, default_value = "Missing")]
    missing_marker: String,

    /// Number of concurrent worker threads.
    #[arg(long)]
    jobs: Option<usize>,

    /// Stop on first error.
    #[arg(long)]
    fail_fast: bool,

    /// Mirror warnings/errors into a log file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Parser, Clone)]
struct InspectArgs {
    input: PathBuf,
    /// Emit JSON instead of human readable output.
    #[arg(long)]
    json: bool,
}

type AnyError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fill(args) => run_fill(&args),
        Command::Inspect(args) => run_inspect(&args),
    }
}

fn run_fill(args: &FillArgs) -> Result<(), AnyError> {
    if let Some(jobs) = args.jobs {
        // Best-effort: configure global rayon pool once. Ignore error if already set.
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global();
    }
    if let Some(path) = &args.log_file {
        logger::set_log_file(path)?;
    }

    let files = discover_inputs(&args.inputs);
    if files.is_empty() {
        return Err("no series files found in the given inputs".into());
    }
    if args.out.is_some() && files.len() != 1 {
        return Err("--out requires a single input".into());
    }
    if args.out.is_none() && args.out_dir.is_none() && files.len() != 1 {
        return Err("--out-dir is required for multiple inputs".into());
    }

    let options = parse_options(args);

    let mut tasks: Vec<(PathBuf, Option<PathBuf>)> = Vec::with_capacity(files.len());
    if let Some(ref out) = args.out {
        tasks.push((files[0].clone(), Some(out.clone())));
    } else if args.out_dir.is_some() {
        for input in files {
            let output = compute_output_path(&input, args);
            tasks.push((input, Some(output)));
        }
    } else {
        tasks.push((files[0].clone(), None));
    }

    let process = |(input, output): (PathBuf, Option<PathBuf>)| -> Result<(), AnyError> {
        fill_one(&input, output.as_deref(), args, &options)
    };

    if args.fail_fast {
        tasks
            .into_par_iter()
            .map(process)
            .collect::<Result<Vec<_>, _>>()?;
    } else {
        let failures = tasks
            .into_par_iter()
            .map(|(input, output)| {
                let _guard = logger::set_log_prefix(input.display().to_string());
                let result = process((input, output));
                if let Err(ref err) = result {
                    logger::log_error(&err.to_string());
                }
                result
            })
            .filter(Result::is_err)
            .count();
        if failures > 0 {
            logger::log_warn(&format!("completed with {failures} failures"));
        }
    }

    Ok(())
}

fn fill_one(
    input: &Path,
    output: Option<&Path>,
    args: &FillArgs,
    options: &ParseOptions,
) -> Result<(), AnyError> {
    let mut series = SeriesFile::open_with_options(input, options)?;
    let delimiter = args.delimiter.map_or(b'\t', |ch| ch as u8);

    if let Some(path) = output {
        let file = File::create(path)?;
        write_with_sink(&mut series, args.sink, delimiter, file)?;
        println!("{} -> {}", input.display(), path.display());
    } else {
        let stdout = std::io::stdout();
        write_with_sink(&mut series, args.sink, delimiter, stdout.lock())?;
    }
    Ok(())
}

fn write_with_sink<W: Write>(
    series: &mut SeriesFile,
    kind: SinkKind,
    delimiter: u8,
    writer: W,
) -> gapfill_rs::Result<()> {
    match kind {
        SinkKind::Report => {
            let mut sink = ReportSink::new(writer);
            series.fill_into_sink(&mut sink)?;
        }
        SinkKind::Tsv => {
            let mut sink = TsvSink::with_delimiter(writer, delimiter);
            series.fill_into_sink(&mut sink)?;
        }
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> Result<(), AnyError> {
    let series = SeriesFile::open(&args.input)?;
    let summary = series.summary();
    if args.json {
        #[derive(serde::Serialize)]
        struct SummaryJson<'a> {
            record_count: u64,
            present_count: u64,
            missing_count: u64,
            missing_labels: &'a [String],
        }
        let payload = SummaryJson {
            record_count: summary.record_count,
            present_count: summary.present_count,
            missing_count: summary.missing_count,
            missing_labels: &summary.missing_labels,
        };
        serde_json::to_writer_pretty(std::io::stdout(), &payload)?;
        println!();
    } else {
        println!(
            "Records: {}  Present: {}  Missing: {}",
            summary.record_count, summary.present_count, summary.missing_count
        );
        for label in &summary.missing_labels {
            println!("  {label}");
        }
    }
    Ok(())
}

fn parse_options(args: &FillArgs) -> ParseOptions {
    let mut options = ParseOptions::new().with_missing_marker(args.missing_marker.clone());
    if let Some(ch) = args.delimiter {
        options = options.with_delimiter(ch as u8);
    }
    options
}

fn discover_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(false)
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                if path.is_file() && is_series_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            // Non-existent paths are ignored; shell globbing typically expands patterns.
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_series_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv") || e.eq_ignore_ascii_case("txt"))
}

fn compute_output_path(input: &Path, args: &FillArgs) -> PathBuf {
    use std::ffi::OsStr;
    let new_ext = match args.sink {
        SinkKind::Report => "report.txt",
        SinkKind::Tsv => "filled.tsv",
    };
    args.out_dir.as_ref().map_or_else(
        || input.with_extension(new_ext),
        |dir| {
            let fname = input.file_name().unwrap_or_else(|| OsStr::new("output"));
            let renamed = PathBuf::from(fname).with_extension(new_ext);
            dir.join(renamed)
        },
    )
}
