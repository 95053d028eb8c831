use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rowstack::io::excel_read;
use rowstack::report::{self, MergeObserver};
use rowstack::{MergeError, Result, merge};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Merge(args) => execute_merge(args),
        Command::Sheets(args) => execute_sheets(args),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| MergeError::Logging(error.to_string()))
}

fn execute_merge(args: MergeArgs) -> Result<()> {
    if !args.folder.is_dir() {
        return Err(MergeError::MissingInput(args.folder));
    }
    let master_path = args.folder.join(&args.master);
    if !master_path.exists() {
        return Err(MergeError::MissingInput(master_path));
    }
    let output_path = args.folder.join(&args.output);
    if output_path.exists() {
        if !args.force {
            return Err(MergeError::OutputExists(output_path));
        }
        fs::remove_file(&output_path)?;
    }

    let mut observer = ConsoleObserver::new();
    let run_report = merge::merge_rows(
        &args.folder,
        &args.master,
        &args.output,
        &args.sheet,
        args.header_rows,
        &mut observer,
    );
    observer.finish();

    match report::persist(&args.folder, &run_report) {
        Ok(Some(path)) => println!("log saved: {}", path.display()),
        Ok(None) => {}
        Err(error) => eprintln!("log write failure: {error}"),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run_report.summary)?);
    }

    match run_report.summary.fatal {
        Some(reason) => Err(MergeError::Aborted(reason)),
        None => Ok(()),
    }
}

fn execute_sheets(args: SheetsArgs) -> Result<()> {
    let names = excel_read::list_sheets(&args.file);
    if names.is_empty() {
        return Err(MergeError::NoSheets(args.file));
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Mirrors report lines to stdout and renders the engine's completion
/// fraction as a progress bar.
struct ConsoleObserver {
    bar: ProgressBar,
}

impl ConsoleObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl MergeObserver for ConsoleObserver {
    fn on_line(&mut self, line: &str) {
        self.bar.println(line);
    }

    fn on_progress(&mut self, fraction: f64) {
        self.bar.set_position((fraction * 100.0).round() as u64);
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate rows from a folder of Excel workbooks under a master header."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge data rows from every workbook in the folder under the master
    /// header block.
    Merge(MergeArgs),
    /// List the sheet names of a workbook.
    Sheets(SheetsArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Folder containing the master and candidate workbooks.
    #[arg(long)]
    folder: PathBuf,

    /// Workbook supplying the header rows.
    #[arg(long, default_value = "master.xlsx")]
    master: String,

    /// Name of the merged workbook written inside the folder.
    #[arg(long, default_value = "merged_output.xlsx")]
    output: String,

    /// Sheet read from the master and every candidate.
    #[arg(long)]
    sheet: String,

    /// Leading rows copied verbatim from the master.
    #[arg(long, default_value_t = 1)]
    header_rows: usize,

    /// Overwrite the output workbook if it already exists.
    #[arg(long)]
    force: bool,

    /// Print the merge summary as JSON after the run.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct SheetsArgs {
    /// Workbook to inspect.
    #[arg(long)]
    file: PathBuf,
}
