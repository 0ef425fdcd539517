//! Command-line front end: render a report from a configuration file and a
//! cell file.
//!
//! ```text
//! plaintab render --config report.yaml --cells cells.json --output report.txt
//! plaintab layout --config report.yaml --cells cells.json
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use plaintab::{load_cells, Page, ReportConfig, Table};

/// Lay out cell records as a paginated fixed-width text report.
#[derive(Debug, Parser)]
#[command(name = "plaintab", version)]
pub struct Cli {
    /// Log verbosity: -v for debug, -vv for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the report
    Render(RenderArgs),

    /// Print the column pages and page counts without rendering
    Layout(InputArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Report configuration (YAML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Cell records (YAML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE")]
    pub cells: PathBuf,

    /// Override the configured line width
    #[arg(long)]
    pub linesize: Option<usize>,

    /// Override the configured page length
    #[arg(long)]
    pub pagesize: Option<usize>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail when some columns do not fit the line width
    #[arg(long)]
    pub strict: bool,
}

/// Default log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn load_table(args: &InputArgs) -> Result<Table> {
    let mut config = ReportConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let cells = load_cells(&args.cells)
        .with_context(|| format!("failed to load cells {}", args.cells.display()))?;

    if args.linesize.is_some() || args.pagesize.is_some() {
        config.page = Page::new(
            args.linesize.unwrap_or(config.page.linesize()),
            args.pagesize.unwrap_or(config.page.pagesize()),
        )?;
    }

    tracing::debug!(cells = cells.len(), "loaded report inputs");
    Table::from_config(&config, cells).context("failed to lay out report")
}

/// Describe the layout of `table`: one line per column page, then the
/// physical page count.
pub fn describe(table: &Table) -> String {
    let mut out = String::new();
    for (index, page) in table.layout().pages().iter().enumerate() {
        let columns: Vec<String> = page
            .keys
            .iter()
            .zip(&page.widths)
            .map(|(key, width)| format!("{}={}", key, width))
            .collect();
        let _ = writeln!(
            out,
            "column page {}: {}{}",
            index + 1,
            columns.join(" "),
            if page.overflow { " (overflow)" } else { "" }
        );
    }
    let _ = writeln!(
        out,
        "{} row groups on {} pages",
        table.groups().len(),
        table.paginate().len()
    );
    out
}

/// Run a parsed command line. Returns the text destined for stdout.
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Layout(args) => Ok(describe(&load_table(args)?)),
        Command::Render(args) => {
            let table = load_table(&args.input)?;
            if args.strict && table.has_overflow() {
                anyhow::bail!(
                    "columns do not fit a line of {} characters",
                    table.page().linesize()
                );
            }
            match &args.output {
                Some(path) => {
                    let mut file = std::fs::File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    table
                        .write_to(&mut file)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    Ok(String::new())
                }
                None => Ok(table.render()),
            }
        }
    }
}
