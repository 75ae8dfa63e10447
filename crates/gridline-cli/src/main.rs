//! `gridline` - render CSV, TSV or JSON data as a table.
//!
//! ```text
//! $ gridline people.csv --style rounded --align 1=right --max-width 0=12
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use console::Style;
use gridline::ansi::strip_escapes;
use gridline::{Align, BorderStyle, Cell, EscapePolicy, Table, TableConfig, UnicodeWidth};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Render tabular data with display-width aware alignment
#[derive(Parser, Debug)]
#[command(name = "gridline")]
#[command(version)]
#[command(about = "Render CSV, TSV or JSON data as an aligned table")]
struct Cli {
    /// Input file; reads stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Input format; inferred from the file extension, CSV otherwise
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Border style: single, double, rounded, heavy, ascii, none
    #[arg(short, long)]
    style: Option<BorderStyle>,

    /// Column alignment, e.g. `1=right` (columns count from 0)
    #[arg(short, long = "align", value_name = "COL=ALIGN", value_parser = parse_column::<Align>)]
    aligns: Vec<(usize, Align)>,

    /// Maximum column width, e.g. `0=20` (0 removes the limit)
    #[arg(short = 'w', long = "max-width", value_name = "COL=N", value_parser = parse_column::<usize>)]
    max_widths: Vec<(usize, usize)>,

    /// YAML or JSON table configuration; flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Measure with Unicode East Asian Width data instead of the built-in tables
    #[arg(long)]
    unicode_width: bool,

    /// Keep colour codes in truncated cells and close them with a reset
    #[arg(long)]
    keep_styles: bool,

    /// Write line by line instead of rendering the whole table first
    #[arg(long)]
    stream: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// When to use colour
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Print header cells in bold
    #[arg(long)]
    bold_header: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Csv,
    Tsv,
    Json,
}

impl InputFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(InputFormat::Csv),
            "tsv" | "tab" => Some(InputFormat::Tsv),
            "json" => Some(InputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves `Auto` against the destination: only a colour-capable stdout
    /// gets colour.
    fn enabled(self, to_stdout: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => to_stdout && console::Term::stdout().features().colors_supported(),
        }
    }
}

/// Parses `COL=VALUE`.
fn parse_column<T>(arg: &str) -> std::result::Result<(usize, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (col, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected COL=VALUE, got '{arg}'"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column index '{col}'"))?;
    let value = value.trim().parse().map_err(|e: T::Err| e.to_string())?;
    Ok((col, value))
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn load_table(input: &[u8], format: InputFormat) -> Result<Table> {
    let table = match format {
        InputFormat::Csv => Table::from_csv_reader(input).context("failed to parse CSV")?,
        InputFormat::Tsv => {
            Table::from_delimited_reader(input, b'\t').context("failed to parse TSV")?
        }
        InputFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_slice(input).context("failed to parse JSON")?;
            Table::from_json(&value)
        }
    };
    tracing::info!(
        columns = table.column_count(),
        rows = table.len(),
        ?format,
        "loaded table"
    );
    Ok(table)
}

fn configure(table: &mut Table, cli: &Cli, color: bool) -> Result<()> {
    if let Some(path) = &cli.config {
        let config = TableConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        table.apply_config(&config);
    }

    if let Some(style) = cli.style {
        table.set_style(style);
    }
    if cli.unicode_width {
        table.set_width_fn(UnicodeWidth);
    }
    if cli.keep_styles {
        table.set_escape_policy(EscapePolicy::PreserveAndReset);
    }

    let columns = table.column_count();
    for &(col, align) in &cli.aligns {
        if col >= columns {
            tracing::warn!(col, columns, "--align names a column that does not exist");
        }
        table.set_align(col, align);
    }
    for &(col, max_width) in &cli.max_widths {
        if col >= columns {
            tracing::warn!(col, columns, "--max-width names a column that does not exist");
        }
        table.set_max_width(col, max_width);
    }

    if !color {
        table.map_cells(|cell| Cell::new(strip_escapes(cell.as_bytes())));
    }
    if cli.bold_header {
        let bold = Style::new().bold().force_styling(color);
        table.map_headers(|header| Cell::from(bold.apply_to(header.to_string_lossy()).to_string()));
    }
    Ok(())
}

fn emit<W: Write>(table: &Table, writer: &mut W, stream: bool) -> io::Result<u64> {
    let written = if stream {
        table.stream_to(writer)?
    } else {
        table.write_to(writer)?
    };
    writer.flush()?;
    tracing::debug!(bytes = written, stream, "wrote table");
    Ok(written)
}

fn run(cli: &Cli) -> Result<()> {
    let format = cli
        .format
        .or_else(|| cli.file.as_deref().and_then(InputFormat::from_path))
        .unwrap_or(InputFormat::Csv);
    let input = read_input(cli.file.as_deref())?;
    let mut table = load_table(&input, format)?;

    let color = cli.color.enabled(cli.output.is_none());
    configure(&mut table, cli, color)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            emit(&table, &mut BufWriter::new(file), cli.stream)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            emit(&table, &mut stdout.lock(), cli.stream).context("failed to write output")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    run(&cli)
}
