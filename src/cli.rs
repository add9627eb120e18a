/*!
glimpse Command Line Interface

Provides commands for analyzing tabular data files and printing column
analyses and chart suggestions in various output formats.
*/

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use glimpse::reader::load_table;
use glimpse::writer::{JsonReportWriter, ReportWriter};
use glimpse::{ClassifierOptions, ColumnDataType, DatasetReport, Table, VERSION};

#[derive(Parser)]
#[command(name = "glimpse")]
#[command(about = "Column-level dataset analysis and chart suggestions")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file and print the full report
    Analyze {
        /// Path to a CSV, JSON, or Excel file
        file: PathBuf,

        /// Output format (json, pretty-json, text)
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Date-majority threshold for the type classifier
        #[arg(long, default_value_t = 0.7)]
        date_threshold: f64,

        /// Show verbose output (file details, column counts)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print only the ranked chart suggestions for a data file
    Suggest {
        /// Path to a CSV, JSON, or Excel file
        file: PathBuf,

        /// Output format (json, text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show headers, inferred column types and row count without statistics
    Preview {
        /// Path to a CSV, JSON, or Excel file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            format,
            output,
            date_threshold,
            verbose,
        } => {
            if verbose {
                eprintln!("Analyzing file: {}", file.display());
            }
            cmd_analyze(file, format, output, date_threshold, verbose);
        }

        Commands::Suggest { file, format } => {
            cmd_suggest(file, format);
        }

        Commands::Preview { file } => {
            cmd_preview(file);
        }
    }

    Ok(())
}

fn read_table(file: &PathBuf) -> Table {
    match load_table(file) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Failed to read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn emit(content: String, output: Option<PathBuf>, verbose: bool) {
    let Some(output) = output else {
        // Empty output location, write to stdout
        println!("{}", content);
        return;
    };

    match std::fs::write(&output, &content) {
        Ok(_) => {
            if verbose {
                eprintln!("\nReport written to: {}", output.display());
            }
        }
        Err(e) => {
            eprintln!("Failed to write to output file: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_analyze(
    file: PathBuf,
    format: String,
    output: Option<PathBuf>,
    date_threshold: f64,
    verbose: bool,
) {
    let table = read_table(&file);

    if verbose {
        eprintln!("Parsed {} rows, {} columns", table.row_count(), table.headers().len());
        eprintln!("Columns: {:?}", table.headers());
    }

    let options = ClassifierOptions {
        date_fraction_threshold: date_threshold,
        ..Default::default()
    };
    let report = DatasetReport::build_with(&table, &options);

    if verbose {
        eprintln!(
            "\nAnalysis complete: {} suggestions generated",
            report.suggestion_count()
        );
    }

    match format.as_str() {
        "json" | "pretty-json" => {
            let writer = if format == "json" {
                JsonReportWriter::new()
            } else {
                JsonReportWriter::pretty()
            };
            match writer.write(&report) {
                Ok(json) => emit(json, output, verbose),
                Err(e) => {
                    eprintln!("Failed to generate report: {}", e);
                    std::process::exit(1);
                }
            }
        }
        "text" => emit(render_text_report(&report), output, verbose),
        _ => {
            eprintln!("Unknown format: {}", format);
            eprintln!("Available formats: json, pretty-json, text");
            std::process::exit(1);
        }
    }
}

fn cmd_suggest(file: PathBuf, format: String) {
    let table = read_table(&file);
    let report = DatasetReport::build(&table);

    match format.as_str() {
        "json" => match serde_json::to_string_pretty(&report.suggestions) {
            Ok(pretty) => println!("{}", pretty),
            Err(error) => eprintln!("{}", error),
        },
        "text" => {
            if report.suggestions.is_empty() {
                println!("No chart suggestions for this dataset.");
                return;
            }
            println!("Chart suggestions: {} total", report.suggestion_count());
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                println!(
                    "\n#{} {} (score {:.2})",
                    i + 1,
                    suggestion.chart_type,
                    suggestion.score
                );
                println!("  {}", suggestion.title);
                println!("  {}", suggestion.description);
                let columns: Vec<String> = suggestion
                    .required_columns
                    .iter()
                    .map(|c| format!("{} ({})", c.header, c.data_type))
                    .collect();
                println!("  Columns: {}", columns.join(", "));
            }
        }
        _ => {
            eprintln!("Unknown format: {}", format);
            std::process::exit(1);
        }
    }
}

fn cmd_preview(file: PathBuf) {
    let table = read_table(&file);
    let report = DatasetReport::build(&table);

    println!("{}", file.display());
    println!("Rows: {}", table.row_count());
    println!("Columns: {}", table.headers().len());
    for analysis in report.analysis.values() {
        println!(
            "  {} [{}] ({} missing)",
            analysis.header, analysis.data_type, analysis.missing_count
        );
    }
}

fn render_text_report(report: &DatasetReport) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dataset: {} rows, {} columns",
        report.metadata.rows,
        report.metadata.columns.len()
    );

    for analysis in report.analysis.values() {
        let _ = writeln!(out, "\nColumn '{}' [{}]", analysis.header, analysis.data_type);
        let _ = writeln!(
            out,
            "  Rows: {} ({} missing)",
            analysis.total_count, analysis.missing_count
        );

        match analysis.data_type {
            ColumnDataType::Numerical | ColumnDataType::Date => {
                if let Some(stats) = &analysis.stats {
                    let _ = writeln!(out, "  Count:  {}", stats.count);
                    let _ = writeln!(out, "  Min:    {}", fmt_stat(stats.min));
                    let _ = writeln!(out, "  Max:    {}", fmt_stat(stats.max));
                    let _ = writeln!(out, "  Mean:   {}", fmt_stat(stats.mean));
                    let _ = writeln!(out, "  Median: {}", fmt_stat(stats.median));
                    let _ = writeln!(out, "  Stddev: {}", fmt_stat(stats.std_dev));
                }
            }
            ColumnDataType::Categorical => {
                if let Some(unique_values) = &analysis.unique_values {
                    let _ = writeln!(out, "  Distinct values: {}", unique_values.len());
                    for (key, count) in unique_values.iter().take(10) {
                        let _ = writeln!(out, "    {}: {}", key, count);
                    }
                    if unique_values.len() > 10 {
                        let _ = writeln!(out, "    ... {} more", unique_values.len() - 10);
                    }
                }
            }
            ColumnDataType::Other => {
                let _ = writeln!(out, "  (no analyzable values)");
            }
        }
    }

    if report.suggestions.is_empty() {
        let _ = writeln!(out, "\nNo chart suggestions.");
    } else {
        let _ = writeln!(out, "\nSuggestions:");
        for suggestion in &report.suggestions {
            let _ = writeln!(
                out,
                "  [{:.2}] {} - {}",
                suggestion.score, suggestion.chart_type, suggestion.title
            );
        }
    }

    out
}

fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        glimpse::table::format_number(value)
    }
}
