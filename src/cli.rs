//! CLI definition and dispatch.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::adapters::csv_trade_adapter::CsvTradeAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::validate_report_config;
use crate::domain::error::JournalError;
use crate::domain::report::{compute_report, offset_date_bucket};
use crate::domain::validation::partition_valid;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_source_port::TradeSourcePort;

#[derive(Parser, Debug)]
#[command(name = "tradelog", about = "Trading journal performance metrics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a performance report from a trade log
    Report {
        /// Trades CSV file
        #[arg(short, long)]
        trades: PathBuf,
        /// Partial-exit fills CSV, joined to trades by id
        #[arg(long)]
        exits: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// text or json (overrides config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Check a trade log for malformed records
    Validate {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(long)]
        exits: Option<PathBuf>,
    },
    /// Show summary information for a trade log
    Info {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(long)]
        exits: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub currency_symbol: String,
    pub timezone_offset_minutes: i64,
    pub format: ReportFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            timezone_offset_minutes: 0,
            format: ReportFormat::Text,
        }
    }
}

pub fn build_report_options(config: &dyn ConfigPort) -> Result<ReportOptions, JournalError> {
    validate_report_config(config)?;

    let format = match config.get_string("report", "format").as_deref() {
        Some("json") => ReportFormat::Json,
        _ => ReportFormat::Text,
    };
    Ok(ReportOptions {
        currency_symbol: config
            .get_string("report", "currency_symbol")
            .unwrap_or_else(|| "$".to_string()),
        timezone_offset_minutes: config.get_int("report", "timezone_offset_minutes", 0),
        format,
    })
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            trades,
            exits,
            config,
            output,
            format,
        } => run_report(trades, exits, config.as_ref(), output.as_ref(), format.as_deref()),
        Command::Validate { trades, exits } => run_validate(trades, exits),
        Command::Info { trades, exits } => run_info(trades, exits),
    }
}

fn err_exit(err: &JournalError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn load_options(config_path: Option<&PathBuf>) -> Result<ReportOptions, ExitCode> {
    let Some(path) = config_path else {
        return Ok(ReportOptions::default());
    };
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        err_exit(&JournalError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;
    build_report_options(&adapter).map_err(|e| err_exit(&e))
}

fn run_report(
    trades_path: PathBuf,
    exits_path: Option<PathBuf>,
    config: Option<&PathBuf>,
    output: Option<&PathBuf>,
    format_flag: Option<&str>,
) -> ExitCode {
    let options = match load_options(config) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let format = match format_flag {
        None => options.format,
        Some("text") => ReportFormat::Text,
        Some("json") => ReportFormat::Json,
        Some(other) => {
            return err_exit(&JournalError::ConfigInvalid {
                section: "report".to_string(),
                key: "format".to_string(),
                reason: format!("unknown format '{other}'"),
            });
        }
    };

    let source = CsvTradeAdapter::new(trades_path, exits_path);
    let trades = match source.load_trades() {
        Ok(trades) => trades,
        Err(e) => return err_exit(&e),
    };

    let report = compute_report(
        &trades,
        offset_date_bucket(options.timezone_offset_minutes),
    );

    let adapter: Box<dyn ReportPort> = match format {
        ReportFormat::Text => Box::new(TextReportAdapter::new(&options.currency_symbol)),
        ReportFormat::Json => Box::new(JsonReportAdapter::new()),
    };

    match output {
        Some(path) => {
            if let Err(e) = adapter.write(&report, &path.display().to_string()) {
                return err_exit(&e);
            }
        }
        None => match adapter.render(&report) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => return err_exit(&e),
        },
    }
    ExitCode::SUCCESS
}

fn run_validate(trades_path: PathBuf, exits_path: Option<PathBuf>) -> ExitCode {
    let source = CsvTradeAdapter::new(trades_path, exits_path);
    let trades = match source.load_trades() {
        Ok(trades) => trades,
        Err(e) => return err_exit(&e),
    };

    let (valid, malformed) = partition_valid(&trades);
    if malformed.is_empty() {
        println!("{} trades, all valid", valid.len());
        return ExitCode::SUCCESS;
    }

    for m in &malformed {
        eprintln!("trade {}: {}", m.trade_id, m.reason);
    }
    eprintln!("{} of {} trades malformed", malformed.len(), trades.len());
    ExitCode::from(5)
}

fn run_info(trades_path: PathBuf, exits_path: Option<PathBuf>) -> ExitCode {
    let source = CsvTradeAdapter::new(trades_path, exits_path);
    let trades = match source.load_trades() {
        Ok(trades) => trades,
        Err(e) => return err_exit(&e),
    };

    let mut symbols: Vec<&str> = trades.iter().map(|t| t.symbol.as_str()).collect();
    symbols.sort_unstable();
    symbols.dedup();

    let entries: Vec<_> = trades.iter().filter_map(|t| t.entry_time).collect();
    let first = entries.iter().min();
    let last = entries.iter().max();

    println!("trades:  {}", trades.len());
    println!("symbols: {}", symbols.join(", "));
    match (first, last) {
        (Some(first), Some(last)) => println!("range:   {first} to {last}"),
        _ => println!("range:   no timestamped entries"),
    }
    ExitCode::SUCCESS
}
