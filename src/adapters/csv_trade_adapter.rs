//! CSV trade log adapter implementing TradeSourcePort.
//!
//! Reads a trades file and an optional partial-exits file joined on trade
//! id. Column layout matches the journal's export format; empty cells are
//! missing optional fields, not errors.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::error::JournalError;
use crate::domain::trade::{Direction, PartialExit, Trade, TradeStatus};
use crate::ports::trade_source_port::TradeSourcePort;

pub struct CsvTradeAdapter {
    trades_path: PathBuf,
    exits_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    id: String,
    symbol: String,
    direction: String,
    entry_time: Option<String>,
    entry_price: f64,
    quantity: f64,
    exit_time: Option<String>,
    exit_price: Option<f64>,
    stop_loss: Option<f64>,
    commission: Option<f64>,
    fees: Option<f64>,
    contract_multiplier: Option<f64>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ExitRow {
    trade_id: String,
    datetime: String,
    quantity: f64,
    price: f64,
    fee: Option<f64>,
}

impl CsvTradeAdapter {
    pub fn new(trades_path: PathBuf, exits_path: Option<PathBuf>) -> Self {
        Self {
            trades_path,
            exits_path,
        }
    }

    fn parse_error(&self, path: &Path, reason: String) -> JournalError {
        JournalError::CsvParse {
            file: path.display().to_string(),
            reason,
        }
    }

    fn load_exits(&self) -> Result<HashMap<String, Vec<PartialExit>>, JournalError> {
        let mut exits: HashMap<String, Vec<PartialExit>> = HashMap::new();
        let Some(path) = &self.exits_path else {
            return Ok(exits);
        };

        let mut rdr = csv::Reader::from_path(path)
            .map_err(|e| self.parse_error(path, e.to_string()))?;
        for result in rdr.deserialize() {
            let row: ExitRow = result.map_err(|e| self.parse_error(path, e.to_string()))?;
            let datetime = parse_datetime(&row.datetime).ok_or_else(|| {
                self.parse_error(
                    path,
                    format!("invalid datetime '{}' for trade {}", row.datetime, row.trade_id),
                )
            })?;
            exits.entry(row.trade_id).or_default().push(PartialExit {
                datetime,
                quantity: row.quantity,
                price: row.price,
                fee: row.fee.unwrap_or(0.0),
            });
        }

        // Keep fills in execution order regardless of file order.
        for fills in exits.values_mut() {
            fills.sort_by_key(|p| p.datetime);
        }
        Ok(exits)
    }
}

impl TradeSourcePort for CsvTradeAdapter {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError> {
        let mut exits = self.load_exits()?;
        let path = &self.trades_path;

        let mut rdr = csv::Reader::from_path(path)
            .map_err(|e| self.parse_error(path, e.to_string()))?;
        let mut trades = Vec::new();

        for result in rdr.deserialize() {
            let row: TradeRow = result.map_err(|e| self.parse_error(path, e.to_string()))?;

            let direction = Direction::parse(&row.direction).ok_or_else(|| {
                self.parse_error(
                    path,
                    format!("invalid direction '{}' for trade {}", row.direction, row.id),
                )
            })?;
            let status = TradeStatus::parse(&row.status).ok_or_else(|| {
                self.parse_error(
                    path,
                    format!("invalid status '{}' for trade {}", row.status, row.id),
                )
            })?;
            let entry_time = parse_optional_datetime(path, &row.id, row.entry_time.as_deref())?;
            let exit_time = parse_optional_datetime(path, &row.id, row.exit_time.as_deref())?;

            let partial_exits = exits.remove(&row.id).unwrap_or_default();

            trades.push(Trade {
                id: row.id,
                symbol: row.symbol,
                direction,
                entry_price: row.entry_price,
                entry_time,
                quantity: row.quantity,
                exit_price: row.exit_price,
                exit_time,
                contract_multiplier: row.contract_multiplier.unwrap_or(1.0),
                stop_loss: row.stop_loss,
                commission: row.commission.unwrap_or(0.0),
                fees: row.fees.unwrap_or(0.0),
                status,
                partial_exits,
            });
        }

        if let Some(orphan) = exits.keys().next() {
            return Err(self.parse_error(
                path,
                format!("partial exits reference unknown trade {}", orphan),
            ));
        }

        Ok(trades)
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn parse_optional_datetime(
    path: &Path,
    trade_id: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDateTime>, JournalError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => parse_datetime(v).map(Some).ok_or_else(|| JournalError::CsvParse {
            file: path.display().to_string(),
            reason: format!("invalid datetime '{}' for trade {}", v, trade_id),
        }),
    }
}
