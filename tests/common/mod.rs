#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tradelog::domain::error::JournalError;
use tradelog::domain::trade::{Direction, PartialExit, Trade, TradeStatus};
use tradelog::ports::trade_source_port::TradeSourcePort;

pub struct MockTradeSource {
    pub trades: Vec<Trade>,
    pub error: Option<String>,
}

impl MockTradeSource {
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            error: None,
        }
    }

    pub fn with_trades(mut self, trades: Vec<Trade>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl TradeSourcePort for MockTradeSource {
    fn load_trades(&self) -> Result<Vec<Trade>, JournalError> {
        if let Some(reason) = &self.error {
            return Err(JournalError::TradeSource {
                reason: reason.clone(),
            });
        }
        Ok(self.trades.clone())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

/// Closed long with net P&L equal to `pnl` (entry 100, quantity 1, no costs).
pub fn trade_with_pnl(id: &str, entry_time: NaiveDateTime, pnl: f64) -> Trade {
    Trade {
        id: id.to_string(),
        symbol: "AAPL".to_string(),
        direction: Direction::Long,
        entry_price: 100.0,
        entry_time: Some(entry_time),
        quantity: 1.0,
        exit_price: Some(100.0 + pnl),
        exit_time: Some(entry_time + chrono::Duration::hours(1)),
        contract_multiplier: 1.0,
        stop_loss: None,
        commission: 0.0,
        fees: 0.0,
        status: TradeStatus::Closed,
        partial_exits: vec![],
    }
}

pub fn partial_exit(datetime: NaiveDateTime, quantity: f64, price: f64, fee: f64) -> PartialExit {
    PartialExit {
        datetime,
        quantity,
        price,
        fee,
    }
}
