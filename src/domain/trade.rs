//! Trade records as supplied by upstream collaborators (journal import,
//! persistence layer). Immutable snapshots for the duration of a computation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Lenient parse matching the journal's historical action strings.
    pub fn parse(value: &str) -> Option<Direction> {
        match value.to_lowercase().as_str() {
            "long" | "buy" => Some(Direction::Long),
            "short" | "sell" => Some(Direction::Short),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Open,
    PartiallyClosed,
    Closed,
}

impl TradeStatus {
    pub fn parse(value: &str) -> Option<TradeStatus> {
        match value.to_lowercase().as_str() {
            "open" => Some(TradeStatus::Open),
            "partially_closed" | "partial" => Some(TradeStatus::PartiallyClosed),
            "closed" => Some(TradeStatus::Closed),
            _ => None,
        }
    }
}

/// A single fill that closed part of a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialExit {
    pub datetime: NaiveDateTime,
    pub quantity: f64,
    pub price: f64,
    pub fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub entry_time: Option<NaiveDateTime>,
    pub quantity: f64,
    pub exit_price: Option<f64>,
    pub exit_time: Option<NaiveDateTime>,
    pub contract_multiplier: f64,
    pub stop_loss: Option<f64>,
    pub commission: f64,
    pub fees: f64,
    pub status: TradeStatus,
    pub partial_exits: Vec<PartialExit>,
}

impl Trade {
    /// Effective exit price: the quantity-weighted average over partial
    /// exits when fills exist, otherwise the trade-level exit price.
    pub fn weighted_exit_price(&self) -> Option<f64> {
        if self.partial_exits.is_empty() {
            return self.exit_price;
        }
        let total_qty: f64 = self.partial_exits.iter().map(|p| p.quantity).sum();
        if total_qty <= 0.0 {
            return None;
        }
        let weighted: f64 = self
            .partial_exits
            .iter()
            .map(|p| p.quantity * p.price)
            .sum();
        Some(weighted / total_qty)
    }

    /// Effective exit time: the chronologically last partial exit when
    /// fills exist, otherwise the trade-level exit time.
    pub fn effective_exit_time(&self) -> Option<NaiveDateTime> {
        if self.partial_exits.is_empty() {
            return self.exit_time;
        }
        self.partial_exits.iter().map(|p| p.datetime).max()
    }

    /// Quantity that contributes to realized P&L: the sum of partial-exit
    /// quantities when fills exist, otherwise the full entry quantity of a
    /// trade with a resolvable exit price. Open single-fill trades have no
    /// realized quantity.
    pub fn exited_quantity(&self) -> Option<f64> {
        if self.partial_exits.is_empty() {
            return self.exit_price.map(|_| self.quantity);
        }
        Some(self.partial_exits.iter().map(|p| p.quantity).sum())
    }

    /// Total fees for the trade. For multi-fill trades the summed
    /// partial-exit fees replace the trade-level `fees` field, so the two
    /// never double-count. Commission is tracked separately.
    pub fn total_fees(&self) -> f64 {
        if self.partial_exits.is_empty() {
            self.fees
        } else {
            self.partial_exits.iter().map(|p| p.fee).sum()
        }
    }
}
