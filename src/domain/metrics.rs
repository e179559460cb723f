//! Per-trade realized metrics.
//!
//! Every derived value is optional: a trade missing the inputs for one
//! metric is excluded from that metric only, never from the whole report.

use crate::domain::trade::{Direction, Trade};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Outcome class by the sign of net P&L. Open trades with no resolvable
/// exit price are `Undetermined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeMetrics {
    pub trade_id: String,
    pub symbol: String,
    pub entry_time: Option<NaiveDateTime>,
    pub gross_pnl: Option<f64>,
    pub net_pnl: Option<f64>,
    pub percent_gain: Option<f64>,
    pub r_multiple: Option<f64>,
    pub hold_time_minutes: Option<f64>,
    pub outcome: Outcome,
}

pub fn compute_trade_metrics(trade: &Trade) -> TradeMetrics {
    let exit_price = trade.weighted_exit_price();
    let exited_qty = trade.exited_quantity();

    let gross_pnl = match (exit_price, exited_qty) {
        (Some(exit), Some(qty)) => {
            let delta = match trade.direction {
                Direction::Long => exit - trade.entry_price,
                Direction::Short => trade.entry_price - exit,
            };
            Some(delta * qty * trade.contract_multiplier)
        }
        _ => None,
    };

    let net_pnl = gross_pnl.map(|gross| gross - trade.commission - trade.total_fees());

    let percent_gain = match (net_pnl, exited_qty) {
        (Some(net), Some(qty)) => {
            let basis = trade.entry_price * qty;
            if basis != 0.0 {
                Some(net / basis * 100.0)
            } else {
                None
            }
        }
        _ => None,
    };

    let r_multiple = match (net_pnl, risk_amount(trade)) {
        (Some(net), Some(risk)) => Some(net / risk),
        _ => None,
    };

    let hold_time_minutes = match (trade.entry_time, trade.effective_exit_time()) {
        (Some(entry), Some(exit)) => Some(minutes_between(entry, exit)),
        _ => None,
    };

    let outcome = match net_pnl {
        Some(net) if net > 0.0 => Outcome::Win,
        Some(net) if net < 0.0 => Outcome::Loss,
        Some(_) => Outcome::Breakeven,
        None => Outcome::Undetermined,
    };

    TradeMetrics {
        trade_id: trade.id.clone(),
        symbol: trade.symbol.clone(),
        entry_time: trade.entry_time,
        gross_pnl,
        net_pnl,
        percent_gain,
        r_multiple,
        hold_time_minutes,
        outcome,
    }
}

/// Dollar risk defined by the stop-loss distance, over the quantity that
/// produced realized P&L. A stop on the wrong side of entry is not a valid
/// risk basis and yields `None`.
fn risk_amount(trade: &Trade) -> Option<f64> {
    let stop = trade.stop_loss?;
    let qty = trade.exited_quantity()?;
    let per_unit = match trade.direction {
        Direction::Long => trade.entry_price - stop,
        Direction::Short => stop - trade.entry_price,
    };
    if per_unit <= 0.0 {
        return None;
    }
    Some(per_unit * qty * trade.contract_multiplier)
}

fn minutes_between(entry: NaiveDateTime, exit: NaiveDateTime) -> f64 {
    (exit - entry).num_milliseconds() as f64 / 60_000.0
}
