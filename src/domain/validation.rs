//! Trade record validation.
//!
//! Runs before the pure metrics computation. Malformed records are skipped
//! and reported, never silently folded into aggregates; missing optional
//! fields (stop loss, exit, entry time) are not malformed and are handled
//! per-metric downstream.

use crate::domain::trade::Trade;

/// A trade rejected by the validation stage, with the first failing check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTrade {
    pub trade_id: String,
    pub reason: String,
}

/// Split a trade list into records fit for computation and malformed ones.
/// Input order is preserved on both sides.
pub fn partition_valid(trades: &[Trade]) -> (Vec<&Trade>, Vec<MalformedTrade>) {
    let mut valid = Vec::with_capacity(trades.len());
    let mut malformed = Vec::new();

    for trade in trades {
        match check_trade(trade) {
            None => valid.push(trade),
            Some(reason) => malformed.push(MalformedTrade {
                trade_id: trade.id.clone(),
                reason,
            }),
        }
    }

    (valid, malformed)
}

fn check_trade(trade: &Trade) -> Option<String> {
    if !trade.entry_price.is_finite() || trade.entry_price <= 0.0 {
        return Some(format!("entry price must be positive, got {}", trade.entry_price));
    }
    if !trade.quantity.is_finite() || trade.quantity <= 0.0 {
        return Some(format!("quantity must be positive, got {}", trade.quantity));
    }
    if !trade.contract_multiplier.is_finite() || trade.contract_multiplier <= 0.0 {
        return Some(format!(
            "contract multiplier must be positive, got {}",
            trade.contract_multiplier
        ));
    }
    if !trade.commission.is_finite() || trade.commission < 0.0 {
        return Some(format!("commission must be non-negative, got {}", trade.commission));
    }
    if !trade.fees.is_finite() || trade.fees < 0.0 {
        return Some(format!("fees must be non-negative, got {}", trade.fees));
    }
    if let Some(price) = trade.exit_price {
        if !price.is_finite() || price <= 0.0 {
            return Some(format!("exit price must be positive, got {}", price));
        }
    }
    if let Some(stop) = trade.stop_loss {
        if !stop.is_finite() || stop <= 0.0 {
            return Some(format!("stop loss must be positive, got {}", stop));
        }
    }

    let mut exited = 0.0;
    for (i, partial) in trade.partial_exits.iter().enumerate() {
        if !partial.quantity.is_finite() || partial.quantity <= 0.0 {
            return Some(format!(
                "partial exit {} quantity must be positive, got {}",
                i + 1,
                partial.quantity
            ));
        }
        if !partial.price.is_finite() || partial.price <= 0.0 {
            return Some(format!(
                "partial exit {} price must be positive, got {}",
                i + 1,
                partial.price
            ));
        }
        if !partial.fee.is_finite() || partial.fee < 0.0 {
            return Some(format!(
                "partial exit {} fee must be non-negative, got {}",
                i + 1,
                partial.fee
            ));
        }
        exited += partial.quantity;
    }

    // Tolerance for quantities accumulated from fractional fills.
    if exited > trade.quantity + 1e-9 {
        return Some(format!(
            "exited quantity {} exceeds entry quantity {}",
            exited, trade.quantity
        ));
    }

    None
}
