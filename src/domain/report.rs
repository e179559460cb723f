//! Report aggregation.
//!
//! `compute_report` is the engine's single entry point: a pure function
//! from an ordered trade collection to a [`MetricsReport`]. Passes are
//! explicit: validate, per-trade metrics, chronological sort, then one
//! reduction for trade aggregates and one for daily buckets. No state
//! survives between invocations.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::metrics::{compute_trade_metrics, Outcome, TradeMetrics};
use crate::domain::trade::Trade;
use crate::domain::validation::partition_valid;

/// Consecutive-outcome counters. A breakeven resets both runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    pub current_wins: usize,
    pub current_losses: usize,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
}

impl StreakStats {
    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.current_wins += 1;
                self.current_losses = 0;
                if self.current_wins > self.max_consecutive_wins {
                    self.max_consecutive_wins = self.current_wins;
                }
            }
            Outcome::Loss => {
                self.current_losses += 1;
                self.current_wins = 0;
                if self.current_losses > self.max_consecutive_losses {
                    self.max_consecutive_losses = self.current_losses;
                }
            }
            Outcome::Breakeven => {
                self.current_wins = 0;
                self.current_losses = 0;
            }
            Outcome::Undetermined => {}
        }
    }
}

/// Flat aggregate report consumed by dashboards, exporters and the report
/// adapters. Averages over an empty partition are 0, never NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsReport {
    pub total_net_pnl: f64,
    pub average_trade_pnl: f64,

    pub win_count: usize,
    pub loss_count: usize,
    pub breakeven_count: usize,
    pub open_count: usize,
    pub win_rate: f64,

    pub profit_factor: f64,
    /// 0 when there are no winners.
    pub largest_win: f64,
    /// Most negative net P&L, signed; 0 when there are no losers.
    pub largest_loss: f64,
    pub average_win: f64,
    /// Positive magnitude.
    pub average_loss: f64,

    pub trade_streaks: StreakStats,

    pub average_win_hold_minutes: f64,
    pub average_loss_hold_minutes: f64,
    pub average_breakeven_hold_minutes: f64,

    pub average_r_multiple: f64,
    pub trade_expectancy: f64,

    pub daily_pnl: BTreeMap<NaiveDate, f64>,
    pub trading_days_count: usize,
    pub winning_days_count: usize,
    pub losing_days_count: usize,
    pub breakeven_days_count: usize,
    pub day_streaks: StreakStats,
    pub average_daily_pnl: f64,
    pub average_winning_day_pnl: f64,
    pub average_losing_day_pnl: f64,
    pub largest_profitable_day: f64,
    pub largest_losing_day: f64,

    pub skipped_trade_ids: Vec<String>,
    pub trades: Vec<TradeMetrics>,
}

/// Bucket timestamps by their naive calendar date.
pub fn utc_date_bucket(ts: NaiveDateTime) -> NaiveDate {
    ts.date()
}

/// Bucket timestamps by calendar date after shifting by a fixed UTC offset,
/// for journals kept in a local market timezone.
pub fn offset_date_bucket(offset_minutes: i64) -> impl Fn(NaiveDateTime) -> NaiveDate {
    move |ts| (ts + Duration::minutes(offset_minutes)).date()
}

pub fn compute_report<F>(trades: &[Trade], date_bucket: F) -> MetricsReport
where
    F: Fn(NaiveDateTime) -> NaiveDate,
{
    let (valid, malformed) = partition_valid(trades);

    let mut per_trade: Vec<TradeMetrics> =
        valid.into_iter().map(compute_trade_metrics).collect();
    // Deterministic order for streak and daily passes: entry time with a
    // stable tiebreak on trade id; trades without an entry time sort last.
    per_trade.sort_by(|a, b| {
        (a.entry_time.is_none(), a.entry_time, &a.trade_id)
            .cmp(&(b.entry_time.is_none(), b.entry_time, &b.trade_id))
    });

    let mut report = MetricsReport {
        skipped_trade_ids: malformed.into_iter().map(|m| m.trade_id).collect(),
        ..MetricsReport::default()
    };

    let mut gross_wins = 0.0_f64;
    let mut loss_magnitude = 0.0_f64;
    let mut r_sum = 0.0_f64;
    let mut r_count = 0usize;
    let mut win_hold = HoldAccumulator::default();
    let mut loss_hold = HoldAccumulator::default();
    let mut breakeven_hold = HoldAccumulator::default();

    for m in &per_trade {
        match m.outcome {
            Outcome::Win => {
                report.win_count += 1;
                let net = m.net_pnl.unwrap_or(0.0);
                gross_wins += net;
                if net > report.largest_win {
                    report.largest_win = net;
                }
            }
            Outcome::Loss => {
                report.loss_count += 1;
                let net = m.net_pnl.unwrap_or(0.0);
                loss_magnitude += net.abs();
                if net < report.largest_loss {
                    report.largest_loss = net;
                }
            }
            Outcome::Breakeven => report.breakeven_count += 1,
            Outcome::Undetermined => report.open_count += 1,
        }

        if let Some(net) = m.net_pnl {
            report.total_net_pnl += net;
        }

        if let Some(r) = m.r_multiple {
            r_sum += r;
            r_count += 1;
        }

        if let Some(hold) = m.hold_time_minutes {
            if hold > 0.0 {
                match m.outcome {
                    Outcome::Win => win_hold.add(hold),
                    Outcome::Loss => loss_hold.add(hold),
                    Outcome::Breakeven => breakeven_hold.add(hold),
                    Outcome::Undetermined => {}
                }
            }
        }

        // Streaks and daily buckets need a chronological position; trades
        // without an entry time are excluded rather than sorted arbitrarily.
        if let Some(entry_time) = m.entry_time {
            report.trade_streaks.apply(m.outcome);
            if let Some(net) = m.net_pnl {
                *report.daily_pnl.entry(date_bucket(entry_time)).or_insert(0.0) += net;
            }
        }
    }

    let determined = report.win_count + report.loss_count + report.breakeven_count;
    report.average_trade_pnl = if determined > 0 {
        report.total_net_pnl / determined as f64
    } else {
        0.0
    };
    report.win_rate = if determined > 0 {
        report.win_count as f64 / determined as f64
    } else {
        0.0
    };

    // Zero loss sum: the profit sum itself keeps the value finite and
    // monotonic for sorting, instead of infinity.
    report.profit_factor = if loss_magnitude > 0.0 {
        gross_wins / loss_magnitude
    } else if gross_wins > 0.0 {
        gross_wins
    } else {
        0.0
    };

    report.average_win = if report.win_count > 0 {
        gross_wins / report.win_count as f64
    } else {
        0.0
    };
    report.average_loss = if report.loss_count > 0 {
        loss_magnitude / report.loss_count as f64
    } else {
        0.0
    };

    report.average_win_hold_minutes = win_hold.average();
    report.average_loss_hold_minutes = loss_hold.average();
    report.average_breakeven_hold_minutes = breakeven_hold.average();

    report.average_r_multiple = if r_count > 0 {
        r_sum / r_count as f64
    } else {
        0.0
    };
    report.trade_expectancy = report.average_r_multiple;

    reduce_days(&mut report);

    report.trades = per_trade;
    report
}

#[derive(Debug, Default)]
struct HoldAccumulator {
    sum: f64,
    count: usize,
}

impl HoldAccumulator {
    fn add(&mut self, minutes: f64) {
        self.sum += minutes;
        self.count += 1;
    }

    fn average(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }
}

/// Second reduction: day-level statistics over the chronologically ordered
/// daily buckets (BTreeMap iteration order).
fn reduce_days(report: &mut MetricsReport) {
    let mut day_pnl_sum = 0.0_f64;
    let mut winning_sum = 0.0_f64;
    let mut losing_magnitude = 0.0_f64;

    for &pnl in report.daily_pnl.values() {
        day_pnl_sum += pnl;
        let outcome = if pnl > 0.0 {
            Outcome::Win
        } else if pnl < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Breakeven
        };
        match outcome {
            Outcome::Win => {
                report.winning_days_count += 1;
                winning_sum += pnl;
                if pnl > report.largest_profitable_day {
                    report.largest_profitable_day = pnl;
                }
            }
            Outcome::Loss => {
                report.losing_days_count += 1;
                losing_magnitude += pnl.abs();
                if pnl < report.largest_losing_day {
                    report.largest_losing_day = pnl;
                }
            }
            Outcome::Breakeven => report.breakeven_days_count += 1,
            Outcome::Undetermined => {}
        }
        report.day_streaks.apply(outcome);
    }

    report.trading_days_count = report.daily_pnl.len();
    report.average_daily_pnl = if report.trading_days_count > 0 {
        day_pnl_sum / report.trading_days_count as f64
    } else {
        0.0
    };
    report.average_winning_day_pnl = if report.winning_days_count > 0 {
        winning_sum / report.winning_days_count as f64
    } else {
        0.0
    };
    report.average_losing_day_pnl = if report.losing_days_count > 0 {
        losing_magnitude / report.losing_days_count as f64
    } else {
        0.0
    };
}
