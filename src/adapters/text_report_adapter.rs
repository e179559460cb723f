//! Plain-text report adapter implementing ReportPort.

use std::fmt::Write as _;

use crate::domain::error::JournalError;
use crate::domain::money::format_currency;
use crate::domain::report::MetricsReport;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter {
    currency_symbol: String,
}

impl TextReportAdapter {
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_string(),
        }
    }

    fn money(&self, value: f64) -> String {
        format_currency(value, &self.currency_symbol)
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &MetricsReport) -> Result<String, JournalError> {
        let mut out = String::new();

        let _ = writeln!(out, "PERFORMANCE REPORT");
        let _ = writeln!(out, "==================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Net P&L:            {}", self.money(report.total_net_pnl));
        let _ = writeln!(out, "Average trade:      {}", self.money(report.average_trade_pnl));
        let _ = writeln!(
            out,
            "Trades:             {} won / {} lost / {} breakeven / {} open",
            report.win_count, report.loss_count, report.breakeven_count, report.open_count
        );
        let _ = writeln!(out, "Win rate:           {:.1}%", report.win_rate * 100.0);
        let _ = writeln!(out, "Profit factor:      {:.2}", report.profit_factor);
        let _ = writeln!(out, "Largest win:        {}", self.money(report.largest_win));
        let _ = writeln!(out, "Largest loss:       {}", self.money(report.largest_loss));
        let _ = writeln!(out, "Average win:        {}", self.money(report.average_win));
        let _ = writeln!(out, "Average loss:       {}", self.money(report.average_loss));
        let _ = writeln!(out, "Avg R multiple:     {:.2}", report.average_r_multiple);
        let _ = writeln!(out, "Expectancy:         {:.2}R", report.trade_expectancy);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Streaks:            {} max consecutive wins, {} max consecutive losses",
            report.trade_streaks.max_consecutive_wins, report.trade_streaks.max_consecutive_losses
        );
        let _ = writeln!(
            out,
            "Hold times:         wins {:.0}m / losses {:.0}m / breakeven {:.0}m",
            report.average_win_hold_minutes,
            report.average_loss_hold_minutes,
            report.average_breakeven_hold_minutes
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Trading days:       {} ({} up / {} down / {} flat)",
            report.trading_days_count,
            report.winning_days_count,
            report.losing_days_count,
            report.breakeven_days_count
        );
        let _ = writeln!(out, "Avg day:            {}", self.money(report.average_daily_pnl));
        let _ = writeln!(
            out,
            "Best day:           {}",
            self.money(report.largest_profitable_day)
        );
        let _ = writeln!(
            out,
            "Worst day:          {}",
            self.money(report.largest_losing_day)
        );

        if !report.daily_pnl.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "DAILY P&L");
            for (date, pnl) in &report.daily_pnl {
                let _ = writeln!(out, "  {date}  {}", self.money(*pnl));
            }
        }

        if !report.skipped_trade_ids.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Skipped malformed trades: {}",
                report.skipped_trade_ids.join(", ")
            );
        }

        Ok(out)
    }
}
