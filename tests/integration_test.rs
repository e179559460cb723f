//! Integration tests for the metrics pipeline.
//!
//! Tests cover:
//! - Full pipeline with a mock trade source (no files)
//! - The journal's reference scenario: partial exits with weighted fills
//! - Skip-and-record policy for malformed trades
//! - Determinism of the report down to serialized bytes

mod common;

use common::*;
use tradelog::adapters::json_report_adapter::JsonReportAdapter;
use tradelog::domain::metrics::Outcome;
use tradelog::domain::report::{compute_report, offset_date_bucket, utc_date_bucket};
use tradelog::domain::trade::{Direction, Trade, TradeStatus};
use tradelog::ports::report_port::ReportPort;
use tradelog::ports::trade_source_port::TradeSourcePort;

mod full_pipeline {
    use super::*;

    #[test]
    fn pipeline_with_mock_trade_source() {
        let source = MockTradeSource::new().with_trades(vec![
            trade_with_pnl("a", dt(2024, 7, 1, 9, 30), 120.0),
            trade_with_pnl("b", dt(2024, 7, 1, 11, 0), -40.0),
            trade_with_pnl("c", dt(2024, 7, 2, 9, 30), 60.0),
        ]);

        let trades = source.load_trades().unwrap();
        let report = compute_report(&trades, utc_date_bucket);

        assert_eq!(report.win_count, 2);
        assert_eq!(report.loss_count, 1);
        assert!((report.total_net_pnl - 140.0).abs() < 1e-9);
        assert_eq!(report.trading_days_count, 2);
        assert!((report.daily_pnl[&date(2024, 7, 1)] - 80.0).abs() < 1e-9);
        assert!((report.daily_pnl[&date(2024, 7, 2)] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn source_error_propagates() {
        let source = MockTradeSource::new().with_error("connection refused");
        let err = source.load_trades().unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}

mod partial_exit_scenario {
    use super::*;

    /// The journal's reference trade: long 100 @ 150, exits 30 @ 152
    /// (fee 1.00) and 40 @ 154 (fee 1.50), no commission.
    fn reference_trade() -> Trade {
        Trade {
            exit_price: None,
            exit_time: None,
            status: TradeStatus::PartiallyClosed,
            quantity: 100.0,
            entry_price: 150.0,
            partial_exits: vec![
                partial_exit(dt(2024, 7, 1, 11, 0), 30.0, 152.0, 1.0),
                partial_exit(dt(2024, 7, 1, 14, 0), 40.0, 154.0, 1.5),
            ],
            ..trade_with_pnl("ref", dt(2024, 7, 1, 9, 30), 0.0)
        }
    }

    #[test]
    fn weighted_exit_produces_reference_numbers() {
        let trade = reference_trade();
        let weighted = trade.weighted_exit_price().unwrap();
        assert!((weighted - 153.14285714285714).abs() < 1e-9);

        let report = compute_report(&[trade], utc_date_bucket);
        let m = &report.trades[0];
        assert!((m.gross_pnl.unwrap() - 220.0).abs() < 1e-9);
        assert!((m.net_pnl.unwrap() - 217.5).abs() < 1e-9);
        assert!((m.percent_gain.unwrap() - 2.0714285714285716).abs() < 1e-9);
        assert_eq!(m.outcome, Outcome::Win);
        assert!((report.total_net_pnl - 217.5).abs() < 1e-9);
    }

    #[test]
    fn hold_time_runs_to_last_fill() {
        let report = compute_report(&[reference_trade()], utc_date_bucket);
        // 09:30 entry, last fill 14:00.
        assert!((report.trades[0].hold_time_minutes.unwrap() - 270.0).abs() < 1e-9);
    }
}

mod malformed_policy {
    use super::*;

    #[test]
    fn malformed_trades_skipped_and_recorded_not_fatal() {
        let trades = vec![
            trade_with_pnl("good-1", dt(2024, 7, 1, 9, 0), 50.0),
            Trade {
                entry_price: -10.0,
                ..trade_with_pnl("bad-price", dt(2024, 7, 1, 10, 0), 10.0)
            },
            trade_with_pnl("good-2", dt(2024, 7, 1, 11, 0), -20.0),
            Trade {
                quantity: 0.0,
                ..trade_with_pnl("bad-qty", dt(2024, 7, 1, 12, 0), 10.0)
            },
        ];

        let report = compute_report(&trades, utc_date_bucket);
        assert_eq!(
            report.skipped_trade_ids,
            vec!["bad-price".to_string(), "bad-qty".to_string()]
        );
        assert_eq!(report.win_count + report.loss_count, 2);
        assert!((report.total_net_pnl - 30.0).abs() < 1e-9);
    }
}

mod determinism {
    use super::*;

    fn mixed_trades() -> Vec<Trade> {
        vec![
            trade_with_pnl("a", dt(2024, 7, 1, 9, 30), 100.0),
            trade_with_pnl("b", dt(2024, 7, 1, 9, 30), -30.0),
            Trade {
                entry_time: None,
                ..trade_with_pnl("no-time", dt(2024, 7, 1, 9, 30), 10.0)
            },
            Trade {
                exit_price: None,
                exit_time: None,
                status: TradeStatus::Open,
                ..trade_with_pnl("open", dt(2024, 7, 2, 9, 30), 0.0)
            },
            Trade {
                direction: Direction::Short,
                exit_price: Some(95.0),
                stop_loss: Some(102.0),
                ..trade_with_pnl("short", dt(2024, 7, 2, 10, 0), 0.0)
            },
        ]
    }

    #[test]
    fn identical_input_serializes_to_identical_bytes() {
        let trades = mixed_trades();
        let adapter = JsonReportAdapter::new();

        let first = adapter
            .render(&compute_report(&trades, utc_date_bucket))
            .unwrap();
        let second = adapter
            .render(&compute_report(&trades, utc_date_bucket))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn input_order_does_not_change_the_report() {
        let mut reversed = mixed_trades();
        reversed.reverse();

        let a = compute_report(&mixed_trades(), utc_date_bucket);
        let b = compute_report(&reversed, utc_date_bucket);
        assert_eq!(a, b);
    }

    #[test]
    fn timezone_bucket_shifts_day_boundaries() {
        let trades = vec![trade_with_pnl("late", dt(2024, 7, 1, 23, 30), 10.0)];

        let utc = compute_report(&trades, utc_date_bucket);
        assert!(utc.daily_pnl.contains_key(&date(2024, 7, 1)));

        let sydney = compute_report(&trades, offset_date_bucket(600));
        assert!(sydney.daily_pnl.contains_key(&date(2024, 7, 2)));
    }
}
