//! Unit tests for statistics value objects

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use ogs_domain::value_objects::{
    CachedSnapshot, OrderAggregate, OrderTotals, StatisticsReport, StatisticsSnapshot, TimePeriod,
};
use std::time::Duration;

#[test]
fn test_time_period_breakdown() {
    let first = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let last = first + ChronoDuration::seconds(90_061);

    let period = TimePeriod::between(first, last);
    assert_eq!(period.days, 1);
    assert_eq!(period.hours, 1);
    assert_eq!(period.minutes, 1);
    assert_eq!(period.seconds, 1);
    assert_eq!(period.total_seconds, 90_061);
    assert_eq!(period.formatted, "1 days, 1 hours, 1 minutes, 1 seconds");
}

#[test]
fn test_snapshot_without_orders_has_no_period() {
    let snapshot = StatisticsSnapshot::from_aggregate(OrderAggregate::default(), Duration::ZERO);
    assert_eq!(snapshot.summary.total_orders, 0);
    assert!(snapshot.summary.time_period.is_none());
}

#[test]
fn test_snapshot_copies_totals() {
    let first = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let aggregate = OrderAggregate {
        totals: OrderTotals {
            total_orders: 3,
            total_revenue_cents: 9_000,
            avg_order_value_cents: 3_000.0,
            first_order_time: Some(first),
            last_order_time: Some(first + ChronoDuration::seconds(30)),
        },
        queries_executed: 3,
        records_analyzed: 3,
        ..OrderAggregate::default()
    };

    let snapshot = StatisticsSnapshot::from_aggregate(aggregate, Duration::from_millis(12));
    assert_eq!(snapshot.summary.total_revenue_cents, 9_000);
    assert_eq!(snapshot.summary.time_period.map(|p| p.total_seconds), Some(30));
    assert_eq!(snapshot.query_performance.queries_executed, 3);
    assert!((snapshot.summary.execution_time_ms - 12.0).abs() < 0.01);
}

#[test]
fn test_cached_report_computes_age() {
    let snapshot = StatisticsSnapshot::from_aggregate(OrderAggregate::default(), Duration::ZERO);
    let entry = CachedSnapshot {
        snapshot: snapshot.clone(),
        cache_timestamp: 1_000,
    };

    let report = StatisticsReport::cached(entry, 1_003);
    assert!(report.from_cache);
    assert_eq!(report.cache_age_seconds, Some(3));
    assert_eq!(report.snapshot, snapshot);
}

#[test]
fn test_fresh_report_flattens_snapshot() {
    let snapshot = StatisticsSnapshot::from_aggregate(OrderAggregate::default(), Duration::ZERO);
    let report = StatisticsReport::fresh(snapshot, 42);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["from_cache"], false);
    assert_eq!(json["cache_timestamp"], 42);
    assert!(json.get("summary").is_some());
    assert!(json.get("cache_age_seconds").is_none());
}
