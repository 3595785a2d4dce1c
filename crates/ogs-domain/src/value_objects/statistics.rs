//! Recent-order statistics value objects
//!
//! [`OrderAggregate`] is what a statistics source computes.
//! [`StatisticsSnapshot`] adds timing and is what gets cached.
//! [`StatisticsReport`] annotates a snapshot with its cache provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-product aggregate over the analysed window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStatistics {
    /// Category display name
    pub category_name: String,
    /// Product display name
    pub product_name: String,
    /// Orders for this product
    pub order_count: u64,
    /// Units sold
    pub total_quantity: u64,
    /// Revenue in cents
    pub total_revenue_cents: u64,
    /// Earliest purchase in the window
    pub first_order_time: DateTime<Utc>,
    /// Latest purchase in the window
    pub last_order_time: DateTime<Utc>,
    /// Mean order value in cents
    pub avg_order_value_cents: f64,
}

/// Per-category aggregate over the analysed window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    /// Category display name
    pub category_name: String,
    /// Orders in this category
    pub order_count: u64,
    /// Units sold
    pub total_quantity: u64,
    /// Revenue in cents
    pub total_revenue_cents: u64,
    /// Mean order value in cents
    pub avg_order_value_cents: f64,
    /// Distinct products ordered
    pub unique_products: u64,
}

/// Window-wide totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Orders analysed
    pub total_orders: u64,
    /// Revenue in cents
    pub total_revenue_cents: u64,
    /// Mean order value in cents
    pub avg_order_value_cents: f64,
    /// Earliest purchase in the window
    pub first_order_time: Option<DateTime<Utc>>,
    /// Latest purchase in the window
    pub last_order_time: Option<DateTime<Utc>>,
}

/// Raw aggregate returned by a statistics source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAggregate {
    /// Window-wide totals
    pub totals: OrderTotals,
    /// Sorted by quantity desc
    pub categories: Vec<CategoryStatistics>,
    /// Sorted by quantity desc, then revenue desc
    pub products: Vec<ProductStatistics>,
    /// Number of queries the source issued
    pub queries_executed: u32,
    /// Number of order records analysed
    pub records_analyzed: u64,
}

/// Span between the first and last order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    /// Whole days
    pub days: i64,
    /// Remaining hours
    pub hours: i64,
    /// Remaining minutes
    pub minutes: i64,
    /// Remaining seconds
    pub seconds: i64,
    /// Whole span in seconds
    pub total_seconds: i64,
    /// Human readable form
    pub formatted: String,
}

impl TimePeriod {
    /// Break down the span between two instants
    pub fn between(first: DateTime<Utc>, last: DateTime<Utc>) -> Self {
        let total_seconds = (last - first).num_seconds();
        let magnitude = total_seconds.abs();
        let days = magnitude / 86_400;
        let hours = (magnitude % 86_400) / 3_600;
        let minutes = (magnitude % 3_600) / 60;
        let seconds = magnitude % 60;

        Self {
            days,
            hours,
            minutes,
            seconds,
            total_seconds,
            formatted: format!("{days} days, {hours} hours, {minutes} minutes, {seconds} seconds"),
        }
    }
}

/// Summary section of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    /// Orders analysed
    pub total_orders: u64,
    /// Revenue in cents
    pub total_revenue_cents: u64,
    /// Mean order value in cents
    pub avg_order_value_cents: f64,
    /// Earliest purchase in the window
    pub first_order_time: Option<DateTime<Utc>>,
    /// Latest purchase in the window
    pub last_order_time: Option<DateTime<Utc>>,
    /// Span between first and last order
    pub time_period: Option<TimePeriod>,
    /// Computation time in milliseconds
    pub execution_time_ms: f64,
}

/// Cost of computing the aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPerformance {
    /// Computation time in seconds
    pub execution_time_seconds: f64,
    /// Number of queries issued
    pub queries_executed: u32,
    /// Number of order records analysed
    pub records_analyzed: u64,
}

/// Computed statistics, the unit stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Summary section
    pub summary: StatisticsSummary,
    /// Per-category breakdown
    pub categories: Vec<CategoryStatistics>,
    /// Per-product breakdown
    pub products: Vec<ProductStatistics>,
    /// Computation time
    pub timestamp: DateTime<Utc>,
    /// Computation cost
    pub query_performance: QueryPerformance,
}

impl StatisticsSnapshot {
    /// Build a snapshot from a raw aggregate and the time it took to compute
    pub fn from_aggregate(aggregate: OrderAggregate, elapsed: std::time::Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let totals = &aggregate.totals;
        let time_period = match (totals.first_order_time, totals.last_order_time) {
            (Some(first), Some(last)) => Some(TimePeriod::between(first, last)),
            _ => None,
        };

        Self {
            summary: StatisticsSummary {
                total_orders: aggregate.totals.total_orders,
                total_revenue_cents: aggregate.totals.total_revenue_cents,
                avg_order_value_cents: aggregate.totals.avg_order_value_cents,
                first_order_time: aggregate.totals.first_order_time,
                last_order_time: aggregate.totals.last_order_time,
                time_period,
                execution_time_ms: (elapsed_secs * 100_000.0).round() / 100.0,
            },
            categories: aggregate.categories,
            products: aggregate.products,
            timestamp: Utc::now(),
            query_performance: QueryPerformance {
                execution_time_seconds: elapsed_secs,
                queries_executed: aggregate.queries_executed,
                records_analyzed: aggregate.records_analyzed,
            },
        }
    }
}

/// Cache entry body: the snapshot plus its embedded timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    /// Cached statistics
    pub snapshot: StatisticsSnapshot,
    /// Unix seconds when the snapshot was stored
    pub cache_timestamp: i64,
}

/// Statistics annotated with cache provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// Statistics content
    #[serde(flatten)]
    pub snapshot: StatisticsSnapshot,
    /// Whether the content came from the cache
    pub from_cache: bool,
    /// Unix seconds when the content was computed
    pub cache_timestamp: i64,
    /// Age of the cached content, present only for cache hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age_seconds: Option<i64>,
}

impl StatisticsReport {
    /// Annotate freshly computed statistics
    pub fn fresh(snapshot: StatisticsSnapshot, computed_at: i64) -> Self {
        Self {
            snapshot,
            from_cache: false,
            cache_timestamp: computed_at,
            cache_age_seconds: None,
        }
    }

    /// Annotate cached statistics, computing the age against `now`
    pub fn cached(entry: CachedSnapshot, now: i64) -> Self {
        Self {
            snapshot: entry.snapshot,
            from_cache: true,
            cache_timestamp: entry.cache_timestamp,
            cache_age_seconds: Some((now - entry.cache_timestamp).max(0)),
        }
    }
}
