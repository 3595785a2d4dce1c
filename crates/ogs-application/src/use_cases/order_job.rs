//! Order Job Use Case
//!
//! Generates one random order under the job lock. Lock contention becomes a
//! `skipped` report, failures become an `error` report.

use crate::domain_services::OrderJobInterface;
use crate::use_cases::lock_coordinator::LockCoordinator;
use async_trait::async_trait;
use ogs_domain::constants::{CUSTOMER_EMAIL_DOMAIN, CUSTOMER_NAMES, ORDER_QUANTITY_RANGE};
use ogs_domain::error::{Error, Result};
use ogs_domain::ports::repositories::OrderRepository;
use ogs_domain::value_objects::{Guarded, JobReport, NewOrder, Order, Product};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Message reported when another invocation holds the lock
pub const SKIPPED_MESSAGE: &str = "Order job is already running. Skipping execution.";

/// Tunables for the order job
#[derive(Debug, Clone)]
pub struct OrderJobSettings {
    /// Lock name guarding the job
    pub lock_name: String,
    /// Lock TTL; must exceed the job's worst-case duration
    pub lock_ttl_secs: u64,
    /// Pause held inside the critical section
    pub work_duration: Duration,
}

/// Build a random order for `product`
pub fn generate_order(product: &Product) -> NewOrder {
    let mut rng = rand::rng();
    let quantity = rng.random_range(ORDER_QUANTITY_RANGE);
    let customer_name = CUSTOMER_NAMES
        .choose(&mut rng)
        .copied()
        .unwrap_or("Guest Customer")
        .to_string();
    let customer_email = format!(
        "{}{}@{}",
        customer_name.to_lowercase().replace(' ', "."),
        rng.random_range(1..=999),
        CUSTOMER_EMAIL_DOMAIN
    );

    NewOrder {
        product_id: product.id,
        quantity,
        unit_price_cents: product.price_cents,
        total_price_cents: product.price_cents * u64::from(quantity),
        customer_name,
        customer_email,
    }
}

/// Guarded order generation
pub struct OrderJobService {
    coordinator: Arc<LockCoordinator>,
    orders: Arc<dyn OrderRepository>,
    settings: OrderJobSettings,
}

impl OrderJobService {
    /// Create a new order job with injected dependencies
    pub fn new(
        coordinator: Arc<LockCoordinator>,
        orders: Arc<dyn OrderRepository>,
        settings: OrderJobSettings,
    ) -> Self {
        Self {
            coordinator,
            orders,
            settings,
        }
    }

    /// The unit of work run while holding the lock
    async fn create_order(&self) -> Result<Order> {
        if !self.settings.work_duration.is_zero() {
            tokio::time::sleep(self.settings.work_duration).await;
        }

        let product = self
            .orders
            .random_active_product()
            .await?
            .ok_or_else(|| Error::not_found("active product"))?;

        // `generate_order` holds a thread-local RNG; keep it out of any await.
        let draft = generate_order(&product);
        self.orders.insert_order(draft).await
    }
}

#[async_trait]
impl OrderJobInterface for OrderJobService {
    async fn run(&self) -> JobReport {
        let started = Instant::now();
        info!(lock = %self.settings.lock_name, "Order job started");

        let outcome = self
            .coordinator
            .with_lock(&self.settings.lock_name, self.settings.lock_ttl_secs, |_| {
                self.create_order()
            })
            .await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(Guarded::Completed { value, backend }) => {
                info!(order_id = value.order_id, backend = %backend, "Order created");
                JobReport::success(value, backend, elapsed_ms)
            }
            Ok(Guarded::Skipped) => {
                warn!(lock = %self.settings.lock_name, "{}", SKIPPED_MESSAGE);
                JobReport::skipped(SKIPPED_MESSAGE, elapsed_ms)
            }
            Err(e) => {
                let message = format!("Order job error: {e}");
                error!("{}", message);
                JobReport::error(message, elapsed_ms)
            }
        }
    }
}
