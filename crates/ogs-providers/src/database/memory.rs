//! In-memory order store
//!
//! Keeps categories, products and orders behind an async `RwLock`. With a
//! backing file, the whole state is reloaded from disk before every
//! operation and rewritten after every insert.

use crate::constants::STATISTICS_QUERY_COUNT;
use async_trait::async_trait;
use chrono::Utc;
use ogs_domain::error::{Error, Result};
use ogs_domain::ports::repositories::{OrderRepository, StatisticsSource};
use ogs_domain::value_objects::{
    Category, CategoryStatistics, NewOrder, Order, OrderAggregate, OrderTotals, Product,
    ProductStatistics,
};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// Persisted store contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    categories: Vec<Category>,
    products: Vec<Product>,
    orders: Vec<Order>,
    next_order_id: u64,
}

impl StoreState {
    fn seeded(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
            orders: Vec::new(),
            next_order_id: 1,
        }
    }
}

/// Catalogue shipped with the service
pub fn default_catalogue() -> (Vec<Category>, Vec<Product>) {
    let categories = [
        (1, "Electronics"),
        (2, "Books"),
        (3, "Clothing"),
        (4, "Home & Garden"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id,
        name: name.to_string(),
    })
    .collect();

    let products = [
        (1, 1, "Smartphone", 59_999, true),
        (2, 1, "Laptop", 129_999, true),
        (3, 1, "Headphones", 8_999, true),
        (4, 2, "Rust Programming Book", 3_999, true),
        (5, 2, "Science Fiction Novel", 1_499, true),
        (6, 3, "T-Shirt", 1_999, true),
        (7, 3, "Winter Jacket", 14_999, true),
        (8, 4, "Garden Hose", 2_499, true),
        (9, 4, "Coffee Table", 19_999, false),
    ]
    .into_iter()
    .map(|(id, category_id, name, price_cents, is_active)| Product {
        id,
        category_id,
        name: name.to_string(),
        price_cents,
        is_active,
    })
    .collect();

    (categories, products)
}

/// In-memory order store
pub struct InMemoryOrderStore {
    state: RwLock<StoreState>,
    path: Option<PathBuf>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    /// Create a store seeded with [`default_catalogue`]
    pub fn new() -> Self {
        let (categories, products) = default_catalogue();
        Self::with_catalogue(categories, products)
    }

    /// Create a store with a custom catalogue and no orders
    pub fn with_catalogue(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            state: RwLock::new(StoreState::seeded(categories, products)),
            path: None,
        }
    }

    /// Open a store backed by a JSON file
    ///
    /// A missing file starts from [`default_catalogue`] and is created on
    /// the first insert.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match Self::load(&path)? {
            Some(state) => state,
            None => {
                let (categories, products) = default_catalogue();
                StoreState::seeded(categories, products)
            }
        };

        Ok(Self {
            state: RwLock::new(state),
            path: Some(path),
        })
    }

    fn load(path: &Path) -> Result<Option<StoreState>> {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                Error::database_with_source(
                    format!("Corrupt order store {}", path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::database_with_source(
                format!("Failed to read order store {}", path.display()),
                e,
            )),
        }
    }

    fn persist(path: &Path, state: &StoreState) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::database_with_source(
                    format!("Failed to create {}", parent.display()),
                    e,
                )
            })?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .and_then(|()| std::fs::rename(&tmp, path))
            .map_err(|e| {
                Error::database_with_source(
                    format!("Failed to write order store {}", path.display()),
                    e,
                )
            })
    }

    /// Pick up orders written by other processes
    async fn refresh(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(state) = Self::load(path)? {
            *self.state.write().await = state;
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn random_active_product(&self) -> Result<Option<Product>> {
        self.refresh().await?;
        let state = self.state.read().await;
        let active: Vec<&Product> = state.products.iter().filter(|p| p.is_active).collect();
        Ok(active.choose(&mut rand::rng()).map(|p| (*p).clone()))
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        self.refresh().await?;
        let mut state = self.state.write().await;

        if !state.products.iter().any(|p| p.id == order.product_id) {
            return Err(Error::not_found(format!("product {}", order.product_id)));
        }

        let order_id = state.next_order_id.max(1);
        let created = Order::from_new(order_id, order, Utc::now());
        state.next_order_id = order_id + 1;
        state.orders.push(created.clone());

        if let Some(path) = &self.path {
            Self::persist(path, &state)?;
        }

        debug!(order_id, "Order inserted");
        Ok(created)
    }

    async fn product_count(&self) -> Result<usize> {
        self.refresh().await?;
        Ok(self.state.read().await.products.len())
    }

    async fn order_count(&self) -> Result<usize> {
        self.refresh().await?;
        Ok(self.state.read().await.orders.len())
    }
}

#[async_trait]
impl StatisticsSource for InMemoryOrderStore {
    async fn aggregate_recent(&self, window: usize) -> Result<OrderAggregate> {
        self.refresh().await?;
        let state = self.state.read().await;
        Ok(aggregate(&state, window))
    }
}

fn mean(total_cents: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_cents as f64 / count as f64
    }
}

/// Aggregate the `window` most recent orders
fn aggregate(state: &StoreState, window: usize) -> OrderAggregate {
    let mut recent: Vec<&Order> = state.orders.iter().collect();
    recent.sort_by(|a, b| {
        b.purchase_time
            .cmp(&a.purchase_time)
            .then(b.order_id.cmp(&a.order_id))
    });
    recent.truncate(window);

    let products: HashMap<u64, &Product> = state.products.iter().map(|p| (p.id, p)).collect();
    let categories: HashMap<u64, &Category> =
        state.categories.iter().map(|c| (c.id, c)).collect();

    let total_revenue_cents: u64 = recent.iter().map(|o| o.total_price_cents).sum();
    let totals = OrderTotals {
        total_orders: recent.len() as u64,
        total_revenue_cents,
        avg_order_value_cents: mean(total_revenue_cents, recent.len() as u64),
        first_order_time: recent.iter().map(|o| o.purchase_time).min(),
        last_order_time: recent.iter().map(|o| o.purchase_time).max(),
    };

    let mut per_product: HashMap<u64, ProductStatistics> = HashMap::new();
    let mut per_category: HashMap<u64, (CategoryStatistics, HashSet<u64>)> = HashMap::new();

    // Orders whose product or category is gone drop out of the breakdowns.
    for order in &recent {
        let Some(product) = products.get(&order.product_id) else {
            continue;
        };
        let Some(category) = categories.get(&product.category_id) else {
            continue;
        };

        let stats = per_product
            .entry(product.id)
            .or_insert_with(|| ProductStatistics {
                category_name: category.name.clone(),
                product_name: product.name.clone(),
                order_count: 0,
                total_quantity: 0,
                total_revenue_cents: 0,
                first_order_time: order.purchase_time,
                last_order_time: order.purchase_time,
                avg_order_value_cents: 0.0,
            });
        stats.order_count += 1;
        stats.total_quantity += u64::from(order.quantity);
        stats.total_revenue_cents += order.total_price_cents;
        stats.first_order_time = stats.first_order_time.min(order.purchase_time);
        stats.last_order_time = stats.last_order_time.max(order.purchase_time);

        let (stats, seen) = per_category.entry(category.id).or_insert_with(|| {
            (
                CategoryStatistics {
                    category_name: category.name.clone(),
                    order_count: 0,
                    total_quantity: 0,
                    total_revenue_cents: 0,
                    avg_order_value_cents: 0.0,
                    unique_products: 0,
                },
                HashSet::new(),
            )
        });
        stats.order_count += 1;
        stats.total_quantity += u64::from(order.quantity);
        stats.total_revenue_cents += order.total_price_cents;
        seen.insert(product.id);
    }

    let mut products: Vec<ProductStatistics> = per_product
        .into_values()
        .map(|mut stats| {
            stats.avg_order_value_cents = mean(stats.total_revenue_cents, stats.order_count);
            stats
        })
        .collect();
    products.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then(b.total_revenue_cents.cmp(&a.total_revenue_cents))
            .then_with(|| a.product_name.cmp(&b.product_name))
    });

    let mut categories: Vec<CategoryStatistics> = per_category
        .into_values()
        .map(|(mut stats, seen)| {
            stats.avg_order_value_cents = mean(stats.total_revenue_cents, stats.order_count);
            stats.unique_products = seen.len() as u64;
            stats
        })
        .collect();
    categories.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    OrderAggregate {
        totals,
        categories,
        products,
        queries_executed: STATISTICS_QUERY_COUNT,
        records_analyzed: recent.len() as u64,
    }
}

impl std::fmt::Debug for InMemoryOrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryOrderStore")
            .field("path", &self.path)
            .finish()
    }
}
