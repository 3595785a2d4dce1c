//! Repository Ports
//!
//! The relational store (orders, products, categories) is an external
//! collaborator; these traits are everything the services need from it.

use crate::error::Result;
use crate::value_objects::{NewOrder, Order, OrderAggregate, Product};
use async_trait::async_trait;

/// Write side used by the order job
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Pick one active product uniformly at random
    ///
    /// # Returns
    /// `None` when the catalogue has no active product
    async fn random_active_product(&self) -> Result<Option<Product>>;

    /// Insert an order, assigning its identifier and purchase time
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;

    /// Number of products in the catalogue
    async fn product_count(&self) -> Result<usize>;

    /// Number of stored orders
    async fn order_count(&self) -> Result<usize>;
}

/// Read side used by the statistics service
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    /// Aggregate the `window` most recent orders by category and product
    async fn aggregate_recent(&self, window: usize) -> Result<OrderAggregate>;
}
