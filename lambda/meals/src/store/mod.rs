//! Persistence for meal records.

use async_trait::async_trait;
use thiserror::Error;

use crate::context::RequestContext;
use crate::model::Meal;

pub mod dynamo;
pub mod item;
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dynamodb: {0}")]
    Dynamo(#[from] aws_sdk_dynamodb::Error),

    #[error("malformed item: {0}")]
    Malformed(String),

    #[error("store deadline exceeded")]
    DeadlineExceeded,
}

#[async_trait]
pub trait MealStore: Send + Sync {
    /// Unconditional full-item write keyed by `meal_id`.
    async fn put(&self, ctx: &RequestContext, meal: &Meal) -> Result<(), StoreError>;

    /// `Ok(None)` when no item has this id.
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Option<Meal>, StoreError>;

    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Meal>, StoreError>;

    /// Succeeds whether or not the item existed.
    async fn delete_by_id(&self, ctx: &RequestContext, id: &str) -> Result<(), StoreError>;

    /// Scan-then-delete. Not atomic: an item written after the scan survives.
    async fn delete_all(&self, ctx: &RequestContext) -> Result<(), StoreError>;
}
