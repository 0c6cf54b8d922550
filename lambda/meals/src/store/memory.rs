use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::context::RequestContext;
use crate::model::Meal;
use crate::store::item::{self, Item};
use crate::store::{MealStore, StoreError};

/// In-process meals table. Holds DynamoDB-shaped items so reads and writes
/// go through the same marshaling as the real table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Raw stored item, for inspecting what actually hit the table.
    pub async fn raw_item(&self, id: &str) -> Option<Item> {
        self.items.read().await.get(id).cloned()
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn put(&self, _ctx: &RequestContext, meal: &Meal) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .insert(meal.meal_id.clone(), item::to_item(meal));
        Ok(())
    }

    async fn get_by_id(&self, _ctx: &RequestContext, id: &str) -> Result<Option<Meal>, StoreError> {
        self.items
            .read()
            .await
            .get(id)
            .map(item::from_item)
            .transpose()
    }

    async fn list_all(&self, _ctx: &RequestContext) -> Result<Vec<Meal>, StoreError> {
        self.items.read().await.values().map(item::from_item).collect()
    }

    async fn delete_by_id(&self, _ctx: &RequestContext, id: &str) -> Result<(), StoreError> {
        self.items.write().await.remove(id);
        Ok(())
    }

    async fn delete_all(&self, _ctx: &RequestContext) -> Result<(), StoreError> {
        // Same shape as the DynamoDB path: snapshot the keys, then delete each.
        let keys: Vec<String> = self.items.read().await.keys().cloned().collect();
        let mut items = self.items.write().await;
        for key in &keys {
            items.remove(key);
        }
        debug!(count = keys.len(), "deleted all meals");
        Ok(())
    }
}
