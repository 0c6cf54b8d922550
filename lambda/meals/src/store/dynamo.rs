use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use futures_util::future::try_join_all;
use tracing::{debug, error, instrument};

use crate::context::RequestContext;
use crate::model::Meal;
use crate::store::item::{self, Item, KEY_ATTR};
use crate::store::{MealStore, StoreError};

/// Meals table backed by DynamoDB. The client is shared across invocations.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Reads every page of a scan. `projection` narrows the attributes
    /// returned for each item.
    async fn scan_items(&self, projection: Option<&str>) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key);
            if let Some(projection) = projection {
                request = request.projection_expression(projection);
            }

            let page = request
                .send()
                .await
                .map_err(aws_sdk_dynamodb::Error::from)?;

            items.extend(page.items.unwrap_or_default());
            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(table = %self.table, count = items.len(), "scan complete");
        Ok(items)
    }

    async fn put_item(&self, meal: &Meal) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item::to_item(meal)))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    async fn get_item(&self, id: &str) -> Result<Option<Meal>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .set_key(Some(item::key(id)))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        match output.item {
            Some(found) => item::from_item(&found).map(Some),
            None => Ok(None),
        }
    }

    async fn scan_meals(&self) -> Result<Vec<Meal>, StoreError> {
        self.scan_items(None)
            .await?
            .iter()
            .map(item::from_item)
            .collect()
    }

    async fn delete_key(&self, id: String) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .set_key(Some(item::key(&id)))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    async fn delete_every_item(&self) -> Result<(), StoreError> {
        let keys = self
            .scan_items(Some(KEY_ATTR))
            .await?
            .iter()
            .map(item::key_of)
            .collect::<Result<Vec<_>, _>>()?;
        let count = keys.len();

        try_join_all(keys.into_iter().map(|id| self.delete_key(id))).await?;

        debug!(table = %self.table, count, "deleted all meals");
        Ok(())
    }
}

fn logged<T>(table: &str, op: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
    if let Err(e) = &result {
        error!(table, op, error = %e, "store operation failed");
    }
    result
}

#[async_trait]
impl MealStore for DynamoStore {
    #[instrument(skip_all, fields(id = %meal.meal_id, request_id = %ctx.request_id))]
    async fn put(&self, ctx: &RequestContext, meal: &Meal) -> Result<(), StoreError> {
        let result = ctx.run(self.put_item(meal)).await;
        logged(&self.table, "put", result)
    }

    #[instrument(skip_all, fields(id = %id, request_id = %ctx.request_id))]
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Option<Meal>, StoreError> {
        let result = ctx.run(self.get_item(id)).await;
        logged(&self.table, "get", result)
    }

    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Meal>, StoreError> {
        let result = ctx.run(self.scan_meals()).await;
        logged(&self.table, "list", result)
    }

    #[instrument(skip_all, fields(id = %id, request_id = %ctx.request_id))]
    async fn delete_by_id(&self, ctx: &RequestContext, id: &str) -> Result<(), StoreError> {
        let result = ctx.run(self.delete_key(id.to_string())).await;
        logged(&self.table, "delete", result)
    }

    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    async fn delete_all(&self, ctx: &RequestContext) -> Result<(), StoreError> {
        let result = ctx.run(self.delete_every_item()).await;
        logged(&self.table, "delete_all", result)
    }
}
