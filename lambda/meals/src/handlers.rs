//! One handler per meals operation. Each turns a store outcome into a
//! [`Reply`]; no error leaves this module unconverted.

use std::sync::Arc;

use lambda_http::http::StatusCode;
use tracing::{info, warn};

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::model::MealPayload;
use crate::response::{Reply, Success};
use crate::store::MealStore;

#[derive(Clone)]
pub struct MealHandlers {
    store: Arc<dyn MealStore>,
}

impl MealHandlers {
    pub fn new(store: Arc<dyn MealStore>) -> Self {
        Self { store }
    }

    pub fn hello(&self) -> Reply {
        Reply::success(StatusCode::OK, Success::message("Hello, world!"))
    }

    pub async fn list(&self, ctx: &RequestContext) -> Reply {
        respond(self.try_list(ctx).await)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Reply {
        respond(self.try_get(ctx, id).await)
    }

    pub async fn create(&self, ctx: &RequestContext, body: &[u8]) -> Reply {
        respond(self.try_create(ctx, body).await)
    }

    pub async fn update(&self, ctx: &RequestContext, id: &str, body: &[u8]) -> Reply {
        respond(self.try_update(ctx, id, body).await)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Reply {
        respond(self.try_delete(ctx, id).await)
    }

    pub async fn delete_all(&self, ctx: &RequestContext) -> Reply {
        respond(self.try_delete_all(ctx).await)
    }

    async fn try_list(&self, ctx: &RequestContext) -> Result<Reply, ApiError> {
        let meals = self
            .store
            .list_all(ctx)
            .await
            .map_err(ApiError::store("Failed to retrieve meals"))?;
        Ok(Reply::success(StatusCode::OK, Success::items(meals)))
    }

    async fn try_get(&self, ctx: &RequestContext, id: &str) -> Result<Reply, ApiError> {
        let meal = self
            .store
            .get_by_id(ctx, id)
            .await
            .map_err(ApiError::store("Failed to retrieve meal"))?
            .ok_or(ApiError::NotFound)?;
        Ok(Reply::success(StatusCode::OK, Success::item(meal)))
    }

    async fn try_create(&self, ctx: &RequestContext, body: &[u8]) -> Result<Reply, ApiError> {
        let meal = MealPayload::from_slice(body)
            .map_err(ApiError::invalid_body)?
            .into_meal();
        if !meal.validate() {
            return Err(ApiError::missing_fields());
        }

        let meal = meal.prepare_for_create();
        self.store
            .put(ctx, &meal)
            .await
            .map_err(ApiError::store("Failed to save meal"))?;

        info!(id = %meal.meal_id, "meal created");
        Ok(Reply::success(StatusCode::CREATED, Success::item(meal)))
    }

    /// Full replace: fields the body leaves out are stored empty, and the
    /// path id overrides any id in the body.
    async fn try_update(
        &self,
        ctx: &RequestContext,
        id: &str,
        body: &[u8],
    ) -> Result<Reply, ApiError> {
        self.store
            .get_by_id(ctx, id)
            .await
            .map_err(ApiError::store("Failed to retrieve meal"))?
            .ok_or(ApiError::NotFound)?;

        let meal = MealPayload::from_slice(body)
            .map_err(ApiError::invalid_body)?
            .replace(id);
        self.store
            .put(ctx, &meal)
            .await
            .map_err(ApiError::store("Failed to update meal"))?;

        info!(id, "meal updated");
        Ok(Reply::success(StatusCode::OK, Success::item(meal)))
    }

    async fn try_delete(&self, ctx: &RequestContext, id: &str) -> Result<Reply, ApiError> {
        self.store
            .delete_by_id(ctx, id)
            .await
            .map_err(ApiError::store("Failed to delete meal"))?;
        info!(id, "meal deleted");
        Ok(Reply::success(StatusCode::OK, Success::message("Meal deleted")))
    }

    async fn try_delete_all(&self, ctx: &RequestContext) -> Result<Reply, ApiError> {
        self.store
            .delete_all(ctx)
            .await
            .map_err(ApiError::store("Failed to delete all meals"))?;
        info!("all meals deleted");
        Ok(Reply::success(
            StatusCode::OK,
            Success::message("All meals deleted"),
        ))
    }
}

fn respond(result: Result<Reply, ApiError>) -> Reply {
    result.unwrap_or_else(|err| {
        warn!(status = err.status().as_u16(), error = %err, "request failed");
        Reply::from(err)
    })
}
