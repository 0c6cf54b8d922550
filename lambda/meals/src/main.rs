use lambda_http::{run, service_fn, Error};
use meals::{function_handler, Config, MealHandlers};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let handlers = MealHandlers::new(config.build_store().await);
    info!(table = %config.table_name, backend = ?config.backend, "meals lambda initialized");

    run(service_fn(|event| function_handler(&handlers, event))).await
}
