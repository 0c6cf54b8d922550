pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod http_handler;
pub mod model;
pub mod response;
pub mod router;
pub mod store;

pub use config::Config;
pub use handlers::MealHandlers;
pub use http_handler::function_handler;
pub use model::{Meal, MealPayload};
