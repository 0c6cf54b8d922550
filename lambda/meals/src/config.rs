//! Process configuration, read once from the environment at cold start.

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use thiserror::Error;
use tracing::info;

use crate::store::{DynamoStore, MealStore, MemoryStore};

pub const DEFAULT_TABLE_NAME: &str = "MyTable-prod";
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: expected one of {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(Self::DynamoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid {
                key: "MEALS_STORE",
                value: value.to_string(),
                expected: "dynamodb, memory",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub region: String,
    /// Overrides the DynamoDB endpoint, e.g. for DynamoDB Local.
    pub endpoint_url: Option<String>,
    pub backend: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Ok(Self {
            table_name: or_default(var("TABLE_NAME"), "TABLE_NAME", DEFAULT_TABLE_NAME),
            region: or_default(var("AWS_REGION"), "AWS_REGION", DEFAULT_REGION),
            endpoint_url: var("DYNAMODB_ENDPOINT"),
            backend: var("MEALS_STORE")
                .map(|value| value.parse::<StoreBackend>())
                .transpose()?
                .unwrap_or(StoreBackend::DynamoDb),
        })
    }

    pub async fn build_store(&self) -> Arc<dyn MealStore> {
        match self.backend {
            StoreBackend::Memory => {
                info!("using in-memory meal store");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::DynamoDb => {
                let client = self.dynamodb_client().await;
                info!(table = %self.table_name, region = %self.region, "using DynamoDB meal store");
                Arc::new(DynamoStore::new(client, self.table_name.clone()))
            }
        }
    }

    async fn dynamodb_client(&self) -> aws_sdk_dynamodb::Client {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared);
        if let Some(endpoint) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        aws_sdk_dynamodb::Client::from_conf(builder.build())
    }
}

fn or_default(value: Option<String>, key: &str, default: &str) -> String {
    value.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
