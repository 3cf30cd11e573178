//! DynamoDB operations for the bootcamp Lambda functions
//!
//! Every handler that persists data goes through [`DynamoStore`], one
//! instance per target table. Items are converted with `serde_dynamo`, so
//! stored shapes follow the serde attributes on the domain models and
//! numeric attributes come back as JSON integers or floats rather than
//! decimal strings.

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;

use crate::errors::{Error, Result};

/// DynamoDB client bound to one table
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Persist one item
    pub async fn put<T: Serialize>(&self, value: &T) -> Result<()> {
        let item: HashMap<String, AttributeValue> =
            to_item(value).map_err(|e| Error::DynamoSerialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    /// Fetch one item by key attribute, `None` when absent
    pub async fn get_item<T: DeserializeOwned>(
        &self,
        key_name: &str,
        key: AttributeValue,
    ) -> Result<Option<T>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(key_name, key)
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        match result.item {
            Some(item) => Ok(Some(
                from_item(item).map_err(|e| Error::DynamoSerialization(e.to_string()))?,
            )),
            None => Ok(None),
        }
    }

    /// Read the whole table
    pub async fn scan_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let items: Vec<T> = result
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| from_item(item).ok())
            .collect();

        Ok(items)
    }
}
