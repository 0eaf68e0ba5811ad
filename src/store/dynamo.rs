//! DynamoDB-backed table store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkValue;

use crate::core::{AttributeValue, RawItem};
use crate::{ExportError, ExportResult};

use super::traits::{ScanPage, TableStore};

/// Table store talking to DynamoDB through the AWS SDK.
///
/// Credentials and endpoint come from the standard AWS provider chain.
pub struct DynamoStore {
    client: Option<Client>,
    region: String,
}

impl DynamoStore {
    /// Build a client for `region`.
    pub async fn connect(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::from_client(Client::new(&config), region)
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        DynamoStore { client: Some(client), region: region.into() }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl TableStore for DynamoStore {
    fn name(&self) -> &str {
        "dynamodb"
    }

    async fn scan(&self, table: &str, exclusive_start_key: Option<RawItem>) -> ExportResult<ScanPage> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ExportError::Message("DynamoDB client already released".into()))?;

        let output = client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(exclusive_start_key.map(to_sdk_item))
            .send()
            .await
            .map_err(|e| ExportError::Scan {
                table: table.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(ScanPage {
            items: output.items().iter().map(from_sdk_item).collect(),
            last_evaluated_key: output.last_evaluated_key().map(from_sdk_item),
        })
    }

    fn release(&mut self) {
        // Dropping the client closes its connection pool.
        if self.client.take().is_some() {
            tracing::debug!(region = %self.region, "dropped DynamoDB client");
        }
    }
}

/// SDK items are hash maps; attributes are ordered by name so column order is stable.
fn from_sdk_item(item: &HashMap<String, SdkValue>) -> RawItem {
    let mut pairs: RawItem = item
        .iter()
        .map(|(name, value)| (name.clone(), from_sdk_value(value)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

fn from_sdk_value(value: &SdkValue) -> AttributeValue {
    match value {
        SdkValue::S(s) => AttributeValue::S(s.clone()),
        SdkValue::N(n) => AttributeValue::N(n.clone()),
        SdkValue::B(b) => AttributeValue::B(b.as_ref().to_vec()),
        SdkValue::Bool(b) => AttributeValue::Bool(*b),
        SdkValue::Null(_) => AttributeValue::Null,
        SdkValue::M(m) => AttributeValue::M(from_sdk_item(m)),
        SdkValue::L(l) => AttributeValue::L(l.iter().map(from_sdk_value).collect()),
        SdkValue::Ss(s) => AttributeValue::Ss(s.clone()),
        SdkValue::Ns(n) => AttributeValue::Ns(n.clone()),
        SdkValue::Bs(bs) => AttributeValue::Bs(bs.iter().map(|b| b.as_ref().to_vec()).collect()),
        other => {
            tracing::warn!(?other, "unknown attribute type, exporting as null");
            AttributeValue::Null
        }
    }
}

fn to_sdk_item(item: RawItem) -> HashMap<String, SdkValue> {
    item.into_iter()
        .map(|(name, value)| (name, to_sdk_value(value)))
        .collect()
}

fn to_sdk_value(value: AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s),
        AttributeValue::N(n) => SdkValue::N(n),
        AttributeValue::B(b) => SdkValue::B(Blob::new(b)),
        AttributeValue::Bool(b) => SdkValue::Bool(b),
        AttributeValue::Null => SdkValue::Null(true),
        AttributeValue::M(m) => SdkValue::M(to_sdk_item(m)),
        AttributeValue::L(l) => SdkValue::L(l.into_iter().map(to_sdk_value).collect()),
        AttributeValue::Ss(s) => SdkValue::Ss(s),
        AttributeValue::Ns(n) => SdkValue::Ns(n),
        AttributeValue::Bs(bs) => SdkValue::Bs(bs.into_iter().map(Blob::new).collect()),
    }
}
