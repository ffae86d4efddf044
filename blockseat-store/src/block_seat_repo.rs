use async_trait::async_trait;
use blockseat_catalog::BlockSeatRecord;
use blockseat_core::{AuthToken, BlockSeatRepository, CoreResult};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::http::BackendClient;

/// `/block-seats` on the flight service.
pub struct HttpBlockSeatRepository {
    client: BackendClient,
}

impl HttpBlockSeatRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlockSeatRepository for HttpBlockSeatRepository {
    async fn list(&self, token: &AuthToken) -> CoreResult<Vec<BlockSeatRecord>> {
        self.client.get(token, "/block-seats").await
    }

    async fn create(&self, token: &AuthToken, payload: &Value) -> CoreResult<BlockSeatRecord> {
        self.client.send(Method::POST, token, "/block-seats", payload).await
    }

    async fn update(
        &self,
        token: &AuthToken,
        id: &str,
        changes: &Map<String, Value>,
    ) -> CoreResult<BlockSeatRecord> {
        let path = format!("/block-seats/{}", id);
        self.client.send(Method::PUT, token, &path, changes).await
    }

    async fn delete(&self, token: &AuthToken, id: &str) -> CoreResult<()> {
        let path = format!("/block-seats/{}", id);
        self.client.send_unit::<Value>(Method::DELETE, token, &path, None).await
    }
}
