use async_trait::async_trait;
use blockseat_core::{AuthToken, CoreResult, VisaRepository};
use blockseat_order::{VisaAppointment, VisaStatus};
use reqwest::Method;
use serde_json::json;

use crate::http::BackendClient;

pub struct HttpVisaRepository {
    client: BackendClient,
}

impl HttpVisaRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisaRepository for HttpVisaRepository {
    async fn list(&self, token: &AuthToken) -> CoreResult<Vec<VisaAppointment>> {
        self.client.get(token, "/visa-appointment/wholesaler").await
    }

    async fn update_status(&self, token: &AuthToken, id: &str, status: VisaStatus) -> CoreResult<()> {
        let path = format!("/visa-appointment/{}/status", id);
        let body = json!({ "status": status });
        self.client.send_unit(Method::PATCH, token, &path, Some(&body)).await
    }
}
