use std::sync::Arc;

use async_trait::async_trait;
use lead_capture_sdk::{LeadCaptureClientV1, LeadError, LeadSubmissionInput, SubmissionReceipt};

use crate::domain::service::Service;

/// In-process client over the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl LeadCaptureClientV1 for LocalClient {
    async fn submit(&self, input: LeadSubmissionInput) -> Result<SubmissionReceipt, LeadError> {
        self.service.submit(input).await.map_err(Into::into)
    }
}
