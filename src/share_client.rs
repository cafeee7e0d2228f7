//! HTTP client for the share service.

use crate::error::ShareError;
use crate::models::{ShareRequest, ShareResponse};
use std::time::Duration;
use url::Url;

const SHARE_PATH: &str = "/api/share";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub share_id: String,
    /// Public address of the shared note: `<origin>/shared/<share_id>`.
    pub url: String,
}

#[derive(Clone)]
pub struct ShareClient {
    client: reqwest::Client,
    origin: Url,
}

impl ShareClient {
    pub fn new(origin: &str) -> Result<Self, ShareError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            origin: Url::parse(origin)?,
        })
    }

    pub fn origin(&self) -> String {
        self.origin.origin().ascii_serialization()
    }

    /// POST the note to the share service. Any non-2xx status is an error.
    pub async fn create_share_link(&self, request: &ShareRequest) -> Result<ShareLink, ShareError> {
        let endpoint = self.origin.join(SHARE_PATH)?;

        let response = self.client.post(endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ShareError::Status(status.as_u16()));
        }

        let body: ShareResponse = response.json().await?;
        Ok(ShareLink {
            url: format!("{}/shared/{}", self.origin(), body.share_id),
            share_id: body.share_id,
        })
    }
}
