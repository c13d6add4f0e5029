//! Remote notification transports.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use shield_core::config::NotificationConfig;

use crate::error::DispatchError;
use crate::submission::TemplateParams;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const SEND_PATH: &str = "/api/v1.0/email/send";

/// Delivers a quote notification to the shop.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    async fn send(&self, params: &TemplateParams) -> Result<(), DispatchError>;
}

/// EmailJS REST transport.
pub struct EmailJsTransport {
    client: Client,
    base_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsTransport {
    pub fn new(
        base_url: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
                .timeout(timeout)
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "HTTP client build failed, using defaults without timeouts");
                    Client::new()
                }),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Build a transport from the `[notifications]` section.
    ///
    /// Fails with [`DispatchError::NotConfigured`] when any credential is blank.
    pub fn from_config(config: &NotificationConfig) -> Result<Self, DispatchError> {
        if !config.is_configured() {
            return Err(DispatchError::NotConfigured);
        }
        Ok(Self::new(
            config.endpoint.as_str(),
            config.service_id.as_str(),
            config.template_id.as_str(),
            config.public_key.as_str(),
            Duration::from_secs(config.request_timeout_secs),
        ))
    }

    fn send_url(&self) -> String {
        format!("{}{}", self.base_url, SEND_PATH)
    }
}

#[async_trait]
impl NotificationTransport for EmailJsTransport {
    fn name(&self) -> &str {
        "emailjs"
    }

    async fn send(&self, params: &TemplateParams) -> Result<(), DispatchError> {
        let payload = json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.public_key,
            "template_params": params,
        });

        let resp = self
            .client
            .post(self.send_url())
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(status = status.as_u16(), "EmailJS accepted notification");
        Ok(())
    }
}
