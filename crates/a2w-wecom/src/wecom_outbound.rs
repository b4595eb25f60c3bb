//! Sequential markdown delivery to a WeCom group-bot webhook.
//!
//! Every segment is a separate POST. A segment counts as delivered only when
//! the bot answers HTTP 200 with the exact acknowledgment body; the first
//! failure stops the run and earlier segments stay delivered.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Webhook base the bot key is appended to.
pub const WECOM_WEBHOOK_BASE: &str = "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=";
/// Response body WeCom returns for an accepted message.
pub const WECOM_ACK_BODY: &str = r#"{"errcode":0,"errmsg":"ok"}"#;

const REASON_TRANSPORT_ERROR: &str = "delivery_transport_error";
const REASON_HTTP_STATUS: &str = "delivery_http_status";
const REASON_REMOTE_REJECTED: &str = "delivery_remote_rejected";
const REDACTED_KEY: &str = "<redacted>";

#[derive(Debug, Clone)]
/// Public struct `WecomOutboundConfig` used across a2w components.
pub struct WecomOutboundConfig {
    pub webhook_base: String,
    pub http_timeout_ms: u64,
}

impl Default for WecomOutboundConfig {
    fn default() -> Self {
        Self {
            webhook_base: WECOM_WEBHOOK_BASE.to_string(),
            http_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Public struct `WecomDeliveryReceipt` used across a2w components.
pub struct WecomDeliveryReceipt {
    pub segment_index: usize,
    pub segment_count: usize,
    pub content_bytes: usize,
    pub http_status: u16,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Public struct `WecomDeliveryReport` used across a2w components.
pub struct WecomDeliveryReport {
    pub segment_count: usize,
    pub receipts: Vec<WecomDeliveryReceipt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `WecomDeliveryError` used across a2w components.
///
/// `segment_index` is 1-based and names the segment whose POST failed.
pub struct WecomDeliveryError {
    pub reason_code: String,
    pub detail: String,
    pub segment_index: usize,
    pub segment_count: usize,
    pub endpoint: String,
    pub http_status: Option<u16>,
}

impl std::fmt::Display for WecomDeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reason_code={} segment={}/{} endpoint={} detail={}",
            self.reason_code, self.segment_index, self.segment_count, self.endpoint, self.detail
        )?;
        if let Some(status) = self.http_status {
            write!(f, " http_status={status}")?;
        }
        Ok(())
    }
}

impl std::error::Error for WecomDeliveryError {}

#[derive(Debug, Clone)]
/// Public struct `WecomOutboundDispatcher` used across a2w components.
pub struct WecomOutboundDispatcher {
    config: WecomOutboundConfig,
    client: reqwest::Client,
}

impl WecomOutboundDispatcher {
    pub fn new(config: WecomOutboundConfig) -> Result<Self> {
        if config.webhook_base.trim().is_empty() {
            return Err(anyhow!("wecom webhook base must not be empty"));
        }
        if config.http_timeout_ms == 0 {
            return Err(anyhow!("wecom outbound http timeout must be greater than 0"));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()
            .context("failed to build wecom outbound http client")?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WecomOutboundConfig {
        &self.config
    }

    /// Posts `segments` in order to the webhook addressed by `key`.
    pub async fn deliver(
        &self,
        key: &str,
        segments: &[String],
    ) -> Result<WecomDeliveryReport, WecomDeliveryError> {
        let endpoint = format!("{}{}", self.config.webhook_base, key);
        let redacted_endpoint = redact_webhook_key(&self.config.webhook_base, key);
        let segment_count = segments.len();

        let mut receipts = Vec::with_capacity(segment_count);
        for (offset, content) in segments.iter().enumerate() {
            let segment_index = offset + 1;
            let receipt = self
                .send_segment(
                    &endpoint,
                    &redacted_endpoint,
                    content,
                    segment_index,
                    segment_count,
                )
                .await?;
            debug!(
                endpoint = %redacted_endpoint,
                segment_index,
                segment_count,
                content_bytes = receipt.content_bytes,
                "wecom segment delivered"
            );
            receipts.push(receipt);
        }

        Ok(WecomDeliveryReport {
            segment_count,
            receipts,
        })
    }

    async fn send_segment(
        &self,
        endpoint: &str,
        redacted_endpoint: &str,
        content: &str,
        segment_index: usize,
        segment_count: usize,
    ) -> Result<WecomDeliveryReceipt, WecomDeliveryError> {
        let delivery_error = |reason_code: &str, detail: String, http_status: Option<u16>| {
            WecomDeliveryError {
                reason_code: reason_code.to_string(),
                detail,
                segment_index,
                segment_count,
                endpoint: redacted_endpoint.to_string(),
                http_status,
            }
        };

        let response = self
            .client
            .post(endpoint)
            .json(&markdown_payload(content))
            .send()
            .await
            .map_err(|error| {
                delivery_error(
                    REASON_TRANSPORT_ERROR,
                    truncate_detail(&error.without_url().to_string()),
                    None,
                )
            })?;
        let status = response.status();
        let body_raw = response.text().await.map_err(|error| {
            delivery_error(
                REASON_TRANSPORT_ERROR,
                format!("failed to read webhook response: {}", error.without_url()),
                Some(status.as_u16()),
            )
        })?;

        if status != StatusCode::OK {
            return Err(delivery_error(
                REASON_HTTP_STATUS,
                truncate_detail(&body_raw),
                Some(status.as_u16()),
            ));
        }
        if body_raw != WECOM_ACK_BODY {
            return Err(delivery_error(
                REASON_REMOTE_REJECTED,
                truncate_detail(&body_raw),
                Some(status.as_u16()),
            ));
        }

        Ok(WecomDeliveryReceipt {
            segment_index,
            segment_count,
            content_bytes: content.len(),
            http_status: status.as_u16(),
        })
    }
}

fn markdown_payload(content: &str) -> Value {
    json!({
        "msgtype": "markdown",
        "markdown": { "content": content },
    })
}

fn redact_webhook_key(webhook_base: &str, key: &str) -> String {
    if key.is_empty() {
        return webhook_base.to_string();
    }
    format!("{webhook_base}{REDACTED_KEY}")
}

fn truncate_detail(raw: &str) -> String {
    const LIMIT: usize = 512;
    let trimmed = raw.trim();
    if trimmed.chars().count() <= LIMIT {
        return trimmed.to_string();
    }
    let mut output = trimmed.chars().take(LIMIT).collect::<String>();
    output.push_str("...");
    output
}
