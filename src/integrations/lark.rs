//! 飞书（Lark）自定义机器人 Webhook
//!
//! POST 交互式卡片 JSON 到群机器人地址。成功判定：响应体 `code == 0`（新版）或
//! `StatusCode == 0`（旧版）。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{read_json, DeliveryOutcome, Notifier};
use crate::config::FeishuSection;
use crate::core::DeliveryError;
use crate::render::{Digest, FeishuMessage};

/// 飞书群机器人
pub struct LarkWebhook {
    client: Client,
    webhook_url: Option<String>,
}

impl LarkWebhook {
    pub fn new(config: &FeishuSection) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
        })
    }

    /// 发送卡片
    pub async fn send_card(&self, url: &str, card: &FeishuMessage) -> Result<(), DeliveryError> {
        let resp = self.client.post(url).json(card).send().await?;
        let result = read_json(resp).await?;

        let code = result.get("code").and_then(|v| v.as_i64());
        let status_code = result.get("StatusCode").and_then(|v| v.as_i64());
        if code == Some(0) || status_code == Some(0) {
            return Ok(());
        }
        Err(DeliveryError::Rejected(result.to_string()))
    }
}

#[async_trait]
impl Notifier for LarkWebhook {
    fn name(&self) -> &str {
        "飞书"
    }

    async fn deliver(&self, digest: &Digest) -> DeliveryOutcome {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::warn!("⚠️ 飞书 Webhook 未配置，跳过");
            return DeliveryOutcome::Skipped;
        };

        match self.send_card(url, &digest.card).await {
            Ok(()) => {
                tracing::info!("✅ 飞书推送成功");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::error!("❌ 飞书推送失败: {}", e);
                DeliveryOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn digest() -> Digest {
        let now = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Digest::build(&[], &now)
    }

    fn webhook(url: Option<String>) -> LarkWebhook {
        LarkWebhook::new(&FeishuSection {
            webhook_url: url,
            ..FeishuSection::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_deliver_success_code_zero() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "msg_type": "interactive"
            })))
            .with_status(200)
            .with_body(r#"{"code":0,"msg":"success","data":{}}"#)
            .create_async()
            .await;

        let outcome = webhook(Some(format!("{}/hook", server.url())))
            .deliver(&digest())
            .await;
        mock.assert_async().await;
        assert!(outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_deliver_success_legacy_status_code() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(200)
            .with_body(r#"{"Extra":null,"StatusCode":0,"StatusMessage":"success"}"#)
            .create_async()
            .await;

        let outcome = webhook(Some(format!("{}/hook", server.url())))
            .deliver(&digest())
            .await;
        assert!(outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_deliver_rejected_by_server() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(200)
            .with_body(r#"{"code":19021,"msg":"sign match fail or timestamp is not within one hour from current time"}"#)
            .create_async()
            .await;

        let outcome = webhook(Some(format!("{}/hook", server.url())))
            .deliver(&digest())
            .await;
        assert!(matches!(outcome, DeliveryOutcome::Failed(DeliveryError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_deliver_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let outcome = webhook(Some(format!("{}/hook", server.url())))
            .deliver(&digest())
            .await;
        assert!(matches!(outcome, DeliveryOutcome::Failed(DeliveryError::Status(_, _))));
    }

    #[tokio::test]
    async fn test_deliver_skipped_when_unconfigured() {
        let hook = webhook(None);
        assert!(matches!(hook.deliver(&digest()).await, DeliveryOutcome::Skipped));
    }
}
