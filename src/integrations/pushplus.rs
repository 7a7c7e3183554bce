//! PushPlus 推送（微信公众号通道）
//!
//! 请求体 `{token, title, content, template: "html"}`，成功判定：响应体 `code == 200`。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{read_json, DeliveryOutcome, Notifier};
use crate::config::PushPlusSection;
use crate::core::DeliveryError;
use crate::render::Digest;

/// PushPlus 发送请求
#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    token: &'a str,
    title: &'a str,
    content: &'a str,
    template: &'a str,
}

/// PushPlus 渠道
pub struct PushPlus {
    client: Client,
    url: String,
    token: Option<String>,
}

impl PushPlus {
    pub fn new(config: &PushPlusSection) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone(),
        })
    }

    /// 发送 HTML 消息
    pub async fn send_html(&self, token: &str, title: &str, html: &str) -> Result<(), DeliveryError> {
        let req = PushRequest {
            token,
            title,
            content: html,
            template: "html",
        };
        let resp = self.client.post(&self.url).json(&req).send().await?;
        let result = read_json(resp).await?;

        if result.get("code").and_then(|v| v.as_i64()) == Some(200) {
            return Ok(());
        }
        let msg = result
            .get("msg")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| result.to_string());
        Err(DeliveryError::Rejected(msg))
    }
}

#[async_trait]
impl Notifier for PushPlus {
    fn name(&self) -> &str {
        "PushPlus"
    }

    async fn deliver(&self, digest: &Digest) -> DeliveryOutcome {
        let Some(token) = self.token.as_deref() else {
            tracing::warn!("⚠️ PushPlus Token 未配置，跳过");
            return DeliveryOutcome::Skipped;
        };

        match self.send_html(token, &digest.title, &digest.html).await {
            Ok(()) => {
                tracing::info!("✅ PushPlus 推送成功");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::error!("❌ PushPlus 推送失败: {}", e);
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

    fn channel(server: &mockito::ServerGuard, token: Option<&str>) -> PushPlus {
        PushPlus::new(&PushPlusSection {
            token: token.map(String::from),
            url: format!("{}/send", server.url()),
            ..PushPlusSection::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_deliver_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/send")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "token": "tok",
                "title": "🔥 全球热点 01-02 09:30",
                "template": "html"
            })))
            .with_status(200)
            .with_body(r#"{"code":200,"msg":"请求成功","data":"abc"}"#)
            .create_async()
            .await;

        let outcome = channel(&server, Some("tok")).deliver(&digest()).await;
        mock.assert_async().await;
        assert!(outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_deliver_rejected_carries_msg() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/send")
            .with_status(200)
            .with_body(r#"{"code":903,"msg":"无效的用户token"}"#)
            .create_async()
            .await;

        let outcome = channel(&server, Some("bad")).deliver(&digest()).await;
        match outcome {
            DeliveryOutcome::Failed(DeliveryError::Rejected(msg)) => assert_eq!(msg, "无效的用户token"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deliver_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/send")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let outcome = channel(&server, Some("tok")).deliver(&digest()).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed(DeliveryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_deliver_skipped_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/send").expect(0).create_async().await;

        let outcome = channel(&server, None).deliver(&digest()).await;
        mock.assert_async().await;
        assert!(matches!(outcome, DeliveryOutcome::Skipped));
    }
}
