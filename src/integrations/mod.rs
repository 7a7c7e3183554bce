//! 外部推送渠道：PushPlus（HTML）与飞书自定义机器人（交互式卡片）
//!
//! 每个渠道独立配置：未配置地址时跳过，失败只记录日志，互不影响。

pub mod lark;
pub mod pushplus;

pub use lark::LarkWebhook;
pub use pushplus::PushPlus;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::DeliveryError;
use crate::render::Digest;

/// 单个渠道的推送结果
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered,
    /// 未配置地址，未发起请求
    Skipped,
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// 推送渠道
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// 推送本次内容；永不返回错误，失败体现在 [`DeliveryOutcome::Failed`]
    async fn deliver(&self, digest: &Digest) -> DeliveryOutcome;
}

/// 检查 HTTP 状态并把响应体解析为 JSON
pub(crate) async fn read_json(resp: reqwest::Response) -> Result<Value, DeliveryError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(DeliveryError::Status(status, truncate(&body, 200)));
    }
    serde_json::from_str(&body)
        .map_err(|e| DeliveryError::InvalidResponse(format!("{}: {}", e, truncate(&body, 200))))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect::<String>() + "..."
    }
}
