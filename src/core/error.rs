//! 抓取与推送错误类型
//!
//! 两类错误都在本地降级：抓取失败的平台结果为空，推送失败只记录日志，不中断本次运行。

use reqwest::StatusCode;
use thiserror::Error;

/// 单个平台抓取失败的原因
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(StatusCode),

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Config error: {0}")]
    Config(String),

    /// 并发许可获取失败（信号量已关闭）
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// 单个推送渠道失败的原因
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}: {1}")]
    Status(StatusCode, String),

    /// 服务端返回了 JSON，但业务码不是成功
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// 是否为超时（日志中单独提示）
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Http(e) if e.is_timeout())
    }
}
