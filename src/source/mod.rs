//! 热榜数据源
//!
//! - **model**: PlatformSpec / HotItem / PlatformResult
//! - **text**: 标题清洗与热度格式化
//! - **newsnow**: 基于 newsnow 聚合 API 的 HTTP 数据源
//!
//! 新增数据源只需实现 [`HotSource`]，抓取调度（并发上限、失败降级、排序）由
//! [`crate::core::task_scheduler`] 统一处理。

pub mod model;
pub mod newsnow;
pub mod text;

pub use model::{total_items, HotItem, PlatformResult, PlatformSpec};
pub use newsnow::{parse_payload, NewsNowSource};
pub use text::{format_hot, strip_html};

use async_trait::async_trait;

use crate::core::FetchError;

/// 热榜数据源：按平台拉取一次榜单
#[async_trait]
pub trait HotSource: Send + Sync {
    /// 数据源名称（用于日志）
    fn name(&self) -> &str;

    /// 拉取指定平台的热点，最多 `platform.limit` 条
    async fn fetch(&self, platform: &PlatformSpec) -> Result<Vec<HotItem>, FetchError>;
}
