//! 抓取调度：Semaphore 限制同时在途的平台请求数，全部完成后按配置顺序汇总
//!
//! 每个平台的结果只写入自己的槽位（index, result），汇总发生在所有任务结束之后，无需加锁。

use std::sync::Arc;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::core::FetchError;
use crate::source::{HotSource, PlatformResult, PlatformSpec};

/// 默认并发上限
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// 抓取任务调度器
pub struct TaskScheduler {
    /// 抓取并发限制（默认 5）
    fetch_semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl TaskScheduler {
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            fetch_semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// 获取一次抓取许可
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, FetchError> {
        self.fetch_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| FetchError::Scheduler(e.to_string()))
    }

    /// 抓取单个平台；任何错误都降级为空结果并记录日志
    pub async fn fetch_one(&self, source: &dyn HotSource, platform: &PlatformSpec) -> PlatformResult {
        let outcome = match self.acquire().await {
            Ok(_permit) => source.fetch(platform).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(items) => {
                tracing::debug!(platform = %platform.name, count = items.len(), "platform fetched");
                PlatformResult {
                    platform: platform.clone(),
                    items,
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("[{}] 获取超时: {}", platform.name, e);
                } else {
                    tracing::warn!("[{}] 获取失败: {}", platform.name, e);
                }
                PlatformResult::empty(platform.clone())
            }
        }
    }

    /// 并发抓取所有平台，等待全部完成
    ///
    /// 返回值按 `platforms` 的配置顺序排列，且只包含有数据的平台。
    pub async fn fetch_all(
        &self,
        source: &dyn HotSource,
        platforms: &[PlatformSpec],
    ) -> Vec<PlatformResult> {
        let mut pending: FuturesUnordered<_> = platforms
            .iter()
            .enumerate()
            .map(|(index, platform)| async move { (index, self.fetch_one(source, platform).await) })
            .collect();

        let mut slots = Vec::with_capacity(platforms.len());
        while let Some((index, result)) = pending.next().await {
            slots.push((index, result));
        }

        slots.sort_by_key(|(index, _)| *index);
        slots
            .into_iter()
            .map(|(_, result)| result)
            .filter(|result| !result.is_empty())
            .collect()
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT)
    }
}
