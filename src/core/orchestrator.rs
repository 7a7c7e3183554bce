//! 单次运行：抓取全部平台 → 渲染 → 逐个渠道推送
//!
//! 抓取失败的平台被丢弃；全部平台都没有数据时直接结束，不发起任何推送。
//! 渠道之间互不影响，一个失败不会阻止另一个。

use anyhow::Context;
use chrono::{Local, NaiveDateTime};

use crate::config::AppConfig;
use crate::core::TaskScheduler;
use crate::integrations::{DeliveryOutcome, LarkWebhook, Notifier, PushPlus};
use crate::render::Digest;
use crate::source::{total_items, HotSource, NewsNowSource, PlatformResult};

/// 一次运行的结果
#[derive(Debug)]
pub enum RunReport {
    /// 没有任何平台返回数据，未推送
    NoData,
    Delivered {
        platforms: usize,
        items: usize,
        /// (渠道名, 结果)，按推送顺序
        outcomes: Vec<(String, DeliveryOutcome)>,
    },
}

impl RunReport {
    /// 实际发起请求的渠道数（不含跳过的）
    pub fn attempted(&self) -> usize {
        match self {
            RunReport::NoData => 0,
            RunReport::Delivered { outcomes, .. } => outcomes
                .iter()
                .filter(|(_, o)| !matches!(o, DeliveryOutcome::Skipped))
                .count(),
        }
    }
}

/// 运行所需的组件：数据源、调度器与推送渠道
pub struct Pipeline {
    source: Box<dyn HotSource>,
    scheduler: TaskScheduler,
    notifiers: Vec<Box<dyn Notifier>>,
    config: AppConfig,
}

impl Pipeline {
    /// 按配置创建 newsnow 数据源、PushPlus 与飞书渠道
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let source = NewsNowSource::new(&config.fetch).context("Failed to build hot-list client")?;
        let pushplus = PushPlus::new(&config.pushplus).context("Failed to build PushPlus client")?;
        let lark = LarkWebhook::new(&config.feishu).context("Failed to build Feishu client")?;

        // 推送顺序：PushPlus 在前，飞书在后
        let notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(pushplus), Box::new(lark)];
        Ok(Self::new(config.clone(), Box::new(source), notifiers))
    }

    pub fn new(
        config: AppConfig,
        source: Box<dyn HotSource>,
        notifiers: Vec<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            scheduler: TaskScheduler::new(config.fetch.max_concurrent),
            source,
            notifiers,
            config,
        }
    }

    /// 抓取所有配置平台（已排序、已去空）
    pub async fn fetch(&self) -> Vec<PlatformResult> {
        tracing::info!(
            source = self.source.name(),
            platforms = self.config.fetch.platforms.len(),
            max_concurrent = self.scheduler.max_concurrent(),
            "📡 获取热点中..."
        );
        self.scheduler
            .fetch_all(self.source.as_ref(), &self.config.fetch.platforms)
            .await
    }

    /// 依次推送到各渠道
    pub async fn deliver(&self, digest: &Digest) -> Vec<(String, DeliveryOutcome)> {
        tracing::info!("📤 推送中...");
        let mut outcomes = Vec::with_capacity(self.notifiers.len());
        for notifier in &self.notifiers {
            let outcome = notifier.deliver(digest).await;
            outcomes.push((notifier.name().to_string(), outcome));
        }
        outcomes
    }

    /// 以指定时间渲染，执行完整流程
    pub async fn run_at(&self, now: &NaiveDateTime) -> RunReport {
        let platforms = self.fetch().await;
        if platforms.is_empty() {
            tracing::error!("❌ 未获取到数据");
            return RunReport::NoData;
        }

        let items = total_items(&platforms);
        tracing::info!("✅ {}平台 {}条热点", platforms.len(), items);

        let digest = Digest::build(&platforms, now);
        let outcomes = self.deliver(&digest).await;

        RunReport::Delivered {
            platforms: platforms.len(),
            items,
            outcomes,
        }
    }

    /// 以当前本地时间执行完整流程
    pub async fn run(&self) -> RunReport {
        self.run_at(&Local::now().naive_local()).await
    }
}

/// 按配置执行一次
pub async fn run_once(config: &AppConfig) -> anyhow::Result<RunReport> {
    tracing::info!("{}", "=".repeat(40));
    tracing::info!("🚀 {}", config.app.name);
    tracing::info!("{}", "=".repeat(40));

    let pipeline = Pipeline::from_config(config)?;
    let report = pipeline.run().await;

    if let RunReport::Delivered { outcomes, .. } = &report {
        let delivered = outcomes.iter().filter(|(_, o)| o.is_delivered()).count();
        tracing::info!("✅ 完成（{}/{} 渠道推送成功）", delivered, outcomes.len());
    }
    Ok(report)
}
