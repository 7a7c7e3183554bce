//! hotpush - 全网热榜聚合推送
//!
//! 入口：初始化日志、加载配置，执行一次 抓取 → 渲染 → 推送。
//! 部分平台或渠道失败不影响退出码。

use hotpush::{config::load_config, observability, run_once};

#[tokio::main]
async fn main() {
    observability::init();

    let config = match load_config(None) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ 配置加载失败: {}", e);
            return;
        }
    };

    if let Err(e) = run_once(&config).await {
        tracing::error!("❌ 运行失败: {:#}", e);
    }
}
