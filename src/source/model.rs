//! 热榜数据模型：平台配置、单条热点、平台抓取结果

use serde::Deserialize;

/// 平台配置（id、显示名、图标、品牌色、条数上限），启动时加载后只读
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformSpec {
    /// 热榜 API 中的平台 id，如 weibo、zhihu
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// 最多取前 N 条
    pub limit: usize,
}

impl PlatformSpec {
    pub fn new(id: &str, name: &str, icon: &str, color: &str, limit: usize) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            limit,
        }
    }
}

/// 单条热点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotItem {
    /// 在上游榜单中的位置（从 1 开始）
    pub rank: usize,
    /// 纯文本标题（已去除 HTML 标签与实体）
    pub title: String,
    pub url: String,
    /// 格式化后的热度，如 "1.2亿"；可能为空
    pub hot: String,
}

impl HotItem {
    pub fn has_hot(&self) -> bool {
        !self.hot.is_empty()
    }
}

/// 一个平台的抓取结果；抓取失败时 items 为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformResult {
    pub platform: PlatformSpec,
    pub items: Vec<HotItem>,
}

impl PlatformResult {
    pub fn empty(platform: PlatformSpec) -> Self {
        Self {
            platform,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 所有平台的条目总数
pub fn total_items(results: &[PlatformResult]) -> usize {
    results.iter().map(|r| r.items.len()).sum()
}
