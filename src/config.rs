//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `HOTPUSH__*` 覆盖（双下划线表示嵌套，如
//! `HOTPUSH__FETCH__MAX_CONCURRENT=3`），最后读取推送地址的简写变量
//! `FEISHU_WEBHOOK_URL`、`PUSHPLUS_TOKEN`。

use std::path::PathBuf;

use serde::Deserialize;

use crate::source::PlatformSpec;

/// 飞书 Webhook 地址的环境变量
pub const FEISHU_WEBHOOK_ENV: &str = "FEISHU_WEBHOOK_URL";
/// PushPlus Token 的环境变量
pub const PUSHPLUS_TOKEN_ENV: &str = "PUSHPLUS_TOKEN";

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub fetch: FetchSection,
    pub feishu: FeishuSection,
    pub pushplus: PushPlusSection,
}

/// [app] 段：启动横幅中的名称
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "热点推送".to_string(),
        }
    }
}

/// [fetch] 段：热榜 API、请求头、超时、并发与平台列表
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSection {
    pub api_url: String,
    pub referer: String,
    pub user_agent: String,
    /// 单个平台请求超时（秒）
    pub timeout_secs: u64,
    /// 同时在途的平台请求数
    pub max_concurrent: usize,
    pub platforms: Vec<PlatformSpec>,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            api_url: "https://newsnow.busiyi.world/api/s".to_string(),
            referer: "https://newsnow.busiyi.world/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 15,
            max_concurrent: 5,
            platforms: default_platforms(),
        }
    }
}

/// 默认平台（id, 名称, 图标, 品牌色, 条数）
pub fn default_platforms() -> Vec<PlatformSpec> {
    vec![
        PlatformSpec::new("weibo", "微博", "📛", "#ff4d4f", 15),
        PlatformSpec::new("douyin", "抖音", "🎬", "#000000", 12),
        PlatformSpec::new("bilibili-hot-search", "B站", "📺", "#fb7299", 12),
        PlatformSpec::new("zhihu", "知乎", "🧠", "#0066ff", 12),
        PlatformSpec::new("baidu", "百度", "🔍", "#2932e1", 12),
        PlatformSpec::new("toutiao", "头条", "⚡", "#ff0000", 12),
        PlatformSpec::new("36kr-renqi", "36氪", "🚀", "#0078ff", 8),
        PlatformSpec::new("ithome", "IT之家", "💻", "#d32f2f", 8),
        PlatformSpec::new("hupu", "虎扑", "🏀", "#e31d1a", 8),
        PlatformSpec::new("wallstreetcn-hot", "华尔街见闻", "📈", "#1a73e8", 8),
    ]
}

/// [feishu] 段：自定义机器人 Webhook；未配置时跳过飞书推送
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeishuSection {
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FeishuSection {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 30,
        }
    }
}

/// [pushplus] 段：Token 与接口地址；未配置 Token 时跳过
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PushPlusSection {
    pub token: Option<String>,
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for PushPlusSection {
    fn default() -> Self {
        Self {
            token: None,
            url: "http://www.pushplus.plus/send".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// 用简写环境变量补齐推送地址（仅当对应项未在文件 / HOTPUSH__* 中配置）
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.feishu.webhook_url.is_none() {
            self.feishu.webhook_url = lookup(FEISHU_WEBHOOK_ENV);
        }
        if self.pushplus.token.is_none() {
            self.pushplus.token = lookup(PUSHPLUS_TOKEN_ENV);
        }
        // 空字符串等同于未配置
        self.feishu.webhook_url = non_empty(self.feishu.webhook_url.take());
        self.pushplus.token = non_empty(self.pushplus.token.take());
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 从 config 目录加载配置，环境变量 HOTPUSH__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 叠加环境变量 HOTPUSH__*（双下划线表示嵌套键）
/// 4. 最后读取 FEISHU_WEBHOOK_URL / PUSHPLUS_TOKEN
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("HOTPUSH")
            .separator("__")
            .try_parsing(true),
    );

    let mut app: AppConfig = builder.build()?.try_deserialize()?;
    app.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(app)
}
