//! hotpush - 全网热榜聚合推送
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **source**: 热榜数据源（newsnow API）、数据模型、标题清洗与热度格式化
//! - **core**: 错误类型、并发抓取调度、单次运行编排
//! - **render**: PushPlus HTML 与飞书卡片渲染
//! - **integrations**: PushPlus / 飞书推送渠道
//! - **observability**: 日志初始化

pub mod config;
pub mod core;
pub mod integrations;
pub mod observability;
pub mod render;
pub mod source;

pub use crate::core::{run_once, Pipeline, RunReport};
