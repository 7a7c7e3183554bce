//! 推送内容渲染：纯函数，输入为平台结果与时间戳
//!
//! - **html**: PushPlus 的 HTML 文档
//! - **card**: 飞书交互式卡片

pub mod card;
pub mod html;

pub use card::{render_card, Card, CardElement, FeishuMessage};
pub use html::render_html;

use chrono::NaiveDateTime;

use crate::source::PlatformResult;

/// PushPlus 消息标题
pub fn push_title(now: &NaiveDateTime) -> String {
    format!("🔥 全球热点 {}", now.format("%m-%d %H:%M"))
}

/// 一次运行的全部推送内容（同一时间戳渲染）
#[derive(Debug, Clone)]
pub struct Digest {
    pub title: String,
    pub html: String,
    pub card: FeishuMessage,
}

impl Digest {
    pub fn build(platforms: &[PlatformResult], now: &NaiveDateTime) -> Self {
        Self {
            title: push_title(now),
            html: render_html(platforms, now),
            card: render_card(platforms, now),
        }
    }
}
