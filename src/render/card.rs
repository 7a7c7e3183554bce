//! 飞书自定义机器人的交互式卡片（msg_type = interactive）

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::source::{total_items, HotItem, PlatformResult};

const CARD_TITLE: &str = "📊 今日热点汇总";
const CARD_TEMPLATE: &str = "red";

/// Webhook 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeishuMessage {
    pub msg_type: String,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub header: CardHeader,
    pub elements: Vec<CardElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardHeader {
    pub title: PlainText,
    /// 标题栏颜色模板
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainText {
    pub tag: String,
    pub content: String,
}

/// 卡片内容块
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum CardElement {
    Markdown { content: String },
    /// 分割线
    Hr,
}

impl CardElement {
    fn markdown(content: impl Into<String>) -> Self {
        CardElement::Markdown {
            content: content.into(),
        }
    }
}

/// 按排名分档的圆点：前三红、4-6 橙、其余蓝
fn rank_dot(rank: usize) -> &'static str {
    match rank {
        0..=3 => "🔴",
        4..=6 => "🟠",
        _ => "🔵",
    }
}

fn item_line(item: &HotItem) -> String {
    let mut line = format!("{} [{}]({})", rank_dot(item.rank), item.title, item.url);
    if item.has_hot() {
        line.push_str(&format!(" `{}`", item.hot));
    }
    line
}

/// 生成飞书卡片
pub fn render_card(platforms: &[PlatformResult], now: &NaiveDateTime) -> FeishuMessage {
    let mut elements = vec![CardElement::markdown(format!(
        "**🔥 全网热点速递**\n{} · {}平台 · {}条热点",
        now.format("%Y-%m-%d %H:%M"),
        platforms.len(),
        total_items(platforms)
    ))];

    for result in platforms {
        elements.push(CardElement::Hr);
        elements.push(CardElement::markdown(format!(
            "**{} {}**",
            result.platform.icon, result.platform.name
        )));
        let lines: Vec<String> = result.items.iter().map(item_line).collect();
        elements.push(CardElement::markdown(lines.join("\n")));
    }

    FeishuMessage {
        msg_type: "interactive".to_string(),
        card: Card {
            header: CardHeader {
                title: PlainText {
                    tag: "plain_text".to_string(),
                    content: CARD_TITLE.to_string(),
                },
                template: CARD_TEMPLATE.to_string(),
            },
            elements,
        },
    }
}
