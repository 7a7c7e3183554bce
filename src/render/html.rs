//! PushPlus 使用的 HTML 文档

use std::fmt::Write;

use chrono::NaiveDateTime;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::source::{total_items, HotItem, PlatformResult};

const STYLE: &str = "\
body{font-family:-apple-system,sans-serif;background:#f8f9fa;margin:0;padding:12px;font-size:14px;color:#333}
.header{text-align:center;padding:16px 0;margin-bottom:12px}
.header h1{font-size:20px;margin:0 0 6px;color:#333}
.header p{font-size:12px;color:#999;margin:0}
.card{background:#fff;border-radius:10px;margin-bottom:14px;box-shadow:0 1px 4px rgba(0,0,0,0.06)}
.card-title{padding:12px 14px;border-bottom:1px solid #f0f0f0;display:flex;align-items:center;font-weight:600;font-size:15px}
.card-title .icon{margin-right:8px;font-size:18px}
.card-title .name{color:#333}
.item{padding:10px 14px;border-bottom:1px solid #f5f5f5;display:flex;align-items:flex-start}
.item:last-child{border-bottom:none}
.num{width:22px;height:22px;border-radius:5px;text-align:center;line-height:22px;font-size:12px;font-weight:bold;margin-right:10px;flex-shrink:0}
.num1{background:#ff4757;color:#fff}
.num2{background:#ff6b81;color:#fff}
.num3{background:#ffa502;color:#fff}
.num-other{background:#f1f2f6;color:#666}
.info{flex:1;min-width:0}
.title{line-height:1.5;word-break:break-word}
.title a{color:#333;text-decoration:none}
.title a.hot1{color:#e74c3c}
.title a.hot2{color:#e67e22}
.hot-val{font-size:11px;color:#aaa;margin-top:3px}
";

/// 排名徽章与标题链接的样式类：前两名强调色，第三名浅强调色
fn rank_classes(rank: usize) -> (&'static str, &'static str) {
    match rank {
        1 => ("num1", "hot1"),
        2 => ("num2", "hot1"),
        3 => ("num3", "hot2"),
        _ => ("num-other", ""),
    }
}

/// 生成完整 HTML 文档
pub fn render_html(platforms: &[PlatformResult], now: &NaiveDateTime) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n<style>\n",
    );
    html.push_str(STYLE);
    html.push_str("</style></head><body>\n");

    let _ = write!(
        html,
        "<div class=\"header\"><h1>🔥 全球热点汇总 🔥</h1><p>{} · {}平台 · {}条</p></div>\n",
        now.format("%m月%d日 %H:%M"),
        platforms.len(),
        total_items(platforms)
    );

    for result in platforms {
        let _ = write!(
            html,
            "<div class=\"card\"><div class=\"card-title\"><span class=\"icon\">{}</span><span class=\"name\">{}</span></div>",
            encode_text(&result.platform.icon),
            encode_text(&result.platform.name)
        );
        for item in &result.items {
            render_item(&mut html, item);
        }
        html.push_str("</div>");
    }

    html.push_str("</body></html>");
    html
}

fn render_item(html: &mut String, item: &HotItem) {
    let (num_cls, title_cls) = rank_classes(item.rank);
    let _ = write!(
        html,
        "<div class=\"item\"><span class=\"num {}\">{}</span><div class=\"info\"><div class=\"title\"><a href=\"{}\" class=\"{}\">{}</a></div>",
        num_cls,
        item.rank,
        encode_double_quoted_attribute(&item.url),
        title_cls,
        encode_text(&item.title)
    );
    if item.has_hot() {
        let _ = write!(html, "<div class=\"hot-val\">🔥 {}</div>", encode_text(&item.hot));
    }
    html.push_str("</div></div>");
}
