//! 文本清洗与热度格式化
//!
//! 热度规则：已带「万/亿」单位的原样保留（去掉「热度」字样）；纯数字按量级换算，
//! ≥1 亿保留一位小数，≥1 万取整，其余按千分位分组。换算用整数运算四舍五入（half-up）。

use std::sync::OnceLock;

use html_escape::decode_html_entities;
use regex::Regex;

/// 非数字、非单位的热度最多保留的字符数
const MAX_RAW_HOT_CHARS: usize = 10;

const YI: u128 = 100_000_000;
const WAN: u128 = 10_000;

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static WS_RE: OnceLock<Regex> = OnceLock::new();

/// 去除 HTML 标签、解码实体并折叠空白
///
/// 反复处理直到结果不再变化，实体转义过的标签（`&lt;b&gt;`）和多层转义
/// （`&amp;lt;`）也会被清理干净，因此对结果再次调用不会改变它。
pub fn strip_html(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        // 每一轮要么缩短字符串，要么只替换等长空白后即稳定，循环必然结束
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    let ws_re = WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap());

    let without_tags = tag_re.replace_all(text, "");
    let decoded = decode_html_entities(&without_tags);
    ws_re.replace_all(&decoded, " ").trim().to_string()
}

/// 将上游热度值格式化为展示字符串
pub fn format_hot(raw: &str) -> String {
    let hot = strip_html(raw);
    if hot.is_empty() {
        return hot;
    }
    if hot.contains('万') || hot.contains('亿') {
        return hot.replace("热度", "").trim().to_string();
    }

    let digits: String = hot.chars().filter(|c| c.is_ascii_digit()).collect();
    // u128 足够容纳 38 位数字，更长的按非数字处理
    if let Ok(num) = digits.parse::<u128>() {
        if num >= YI {
            // 保留一位小数：以 0.1 亿为单位四舍五入，按余数进位避免加法溢出
            let unit = YI / 10;
            let tenths = num / unit + u128::from(num % unit >= unit / 2);
            return format!("{}.{}亿", tenths / 10, tenths % 10);
        }
        if num >= WAN {
            return format!("{}万", (num + WAN / 2) / WAN);
        }
        if num > 0 {
            return group_thousands(num);
        }
    }

    hot.chars().take(MAX_RAW_HOT_CHARS).collect()
}

/// 千分位分组：4321 -> "4,321"
fn group_thousands(num: u128) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
