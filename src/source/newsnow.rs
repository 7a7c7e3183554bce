//! newsnow 聚合热榜 API 数据源
//!
//! 请求：`GET {api_url}?id={platform}&latest`，带浏览器 UA 与 Referer。
//! 响应：`{"status": "...", "items": [{"title", "url", "mobileUrl", "extra": {"hot"}}]}`，
//! 部分镜像使用 `data` 代替 `items`。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;
use serde_json::Value;

use super::text::{format_hot, strip_html};
use super::{HotItem, HotSource, PlatformSpec};
use crate::config::FetchSection;
use crate::core::FetchError;

/// newsnow API 数据源
pub struct NewsNowSource {
    client: Client,
    api_url: String,
}

impl NewsNowSource {
    pub fn new(config: &FetchSection) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let referer = HeaderValue::from_str(&config.referer)
            .map_err(|e| FetchError::Config(format!("invalid referer {:?}: {}", config.referer, e)))?;
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('?').to_string(),
        })
    }

    fn platform_url(&self, platform: &PlatformSpec) -> String {
        format!("{}?id={}&latest", self.api_url, platform.id)
    }
}

#[async_trait]
impl HotSource for NewsNowSource {
    fn name(&self) -> &str {
        "newsnow"
    }

    async fn fetch(&self, platform: &PlatformSpec) -> Result<Vec<HotItem>, FetchError> {
        let url = self.platform_url(platform);
        tracing::debug!(platform = %platform.id, url = %url, "fetching hot list");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.text().await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Json(e.to_string()))?;

        if let Some(s) = payload.get("status").and_then(|v| v.as_str()) {
            tracing::debug!(platform = %platform.id, status = s, "upstream status");
        }
        parse_payload(&payload, platform.limit)
    }
}

/// 从 API 响应中提取前 `limit` 条热点
///
/// 排名取原始位置（从 1 开始），缺少标题或链接的条目被丢弃但不占用后续排名。
/// `url` 缺失或为空字符串时改用 `mobileUrl`。
pub fn parse_payload(payload: &Value, limit: usize) -> Result<Vec<HotItem>, FetchError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| FetchError::UnexpectedShape("response is not a JSON object".to_string()))?;

    let list = match obj.get("data").or_else(|| obj.get("items")) {
        Some(Value::Array(list)) => list.as_slice(),
        Some(other) => {
            return Err(FetchError::UnexpectedShape(format!(
                "item list is not an array: {}",
                type_name(other)
            )))
        }
        None => &[],
    };

    let items = list
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, entry)| {
            let title = strip_html(&field_text(entry.get("title")).unwrap_or_default());
            let url = field_text(entry.get("url"))
                .filter(|u| !u.is_empty())
                .or_else(|| field_text(entry.get("mobileUrl")))
                .unwrap_or_default();
            if title.is_empty() || url.is_empty() {
                return None;
            }
            let raw_hot = truthy_text(entry.get("hot"))
                .or_else(|| truthy_text(entry.get("extra").and_then(|e| e.get("hot"))))
                .unwrap_or_default();
            Some(HotItem {
                rank: i + 1,
                title,
                url: url.trim().to_string(),
                hot: format_hot(&raw_hot),
            })
        })
        .collect();

    Ok(items)
}

/// 字符串或数字字段转为文本
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 同 [`field_text`]，但空串与 0 视为缺失
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        v => field_text(Some(v)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weibo() -> PlatformSpec {
        PlatformSpec::new("weibo", "微博", "📛", "#ff4d4f", 3)
    }

    fn source_for(server: &mockito::ServerGuard) -> NewsNowSource {
        let config = FetchSection {
            api_url: format!("{}/api/s", server.url()),
            ..FetchSection::default()
        };
        NewsNowSource::new(&config).unwrap()
    }

    #[test]
    fn test_parse_payload_items_key() {
        let payload = json!({
            "status": "success",
            "items": [
                {"title": "<em>第一</em>", "url": "https://a/1", "extra": {"hot": "12345"}},
                {"title": "第二", "mobileUrl": "https://m/2", "hot": 4321},
                {"title": "第三", "url": "https://a/3"},
                {"title": "第四", "url": "https://a/4"}
            ]
        });
        let items = parse_payload(&payload, 3).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "第一");
        assert_eq!(items[0].hot, "1万");
        assert_eq!(items[1].url, "https://m/2");
        assert_eq!(items[1].hot, "4,321");
        assert_eq!(items[2].rank, 3);
        assert!(!items[2].has_hot());
    }

    #[test]
    fn test_parse_payload_prefers_data_key() {
        let payload = json!({
            "data": [{"title": "来自 data", "url": "https://d/1"}],
            "items": [{"title": "来自 items", "url": "https://i/1"}]
        });
        let items = parse_payload(&payload, 10).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "来自 data");
    }

    #[test]
    fn test_parse_payload_drops_incomplete_entries_keeping_rank() {
        let payload = json!({
            "items": [
                {"title": "", "url": "https://a/1"},
                {"title": "无链接"},
                {"title": "有效", "url": "", "mobileUrl": "https://m/3"}
            ]
        });
        let items = parse_payload(&payload, 10).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].rank, 3);
        assert_eq!(items[0].url, "https://m/3");
    }

    #[test]
    fn test_parse_payload_missing_list_is_empty() {
        let items = parse_payload(&json!({"status": "cache"}), 10).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_payload_rejects_bad_shape() {
        assert!(matches!(
            parse_payload(&json!([1, 2, 3]), 10),
            Err(FetchError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_payload(&json!({"items": "oops"}), 10),
            Err(FetchError::UnexpectedShape(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sends_platform_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/s")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "weibo".into()))
            .match_header("referer", "https://newsnow.busiyi.world/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items":[{"title":"热搜","url":"https://s.weibo.com/1","extra":{"hot":"200000000"}}]}"#)
            .create_async()
            .await;

        let items = source_for(&server).fetch(&weibo()).await.unwrap();
        mock.assert_async().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].hot, "2.0亿");
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/s")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = source_for(&server).fetch(&weibo()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 503));
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/s")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>blocked</html>")
            .create_async()
            .await;

        let err = source_for(&server).fetch(&weibo()).await.unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out_on_silent_server() {
        // 接受连接但从不响应
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let source = NewsNowSource::new(&FetchSection {
            api_url: format!("http://{}/api/s", addr),
            timeout_secs: 1,
            ..FetchSection::default()
        })
        .unwrap();

        let err = source.fetch(&weibo()).await.unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {err}");

        // 调度层把超时当作该平台无数据
        let scheduler = crate::core::TaskScheduler::new(1);
        let result = scheduler.fetch_one(&source, &weibo()).await;
        assert_eq!(result.platform.id, "weibo");
        assert!(result.is_empty());

        silent.abort();
    }
}
