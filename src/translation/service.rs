//! 远程翻译服务适配器
//!
//! 把不可靠的远程翻译后端收敛成一个同步调用：
//! `translate(text, source, target) -> String`。
//! 失败不重试、不缓存，由调用方决定中止策略。

use std::time::Duration;

use serde_json::Value;

use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译服务边界
///
/// 生产实现走 HTTP，测试用确定性桩实现替换。
pub trait TranslationService {
    /// 翻译一段文本。任何传输、配额或响应格式问题返回
    /// [`TranslationError::Service`]。
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String>;
}

/// Google 网页翻译端点客户端
///
/// 访问 `translate_a/single?client=gtx` 接口，主机可配置，
/// 便于切换到区域镜像分摊配额。
pub struct GoogleWebService {
    http: reqwest::blocking::Client,
    host: String,
}

impl GoogleWebService {
    /// 创建客户端，绑定 API 主机与请求超时
    pub fn new(host: &str, timeout: Duration) -> TranslationResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::Service(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            http,
            host: host.to_string(),
        })
    }
}

impl TranslationService for GoogleWebService {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        let url = format!("https://{}/translate_a/single", self.host);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .map_err(|e| TranslationError::Service(format!("请求 {} 失败: {}", self.host, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Service(format!(
                "翻译接口返回 {}: {}",
                status,
                response.text().unwrap_or_default().chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .map_err(|e| TranslationError::Service(format!("读取响应失败: {}", e)))?;

        parse_gtx_response(&body)
    }
}

/// 解析 gtx 端点的嵌套数组响应
///
/// 响应形如 `[[["译文段1","原文段1",...],["译文段2",...]], ...]`，
/// 把 `[0][i][0]` 的各段拼接成完整译文。
fn parse_gtx_response(body: &str) -> TranslationResult<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TranslationError::Service(format!("响应不是合法 JSON: {}", e)))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Service("响应缺少译文段数组".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }

    if translated.is_empty() {
        return Err(TranslationError::Service("响应不含任何译文".to_string()));
    }

    Ok(translated)
}
