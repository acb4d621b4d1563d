//! 缓存翻译引擎
//!
//! 组合字典缓存与远程服务：查缓存 → 未命中调服务 → 规整结果 →
//! 立即持久化。对同一字符串，整个缓存生命周期内至多一次远程调用。

use crate::translation::cache::DictionaryCache;
use crate::translation::config::constants;
use crate::translation::error::TranslationResult;
use crate::translation::service::TranslationService;

/// 缓存翻译器
///
/// 语言对在构造时绑定且终生不变。`translate` 是
/// （原文, 缓存状态）的纯函数：同一原文无论在文档的哪个位置出现，
/// 得到的译文必然一致——引用完整性就建立在这条性质上。
pub struct CachingTranslator {
    cache: DictionaryCache,
    service: Box<dyn TranslationService>,
    source_lang: String,
    target_lang: String,
    stats: TranslatorStats,
}

/// 翻译器统计信息
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslatorStats {
    /// 总请求数（不含空串/单空格的恒等映射）
    pub requests: usize,
    /// 缓存命中数
    pub cache_hits: usize,
    /// 实际远程调用数
    pub service_calls: usize,
}

impl TranslatorStats {
    /// 缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.requests as f64
        }
    }
}

impl CachingTranslator {
    /// 创建翻译器。缓存必须与给定语言对一致。
    pub fn new(
        cache: DictionaryCache,
        service: Box<dyn TranslationService>,
        source_lang: &str,
        target_lang: &str,
    ) -> Self {
        Self {
            cache,
            service,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            stats: TranslatorStats::default(),
        }
    }

    /// 翻译一段文本
    ///
    /// 空串与单空格直接返回自身，不触碰缓存也不调服务。
    /// 服务失败时错误原样上抛：不重试、不缓存，已持久化的条目不受影响。
    pub fn translate(&mut self, text: &str) -> TranslationResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        if text == " " {
            return Ok(" ".to_string());
        }

        self.stats.requests += 1;

        if let Some(cached) = self.cache.lookup(text) {
            self.stats.cache_hits += 1;
            return Ok(cached.to_string());
        }

        let raw = self
            .service
            .translate(text, &self.source_lang, &self.target_lang)?;
        let translated = strip_zero_width(&raw);

        // 审计行：原文与译文并排，方便人工抽查
        tracing::info!("\"{}\" 翻译为 \"{}\"", text, translated);

        self.cache.append(text, &translated)?;
        self.stats.service_calls += 1;

        Ok(translated)
    }

    /// 统计信息快照
    pub fn stats(&self) -> TranslatorStats {
        self.stats
    }

    /// 底层字典缓存
    pub fn cache(&self) -> &DictionaryCache {
        &self.cache
    }
}

/// 剔除零宽空格（U+200B）
///
/// 翻译接口偶尔会在词边界塞入零宽空格，落入字典前必须清掉。
fn strip_zero_width(text: &str) -> String {
    if text.contains(constants::ZERO_WIDTH_SPACE) {
        text.chars()
            .filter(|&c| c != constants::ZERO_WIDTH_SPACE)
            .collect()
    } else {
        text.to_string()
    }
}
