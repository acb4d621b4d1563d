//! 核心编排逻辑
//!
//! 把一次完整的翻译跑通：读入文档 → 打开字典缓存 → 构建翻译器 →
//! 遍历翻译 → 全部成功后写出结果文件。

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::EcuFileSet;
use crate::translation::cache::DictionaryCache;
use crate::translation::engine::CachingTranslator;
use crate::translation::service::GoogleWebService;
use crate::translation::walker::TranslationWalker;
use crate::translation::TranslationResult;

/// 一次翻译运行的全部选项
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// 输入文件（`<name>.json` / `<name>.json.layout` 任一拼写）
    pub input_file: PathBuf,
    /// 源语言代码
    pub source_lang: String,
    /// 目标语言代码
    pub target_lang: String,
    /// 翻译 API 主机
    pub api_host: String,
    /// 字典缓存目录
    pub cache_dir: PathBuf,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

/// 一次翻译运行的结果摘要
#[derive(Debug, Clone, Copy)]
pub struct TranslationSummary {
    /// 处理的字符串总数（不含空串/单空格）
    pub translated_strings: usize,
    /// 缓存命中数
    pub cache_hits: usize,
    /// 实际远程调用数
    pub service_calls: usize,
    /// 总耗时
    pub elapsed: Duration,
}

/// 翻译一对 ECU 文档并写出结果
///
/// 输出文件只在整个遍历成功后写出；中途失败不会留下半成品文档，
/// 但已翻译的条目都已持久化在字典里，重跑零重复劳动。
pub fn translate_ecu_files(options: &TranslateOptions) -> TranslationResult<TranslationSummary> {
    let started = Instant::now();

    let files = EcuFileSet::from_input(&options.input_file);
    tracing::info!(
        "开始翻译 {} ({} -> {})",
        files.data_path().display(),
        options.source_lang,
        options.target_lang
    );

    let (mut data_doc, mut layout_doc) = files.load()?;

    let cache = DictionaryCache::open(
        &options.cache_dir,
        &options.source_lang,
        &options.target_lang,
    )?;
    let service = GoogleWebService::new(
        &options.api_host,
        Duration::from_secs(options.timeout_secs),
    )?;
    let mut translator = CachingTranslator::new(
        cache,
        Box::new(service),
        &options.source_lang,
        &options.target_lang,
    );

    TranslationWalker::new(&mut translator).walk(&mut data_doc, &mut layout_doc)?;

    tracing::info!("保存翻译结果...");
    files.save(&data_doc, &layout_doc)?;
    tracing::info!(
        "已写出 {} 与 {}",
        files.translated_data_path().display(),
        files.translated_layout_path().display()
    );

    let stats = translator.stats();
    Ok(TranslationSummary {
        translated_strings: stats.requests,
        cache_hits: stats.cache_hits,
        service_calls: stats.service_calls,
        elapsed: started.elapsed(),
    })
}
