//! # DDT Translate
//!
//! 翻译 DDT ECU 诊断数据库文件的命令行工具库。
//! 读入一对文档（数据/请求 `<name>.json` 与界面布局 `<name>.json.layout`），
//! 把其中的法语字符串经远程翻译服务译成目标语言，
//! 并用逐条持久化的本地字典缓存保证同一字符串终生只翻译一次。
//!
//! ## 模块组织
//!
//! - `core` - 核心编排逻辑与运行摘要
//! - `document` - ECU 文档的解析、内存模型与写回
//! - `translation` - 字典缓存、远程服务、翻译引擎与文档遍历

pub mod core;
pub mod document;
pub mod translation;

// Re-export commonly used items for convenience
pub use crate::core::{translate_ecu_files, TranslateOptions, TranslationSummary};
pub use crate::document::{EcuDocument, EcuFileSet, LayoutDocument};
pub use crate::translation::{
    CachingTranslator, DictionaryCache, TranslationConfig, TranslationError, TranslationResult,
};
