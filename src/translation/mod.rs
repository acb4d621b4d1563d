//! 翻译模块
//!
//! 提供完整的缓存翻译能力，采用清晰的模块化架构：
//! - **cache**: 语言对字典缓存与持久化
//! - **service**: 远程翻译服务适配器
//! - **engine**: 缓存翻译引擎
//! - **walker**: 文档遍历翻译
//! - **config**: 配置管理
//! - **error**: 错误处理

// ============================================================================
// 子模块声明
// ============================================================================

/// 字典缓存模块 - 语言对字典的载入、查找与追加持久化
pub mod cache;

/// 配置管理模块 - 配置文件、环境变量覆盖与常量
pub mod config;

/// 缓存翻译引擎模块 - 组合缓存与远程服务的翻译器
pub mod engine;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 远程服务模块 - 翻译服务边界与 HTTP 实现
pub mod service;

/// 文档遍历模块 - 按区段顺序翻译整份文档
pub mod walker;

// ============================================================================
// 常用类型重导出
// ============================================================================

pub use cache::{dict_path, DictionaryCache};
pub use config::TranslationConfig;
pub use engine::{CachingTranslator, TranslatorStats};
pub use error::{TranslationError, TranslationResult};
pub use service::{GoogleWebService, TranslationService};
pub use walker::TranslationWalker;
