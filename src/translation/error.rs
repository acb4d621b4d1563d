//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误传播策略

use thiserror::Error;

/// 翻译错误类型
///
/// 四类错误对应四种中止语义：
/// - `Storage` / `Schema`：立即中止，不写出任何文档
/// - `Service`：中止当前运行，但已持久化的缓存条目保持有效
/// - `Config`：启动阶段中止
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 缓存存储错误（文件不存在不算错误，表示空缓存）
    #[error("缓存存储错误: {0}")]
    Storage(String),

    /// 翻译服务错误（网络、配额、响应格式）
    #[error("翻译服务错误: {0}")]
    Service(String),

    /// 文档结构错误（缺少必需的区段或字段）
    #[error("文档结构错误: {0}")]
    Schema(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl TranslationError {
    /// 检查错误是否可通过重新运行恢复
    ///
    /// 服务错误重跑即可续传（已翻译的字符串都在缓存里）；
    /// 存储、结构和配置错误需要人工干预。
    pub fn is_retryable(&self) -> bool {
        matches!(self, TranslationError::Service(_))
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::Storage(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::Schema(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::Config(format!("TOML解析错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::Service(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
