//! 翻译配置管理模块
//!
//! 提供配置加载、验证和环境变量覆盖，支持文件配置和默认值

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译配置常量
pub mod constants {
    /// 默认源语言（原始 DDT 数据库以法语编写）
    pub const DEFAULT_SOURCE_LANG: &str = "fr";

    /// 默认翻译 API 主机
    pub const DEFAULT_API_HOST: &str = "translate.googleapis.com";

    /// 默认请求超时（秒）
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// 字典文件扩展名，文件名形如 `fr_en.dict`
    pub const DICT_EXTENSION: &str = "dict";

    /// 翻译结果中需要剔除的零宽空格
    pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

    /// `lists` 翻译排除名单。`"Jour"` 是星期/日历值表，
    /// 其取值是专有名词式的日名，必须原样保留。
    pub const EXCLUDED_LIST_NAMES: &[&str] = &["Jour"];

    /// 配置文件搜索路径（按顺序）
    pub const CONFIG_PATHS: &[&str] = &[
        "ddt-translate.toml",
        ".ddt-translate.toml",
        "~/.config/ddt-translate/config.toml",
    ];

    /// 环境变量前缀
    pub const ENV_PREFIX: &str = "DDT_TRANSLATE_";
}

/// 翻译配置
///
/// 优先级：命令行参数 > 环境变量 > 配置文件 > 默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// 源语言代码
    pub source_lang: String,

    /// 目标语言代码（通常由命令行提供）
    pub target_lang: String,

    /// 翻译 API 主机，可指向区域镜像（例如 `translate.google.pl`）
    pub api_host: String,

    /// 单次请求超时（秒）
    pub timeout_secs: u64,

    /// 字典缓存文件所在目录
    pub cache_dir: PathBuf,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: String::new(),
            api_host: constants::DEFAULT_API_HOST.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            cache_dir: PathBuf::from("."),
        }
    }
}

impl TranslationConfig {
    /// 加载配置
    ///
    /// 指定了 `explicit` 时只读取该文件（不存在即报错）；
    /// 否则沿 [`constants::CONFIG_PATHS`] 搜索，找不到则使用默认值。
    /// 最后套用环境变量覆盖。
    pub fn load(explicit: Option<&Path>) -> TranslationResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::from_search_paths()?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// 从指定 TOML 文件加载配置
    pub fn from_file(path: &Path) -> TranslationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslationError::Config(format!("读取配置文件 {} 失败: {}", path.display(), e))
        })?;
        let config = toml::from_str(&content)?;
        tracing::info!("加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 沿搜索路径查找配置文件
    fn from_search_paths() -> TranslationResult<Self> {
        for candidate in constants::CONFIG_PATHS {
            let expanded = shellexpand::tilde(candidate);
            let path = Path::new(expanded.as_ref());
            if path.exists() {
                return Self::from_file(path);
            }
        }
        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(env_key("SOURCE_LANG")) {
            self.source_lang = value;
        }
        if let Ok(value) = std::env::var(env_key("TARGET_LANG")) {
            self.target_lang = value;
        }
        if let Ok(value) = std::env::var(env_key("API_HOST")) {
            tracing::info!("环境变量覆盖 API 主机: {}", value);
            self.api_host = value;
        }
        if let Ok(value) = std::env::var(env_key("CACHE_DIR")) {
            self.cache_dir = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var(env_key("TIMEOUT_SECS")) {
            if let Ok(secs) = value.parse::<u64>() {
                self.timeout_secs = secs;
            } else {
                tracing::warn!("环境变量 {} 不是有效秒数: {}", env_key("TIMEOUT_SECS"), value);
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.source_lang.is_empty() {
            return Err(TranslationError::Config("源语言不能为空".to_string()));
        }
        if self.target_lang.is_empty() {
            return Err(TranslationError::Config(
                "目标语言不能为空（使用 --lang 指定）".to_string(),
            ));
        }
        if self.source_lang == self.target_lang {
            return Err(TranslationError::Config(format!(
                "源语言与目标语言相同: {}",
                self.source_lang
            )));
        }
        if self.timeout_secs == 0 {
            return Err(TranslationError::Config("请求超时不能为0".to_string()));
        }

        // 主机名必须能拼成合法 URL
        Url::parse(&format!("https://{}/", self.api_host))
            .map_err(|e| TranslationError::Config(format!("API 主机无效 {:?}: {}", self.api_host, e)))?;

        Ok(())
    }
}

fn env_key(name: &str) -> String {
    format!("{}{}", constants::ENV_PREFIX, name)
}
