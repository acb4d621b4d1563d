//! 翻译字典缓存
//!
//! 每个语言对一份持久化字典文件（如 `fr_en.dict`），启动时全量载入内存，
//! 每翻译一条立即追加写盘。这样中途崩溃最多丢失正在翻译的那一条，
//! 之前的成果重跑时全部命中缓存。
//!
//! 磁盘格式与旧版 Python 工具产出的字典文件逐字节兼容：
//! windows-1252（latin1）编码的 CSV，每行 `原文,译文`，CRLF 行尾。

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;

use crate::translation::config::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 持久化字典缓存
///
/// 不变量：`entries` 中的每个键都至少成功翻译过一次，条目永不淘汰。
/// `order` 记录首次插入顺序，全量重写时按此顺序落盘以保持 diff 最小。
#[derive(Debug)]
pub struct DictionaryCache {
    path: PathBuf,
    source_lang: String,
    target_lang: String,
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl DictionaryCache {
    /// 打开（或创建）语言对对应的字典文件并全量载入
    ///
    /// 文件不存在视为空缓存并创建空文件；文件无法读取或内容损坏
    /// 返回 [`TranslationError::Storage`]。
    pub fn open(dir: &Path, source_lang: &str, target_lang: &str) -> TranslationResult<Self> {
        let path = dict_path(dir, source_lang, target_lang);

        let mut cache = Self {
            path: path.clone(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            entries: HashMap::new(),
            order: Vec::new(),
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                File::create(&path).map_err(|e| {
                    TranslationError::Storage(format!(
                        "创建字典文件 {} 失败: {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::info!("字典文件不存在，已创建空字典: {}", path.display());
                return Ok(cache);
            }
            Err(e) => {
                return Err(TranslationError::Storage(format!(
                    "读取字典文件 {} 失败: {}",
                    path.display(),
                    e
                )));
            }
        };

        // windows-1252 是单字节编码，任何字节序列都能解码
        let (text, _, _) = WINDOWS_1252.decode(&bytes);
        let rows = parse_csv(&text).map_err(|e| {
            TranslationError::Storage(format!("字典文件 {} 已损坏: {}", path.display(), e))
        })?;

        for (key, value) in rows {
            cache.insert_in_memory(key, value);
        }

        tracing::info!(
            "已载入字典 {}: {} 条 ({} -> {})",
            path.display(),
            cache.entries.len(),
            source_lang,
            target_lang
        );

        Ok(cache)
    }

    /// 精确查找。未命中返回 `None`，不是错误。
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    /// 追加一条翻译：写入内存并立即持久化该条（不重写整个文件）
    pub fn append(&mut self, text: &str, translated: &str) -> TranslationResult<()> {
        let row = encode_row(text, translated)?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| {
                TranslationError::Storage(format!(
                    "打开字典文件 {} 追加失败: {}",
                    self.path.display(),
                    e
                ))
            })?;
        file.write_all(&row).map_err(|e| {
            TranslationError::Storage(format!("写入字典文件 {} 失败: {}", self.path.display(), e))
        })?;

        self.insert_in_memory(text.to_string(), translated.to_string());
        Ok(())
    }

    /// 全量重写字典文件（压实用，非正确性必需）
    ///
    /// 按首次插入顺序写出全部条目。
    pub fn rewrite_all(&self) -> TranslationResult<()> {
        let mut buffer = Vec::new();
        for key in &self.order {
            if let Some(value) = self.entries.get(key) {
                buffer.extend_from_slice(&encode_row(key, value)?);
            }
        }
        std::fs::write(&self.path, buffer).map_err(|e| {
            TranslationError::Storage(format!("重写字典文件 {} 失败: {}", self.path.display(), e))
        })?;
        tracing::info!("字典已压实重写: {} 条", self.order.len());
        Ok(())
    }

    /// 缓存条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按首次插入顺序遍历所有条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get_key_value(key))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 字典文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 绑定的源语言
    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// 绑定的目标语言
    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    fn insert_in_memory(&mut self, key: String, value: String) {
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(key, value);
    }
}

/// 由缓存目录和语言对推导字典文件路径
pub fn dict_path(dir: &Path, source_lang: &str, target_lang: &str) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        source_lang,
        target_lang,
        constants::DICT_EXTENSION
    ))
}

// ============================================================================
// CSV 编解码
// ============================================================================

/// 把一对条目编码为一行 latin1 CSV（CRLF 行尾）
///
/// 含逗号、引号或换行的字段加引号，内部引号写成 `""`，
/// 与 Python csv 模块的默认方言一致。
fn encode_row(key: &str, value: &str) -> TranslationResult<Vec<u8>> {
    let line = format!("{},{}\r\n", escape_field(key), escape_field(value));
    let (bytes, _, had_unmappable) = WINDOWS_1252.encode(&line);
    if had_unmappable {
        return Err(TranslationError::Storage(format!(
            "文本无法以 latin1 编码存入字典: {:?}",
            line.trim_end()
        )));
    }
    Ok(bytes.into_owned())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 解析整个字典文件为 (原文, 译文) 对
///
/// 空行跳过；字段数不是 2 或引号未闭合视为文件损坏。
fn parse_csv(text: &str) -> Result<Vec<(String, String)>, String> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    loop {
        let c = match chars.next() {
            Some(c) => c,
            None => {
                if in_quotes {
                    return Err("引号未闭合".to_string());
                }
                if !field.is_empty() || !row.is_empty() {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                break;
            }
        };

        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if field.is_empty() && row.is_empty() {
                    continue; // 空行
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            other => field.push(other),
        }
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, mut fields)| {
            if fields.len() != 2 {
                return Err(format!("第 {} 行有 {} 个字段，期望 2 个", i + 1, fields.len()));
            }
            let value = fields.pop().unwrap_or_default();
            let key = fields.pop().unwrap_or_default();
            Ok((key, value))
        })
        .collect()
}
