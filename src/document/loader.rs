//! ECU 文档文件加载与写回
//!
//! 每个 ECU 对应一对文件：数据/请求文档 `<name>.json` 与
//! 界面布局文档 `<name>.json.layout`。翻译结果写到
//! `<name>_translated.json` / `<name>_translated.json.layout`，
//! 原始文件永不改写。

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::document::model::{EcuDocument, LayoutDocument};
use crate::translation::error::{TranslationError, TranslationResult};

/// 一个 ECU 的文件组：输入/输出路径的唯一真相来源
#[derive(Debug, Clone, PartialEq)]
pub struct EcuFileSet {
    /// 去掉 `.json` 及其后缀的基础路径
    base: PathBuf,
}

impl EcuFileSet {
    /// 从用户给的输入路径推导文件组
    ///
    /// 基础路径取首个 `.json` 之前的部分，因此
    /// `uch.json`、`uch.json.layout` 乃至裸 `uch` 都指向同一组文件。
    pub fn from_input(input: &Path) -> Self {
        let raw = input.to_string_lossy();
        let base = match raw.find(".json") {
            Some(pos) => PathBuf::from(&raw[..pos]),
            None => input.to_path_buf(),
        };
        Self { base }
    }

    /// 数据/请求文档输入路径
    pub fn data_path(&self) -> PathBuf {
        with_suffix(&self.base, ".json")
    }

    /// 布局文档输入路径
    pub fn layout_path(&self) -> PathBuf {
        with_suffix(&self.base, ".json.layout")
    }

    /// 翻译后数据文档输出路径（在输入文件名后追加 `_translated`）
    pub fn translated_data_path(&self) -> PathBuf {
        with_suffix(&self.base, ".json_translated")
    }

    /// 翻译后布局文档输出路径
    pub fn translated_layout_path(&self) -> PathBuf {
        with_suffix(&self.base, ".json.layout_translated")
    }

    /// 读取并解析两份输入文档
    pub fn load(&self) -> TranslationResult<(EcuDocument, LayoutDocument)> {
        let data = load_json(&self.data_path())?;
        let layout = load_json(&self.layout_path())?;
        Ok((data, layout))
    }

    /// 写出两份翻译后的文档
    ///
    /// 只应在整个翻译流程成功后调用；任一文件写失败即上抛存储错误。
    pub fn save(&self, data: &EcuDocument, layout: &LayoutDocument) -> TranslationResult<()> {
        save_json(&self.translated_data_path(), data)?;
        save_json(&self.translated_layout_path(), layout)?;
        Ok(())
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw = base.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> TranslationResult<T> {
    let file = File::open(path)
        .map_err(|e| TranslationError::Storage(format!("打开 {} 失败: {}", path.display(), e)))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| TranslationError::Schema(format!("解析 {} 失败: {}", path.display(), e)))
}

/// 以 1 空格缩进写出 JSON 文档
fn save_json<T: Serialize>(path: &Path, value: &T) -> TranslationResult<()> {
    let file = File::create(path)
        .map_err(|e| TranslationError::Storage(format!("创建 {} 失败: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| TranslationError::Storage(format!("写出 {} 失败: {}", path.display(), e)))?;

    writer
        .flush()
        .map_err(|e| TranslationError::Storage(format!("写出 {} 失败: {}", path.display(), e)))?;

    tracing::debug!("已写出 {}", path.display());
    Ok(())
}
