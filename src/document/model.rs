//! ECU 文档内存模型
//!
//! 把两份 JSON 文档解析成带字段名校验的类型化结构。
//! 未被翻译流程触碰的字段通过 `#[serde(flatten)]` 原样携带，
//! 保证写回时不丢失任何结构。

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// 未建模字段的透传容器（`preserve_order` 下保持键序）
pub type ExtraFields = serde_json::Map<String, Value>;

// ============================================================================
// 有序映射
// ============================================================================

/// 保持插入顺序的字符串键映射
///
/// 文档里的 `data`、`categories`、`screens` 等区段的遍历顺序
/// 必须与输入文件一致，标准 HashMap 做不到，这里用键值对向量兜底。
/// 查找是 O(n)，但翻译热路径上的精确查找走的是字典缓存，不经过这里。
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> DocumentMap<V> {
    /// 创建空映射
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 插入键值对：键已存在则替换值（保留原位置），否则追加到末尾
    ///
    /// 插入同样是线性扫描，整段重建是 O(n²)；ECU 文档的区段
    /// 都在几百条以内，不在热路径上。
    pub fn insert(&mut self, key: String, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// 按键查找
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// 是否包含键
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// 按插入顺序可变遍历
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    /// 按插入顺序列出所有键
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<V> Default for DocumentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for DocumentMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V> FromIterator<(String, V)> for DocumentMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for DocumentMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for DocumentMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for DocumentMapVisitor<V> {
            type Value = DocumentMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(DocumentMap { entries })
            }
        }

        deserializer.deserialize_map(DocumentMapVisitor(PhantomData))
    }
}

// ============================================================================
// 数据/请求文档（<name>.json）
// ============================================================================

/// ECU 数据/请求文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcuDocument {
    /// ECU 名称（不参与翻译）
    #[serde(rename = "ecuname")]
    pub ecu_name: String,

    /// 诊断请求定义，保持文件中的顺序
    pub requests: Vec<Request>,

    /// 数据项定义，键为数据项名
    pub data: DocumentMap<DataEntry>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 诊断请求定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub name: String,

    /// 发送字节数据项：键为数据项名（参与翻译），值不被检查
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendbyte_dataitems: Option<DocumentMap<Value>>,

    /// 接收字节数据项，同上
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receivebyte_dataitems: Option<DocumentMap<Value>>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 数据项定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    /// 取值表：编码值 -> 人类可读标签（标签参与翻译，键不动）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<DocumentMap<Value>>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

// ============================================================================
// 界面布局文档（<name>.json.layout）
// ============================================================================

/// ECU 界面布局文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// 分类名 -> 所属屏幕名列表（列表顺序有意义）
    pub categories: DocumentMap<Vec<String>>,

    /// 屏幕名 -> 屏幕定义
    pub screens: DocumentMap<Screen>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 屏幕定义
///
/// 五个控件列表都是必需区段，缺失视为文档结构错误。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub inputs: Vec<Input>,
    pub labels: Vec<Label>,
    pub presend: Vec<Presend>,
    pub buttons: Vec<Button>,
    pub displays: Vec<Display>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 输入控件：显示文本 + 关联请求名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub text: String,
    pub request: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 纯文本标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 进入屏幕前自动发送的请求引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presend {
    #[serde(rename = "RequestName")]
    pub request_name: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 按钮控件：显示文本 + 点击时发送的请求引用列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub send: Vec<Send>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 按钮触发的单个请求引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Send {
    #[serde(rename = "RequestName")]
    pub request_name: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// 显示控件：显示文本 + 关联请求名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub text: String,
    pub request: String,

    #[serde(flatten)]
    pub extra: ExtraFields,
}
