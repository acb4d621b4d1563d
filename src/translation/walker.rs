//! 文档遍历翻译器
//!
//! 按固定顺序走遍两份文档中所有可翻译字符串：
//! data → requests → categories → screens。
//! 引用字段（input/display 的 `request`、presend/send 的 `RequestName`）
//! 不做显式重命名映射：它们携带的就是请求的原名，
//! 对同一原文再次调用翻译器必然命中缓存，得到与请求名完全一致的译文。

use std::mem;

use crate::document::model::{DocumentMap, EcuDocument, LayoutDocument};
use crate::translation::config::constants;
use crate::translation::engine::CachingTranslator;
use crate::translation::error::{TranslationError, TranslationResult};

/// 文档遍历器
///
/// 借用一个翻译器，把它依次推过文档的四个区段。
/// 遍历过程中任何错误立即中止：文档此时可能已部分改写，
/// 调用方不得保存，但缓存里已落盘的条目全部有效。
pub struct TranslationWalker<'a> {
    translator: &'a mut CachingTranslator,
}

impl<'a> TranslationWalker<'a> {
    pub fn new(translator: &'a mut CachingTranslator) -> Self {
        Self { translator }
    }

    /// 翻译两份文档的全部区段
    pub fn walk(
        &mut self,
        data_doc: &mut EcuDocument,
        layout_doc: &mut LayoutDocument,
    ) -> TranslationResult<()> {
        self.walk_data(data_doc)?;
        self.walk_requests(data_doc)?;
        self.walk_categories(layout_doc)?;
        self.walk_screens(layout_doc)?;
        Ok(())
    }

    /// data 区段：数据项名 + 取值表标签
    fn walk_data(&mut self, doc: &mut EcuDocument) -> TranslationResult<()> {
        tracing::info!("翻译 data 区段: {} 项", doc.data.len());
        let total = doc.data.len();

        let mut translated = DocumentMap::new();
        for (index, (name, mut entry)) in mem::take(&mut doc.data).into_iter().enumerate() {
            log_progress(index, total);

            let new_name = self.translator.translate(&name)?;

            // 取值表标签翻译，键（编码值）不动；排除名单里的表原样保留
            if !constants::EXCLUDED_LIST_NAMES.contains(&name.as_str()) {
                if let Some(lists) = entry.lists.take() {
                    let mut new_lists = DocumentMap::new();
                    for (code, label) in lists {
                        let text = label.as_str().ok_or_else(|| {
                            TranslationError::Schema(format!(
                                "数据项 {:?} 的取值表 {:?} 不是字符串",
                                name, code
                            ))
                        })?;
                        let new_label = self.translator.translate(text)?;
                        new_lists.insert(code, serde_json::Value::String(new_label));
                    }
                    entry.lists = Some(new_lists);
                }
            }

            translated.insert(new_name, entry);
        }
        doc.data = translated;

        tracing::info!("data 区段翻译完成");
        Ok(())
    }

    /// requests 区段：请求名 + 收发字节数据项的键
    fn walk_requests(&mut self, doc: &mut EcuDocument) -> TranslationResult<()> {
        tracing::info!("翻译 requests 区段: {} 项", doc.requests.len());
        let total = doc.requests.len();

        for (index, request) in doc.requests.iter_mut().enumerate() {
            log_progress(index, total);

            let new_name = self.translator.translate(&request.name)?;
            request.name = new_name;

            if let Some(items) = request.sendbyte_dataitems.take() {
                request.sendbyte_dataitems = Some(self.translate_keys(items)?);
            }
            if let Some(items) = request.receivebyte_dataitems.take() {
                request.receivebyte_dataitems = Some(self.translate_keys(items)?);
            }
        }

        tracing::info!("requests 区段翻译完成");
        Ok(())
    }

    /// categories 区段：分类名 + 其屏幕名列表
    fn walk_categories(&mut self, doc: &mut LayoutDocument) -> TranslationResult<()> {
        tracing::info!("翻译 categories 区段: {} 项", doc.categories.len());
        let total = doc.categories.len();

        let mut translated = DocumentMap::new();
        for (index, (name, mut screens)) in
            mem::take(&mut doc.categories).into_iter().enumerate()
        {
            log_progress(index, total);

            let new_name = self.translator.translate(&name)?;
            for screen_name in screens.iter_mut() {
                let new_screen_name = self.translator.translate(screen_name)?;
                *screen_name = new_screen_name;
            }
            translated.insert(new_name, screens);
        }
        doc.categories = translated;

        tracing::info!("categories 区段翻译完成");
        Ok(())
    }

    /// screens 区段：屏幕名 + 五类控件的文本与请求引用
    fn walk_screens(&mut self, doc: &mut LayoutDocument) -> TranslationResult<()> {
        tracing::info!("翻译 screens 区段: {} 项", doc.screens.len());
        let total = doc.screens.len();

        let mut translated = DocumentMap::new();
        for (index, (name, mut screen)) in mem::take(&mut doc.screens).into_iter().enumerate() {
            log_progress(index, total);

            let new_name = self.translator.translate(&name)?;

            for input in screen.inputs.iter_mut() {
                input.text = self.translator.translate(&input.text)?;
                input.request = self.translator.translate(&input.request)?;
            }
            for label in screen.labels.iter_mut() {
                label.text = self.translator.translate(&label.text)?;
            }
            for presend in screen.presend.iter_mut() {
                presend.request_name = self.translator.translate(&presend.request_name)?;
            }
            for button in screen.buttons.iter_mut() {
                button.text = self.translator.translate(&button.text)?;
                for send in button.send.iter_mut() {
                    send.request_name = self.translator.translate(&send.request_name)?;
                }
            }
            for display in screen.displays.iter_mut() {
                display.text = self.translator.translate(&display.text)?;
                display.request = self.translator.translate(&display.request)?;
            }

            translated.insert(new_name, screen);
        }
        doc.screens = translated;

        tracing::info!("screens 区段翻译完成");
        Ok(())
    }

    /// 收发字节数据项：键（数据项名）翻译，值原样搬运
    fn translate_keys(
        &mut self,
        items: DocumentMap<serde_json::Value>,
    ) -> TranslationResult<DocumentMap<serde_json::Value>> {
        let mut translated = DocumentMap::new();
        for (key, value) in items {
            let new_key = self.translator.translate(&key)?;
            translated.insert(new_key, value);
        }
        Ok(translated)
    }
}

/// 单条进度行，分母为翻译前的条目数
fn log_progress(index: usize, total: usize) {
    if total == 0 {
        return;
    }
    let done = index + 1;
    tracing::info!("{:.0}% \t {}/{}", done as f64 / total as f64 * 100.0, done, total);
}
