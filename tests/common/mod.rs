// 集成测试公共模块
//
// 提供桩翻译服务与样例 ECU 文件生成

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::json;

use ddt_translate::translation::error::{TranslationError, TranslationResult};
use ddt_translate::translation::service::TranslationService;

/// 确定性桩服务：按词表应答并记录每次调用
pub struct MockTranslationService {
    answers: HashMap<String, String>,
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl MockTranslationService {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    // 各测试二进制只用到部分辅助项，闲置的不必告警
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TranslationService for MockTranslationService {
    fn translate(&self, text: &str, _s: &str, _t: &str) -> TranslationResult<String> {
        self.calls.borrow_mut().push(text.to_string());
        match self.answers.get(text) {
            Some(answer) => Ok(answer.clone()),
            None => Ok(format!("<{}>", text)),
        }
    }
}

/// 前 N 次成功、之后一律失败的桩服务（模拟配额耗尽/断网）
#[allow(dead_code)]
pub struct FailingService {
    inner: MockTranslationService,
    succeed_first: usize,
}

#[allow(dead_code)]
impl FailingService {
    pub fn new(pairs: &[(&str, &str)], succeed_first: usize) -> Self {
        Self {
            inner: MockTranslationService::new(pairs),
            succeed_first,
        }
    }
}

impl TranslationService for FailingService {
    fn translate(&self, text: &str, s: &str, t: &str) -> TranslationResult<String> {
        if self.inner.call_count() >= self.succeed_first {
            self.inner.calls.borrow_mut().push(text.to_string());
            return Err(TranslationError::Service("service quota exceeded".to_string()));
        }
        self.inner.translate(text, s, t)
    }
}

/// 在目录下写出一对样例 ECU 文件，返回数据文档路径
#[allow(dead_code)]
pub fn write_sample_ecu(dir: &Path) -> PathBuf {
    let data_path = dir.join("uch.json");
    let layout_path = dir.join("uch.json.layout");

    let data = json!({
        "ecuname": "UCH_84_J84_02_44",
        "obd": { "protocol": "CAN" },
        "requests": [
            {
                "name": "Lecture tension",
                "bytes": "21 01",
                "receivebyte_dataitems": { "Tension": { "firstbyte": 3 } }
            },
            {
                "name": "Effacement defauts",
                "bytes": "14 FF"
            }
        ],
        "data": {
            "Moteur": { "bitscount": 8, "lists": { "1": "Oui", "2": "Non" } },
            "Jour": { "lists": { "1": "Lundi", "2": "Mardi" } },
            "Tension": { "bitscount": 16 }
        }
    });

    let layout = json!({
        "categories": { "Mesures": ["Ecran tension"] },
        "screens": {
            "Ecran tension": {
                "width": 400,
                "inputs": [ { "text": "Seuil", "request": "Lecture tension" } ],
                "labels": [ { "text": "Tension batterie" } ],
                "presend": [ { "RequestName": "Lecture tension" } ],
                "buttons": [
                    { "text": "Effacer", "send": [ { "RequestName": "Effacement defauts" } ] }
                ],
                "displays": [ { "text": "Tension", "request": "Lecture tension" } ]
            }
        }
    });

    fs::write(&data_path, serde_json::to_string_pretty(&data).unwrap()).unwrap();
    fs::write(&layout_path, serde_json::to_string_pretty(&layout).unwrap()).unwrap();
    data_path
}

/// 样例文件的完整译文词表
#[allow(dead_code)]
pub fn sample_glossary() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Moteur", "Engine"),
        ("Oui", "Yes"),
        ("Non", "No"),
        ("Jour", "Day"),
        ("Tension", "Voltage"),
        ("Lecture tension", "Voltage reading"),
        ("Effacement defauts", "Fault clearing"),
        ("Mesures", "Measurements"),
        ("Ecran tension", "Voltage screen"),
        ("Seuil", "Threshold"),
        ("Tension batterie", "Battery voltage"),
        ("Effacer", "Clear"),
    ]
}
