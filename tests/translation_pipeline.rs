//! 翻译管道集成测试
//!
//! 从磁盘文件到磁盘文件跑通整个翻译流程

use serde_json::{json, Value};
use tempfile::TempDir;

use ddt_translate::document::EcuFileSet;
use ddt_translate::translation::cache::DictionaryCache;
use ddt_translate::translation::engine::CachingTranslator;
use ddt_translate::translation::walker::TranslationWalker;

mod common {
    include!("common/mod.rs");
}

use common::{sample_glossary, write_sample_ecu, MockTranslationService};

fn run_pipeline(dir: &TempDir, service: MockTranslationService) -> EcuFileSet {
    let input = write_sample_ecu(dir.path());
    let files = EcuFileSet::from_input(&input);
    let (mut data_doc, mut layout_doc) = files.load().expect("load sample documents");

    let cache = DictionaryCache::open(dir.path(), "fr", "en").expect("open cache");
    let mut translator = CachingTranslator::new(cache, Box::new(service), "fr", "en");
    TranslationWalker::new(&mut translator)
        .walk(&mut data_doc, &mut layout_doc)
        .expect("walk documents");

    files.save(&data_doc, &layout_doc).expect("save outputs");
    files
}

/// 端到端：输出文件内容与引用完整性
#[test]
fn test_full_pipeline_produces_translated_files() {
    let dir = TempDir::new().unwrap();
    let files = run_pipeline(&dir, MockTranslationService::new(&sample_glossary()));

    let data: Value =
        serde_json::from_str(&std::fs::read_to_string(files.translated_data_path()).unwrap())
            .unwrap();
    let layout: Value =
        serde_json::from_str(&std::fs::read_to_string(files.translated_layout_path()).unwrap())
            .unwrap();

    // data 区段：名字翻译、取值表翻译、未建模字段保留
    assert_eq!(data["ecuname"], "UCH_84_J84_02_44");
    assert_eq!(data["data"]["Engine"]["lists"]["1"], "Yes");
    assert_eq!(data["data"]["Engine"]["lists"]["2"], "No");
    assert_eq!(data["data"]["Engine"]["bitscount"], 8);
    assert_eq!(data["obd"]["protocol"], "CAN");

    // "Jour" 排除规则：取值表逐字保留
    assert_eq!(data["data"]["Day"]["lists"]["1"], "Lundi");
    assert_eq!(data["data"]["Day"]["lists"]["2"], "Mardi");

    // requests 区段：名字与数据项键翻译，值原样
    assert_eq!(data["requests"][0]["name"], "Voltage reading");
    assert_eq!(data["requests"][0]["bytes"], "21 01");
    assert_eq!(
        data["requests"][0]["receivebyte_dataitems"]["Voltage"]["firstbyte"],
        3
    );

    // 引用完整性：所有引用字段与请求译名一致
    let screen = &layout["screens"]["Voltage screen"];
    assert_eq!(screen["inputs"][0]["request"], "Voltage reading");
    assert_eq!(screen["presend"][0]["RequestName"], "Voltage reading");
    assert_eq!(screen["buttons"][0]["send"][0]["RequestName"], "Fault clearing");
    assert_eq!(screen["displays"][0]["request"], "Voltage reading");
    assert_eq!(layout["categories"]["Measurements"][0], "Voltage screen");
    assert_eq!(screen["width"], 400);
}

/// 原始输入文件不被改写
#[test]
fn test_input_files_left_untouched() {
    let dir = TempDir::new().unwrap();
    let input = write_sample_ecu(dir.path());
    let before_data = std::fs::read_to_string(&input).unwrap();
    let before_layout = std::fs::read_to_string(dir.path().join("uch.json.layout")).unwrap();

    // 重新生成样例会覆盖，改为直接跑管道
    let files = run_pipeline(&dir, MockTranslationService::new(&sample_glossary()));
    assert!(files.translated_data_path().exists());

    assert_eq!(std::fs::read_to_string(&input).unwrap(), before_data);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("uch.json.layout")).unwrap(),
        before_layout
    );
}

/// 第二次运行全部命中缓存，零远程调用
#[test]
fn test_second_run_is_fully_cached() {
    let dir = TempDir::new().unwrap();
    run_pipeline(&dir, MockTranslationService::new(&sample_glossary()));

    let service = MockTranslationService::new(&sample_glossary());
    let calls = service.calls.clone();
    run_pipeline(&dir, service);

    assert!(
        calls.borrow().is_empty(),
        "second run should not call the service, got {:?}",
        calls.borrow()
    );
}

/// 最小文档走完整个管道后，字典文件里恰好是那三对条目
#[test]
fn test_minimal_document_leaves_exactly_three_cache_pairs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mini.json");
    std::fs::write(
        &input,
        json!({
            "ecuname": "MINI",
            "requests": [],
            "data": { "Moteur": { "lists": { "1": "Oui", "2": "Non" } } }
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("mini.json.layout"),
        json!({ "categories": {}, "screens": {} }).to_string(),
    )
    .unwrap();

    let files = EcuFileSet::from_input(&input);
    let (mut data_doc, mut layout_doc) = files.load().unwrap();
    let cache = DictionaryCache::open(dir.path(), "fr", "en").unwrap();
    let service =
        MockTranslationService::new(&[("Moteur", "Engine"), ("Oui", "Yes"), ("Non", "No")]);
    let mut translator = CachingTranslator::new(cache, Box::new(service), "fr", "en");
    TranslationWalker::new(&mut translator)
        .walk(&mut data_doc, &mut layout_doc)
        .unwrap();
    files.save(&data_doc, &layout_doc).unwrap();

    let data: Value =
        serde_json::from_str(&std::fs::read_to_string(files.translated_data_path()).unwrap())
            .unwrap();
    assert_eq!(data["data"]["Engine"]["lists"]["1"], "Yes");
    assert_eq!(data["data"]["Engine"]["lists"]["2"], "No");

    // 重开字典：不多不少正好这三对
    let cache = DictionaryCache::open(dir.path(), "fr", "en").unwrap();
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.lookup("Moteur"), Some("Engine"));
    assert_eq!(cache.lookup("Oui"), Some("Yes"));
    assert_eq!(cache.lookup("Non"), Some("No"));
}

/// 同一原文跨区段出现也只调一次远程服务
#[test]
fn test_one_remote_call_per_distinct_string() {
    let dir = TempDir::new().unwrap();
    let service = MockTranslationService::new(&sample_glossary());
    let calls = service.calls.clone();
    run_pipeline(&dir, service);

    let mut seen = calls.borrow().clone();
    let total = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(total, seen.len(), "duplicate remote calls detected");
}
