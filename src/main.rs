//! 命令行入口
//!
//! 参数优先级：命令行 > 环境变量 > 配置文件 > 内置默认值。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ddt_translate::core::{translate_ecu_files, TranslateOptions};
use ddt_translate::translation::TranslationConfig;

/// 翻译 DDT ECU 文件中的字符串
#[derive(Debug, Parser)]
#[command(name = "ddt-translate", version, about)]
struct Cli {
    /// 要翻译的 ECU 文件（<name>.json 或 <name>.json.layout）
    #[arg(short, long, value_name = "PATH")]
    file: PathBuf,

    /// 目标语言代码（如 en、pl）
    #[arg(short, long, value_name = "CODE")]
    lang: String,

    /// 源语言代码
    #[arg(long, value_name = "CODE")]
    source_lang: Option<String>,

    /// 翻译 API 主机（如 translate.google.pl）
    #[arg(long, value_name = "HOST")]
    endpoint: Option<String>,

    /// 字典缓存目录
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// 单次请求超时（秒）
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// 配置文件路径
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ddt_translate::TranslationResult<()> {
    let mut config = TranslationConfig::load(cli.config.as_deref())?;

    // 命令行覆盖
    config.target_lang = cli.lang;
    if let Some(lang) = cli.source_lang {
        config.source_lang = lang;
    }
    if let Some(host) = cli.endpoint {
        config.api_host = host;
    }
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = dir;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    config.validate()?;

    let options = TranslateOptions {
        input_file: cli.file,
        source_lang: config.source_lang,
        target_lang: config.target_lang,
        api_host: config.api_host,
        cache_dir: config.cache_dir,
        timeout_secs: config.timeout_secs,
    };

    let summary = translate_ecu_files(&options)?;
    println!(
        "翻译完成: {} 条字符串, {} 次缓存命中, {} 次远程调用, 耗时 {:.1?}",
        summary.translated_strings,
        summary.cache_hits,
        summary.service_calls,
        summary.elapsed
    );
    Ok(())
}
