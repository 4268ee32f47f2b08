/// 日志工具模块
///
/// 提供日志初始化和输出格式化的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::EditMode;
use crate::services::EditOutcome;

/// 初始化日志
///
/// 日志写到 stderr，stdout 只用于输出结果记录。
/// 默认级别为 info（verbose 时为 debug），可通过 RUST_LOG 覆盖。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录启动信息
///
/// # 参数
/// - `config`: 配置
/// - `mode`: 编辑模式
/// - `total`: 输入记录数
pub fn log_startup(config: &Config, mode: EditMode, total: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 notable 编辑开始 - {} 模式", mode);
    info!("🔗 目标服务: {}", config.base_url);
    info!("📋 输入记录: {} 条", total);
    if mode == EditMode::Single {
        info!("📊 最大并发数: {}", config.max_concurrent_requests);
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(outcome: &EditOutcome) {
    info!("{}", "=".repeat(60));
    info!("📊 编辑完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", outcome.succeeded(), outcome.results.len());
    info!("❌ 失败: {}", outcome.failed());
    info!("⚠️ 跳过: {}", outcome.warnings.len());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
