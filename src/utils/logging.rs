//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::record::ProcessingRecord;

/// 初始化日志
///
/// 读取 `RUST_LOG`，未设置时默认 `info`。重复调用是安全的。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 文档处理程序启动");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("🖼️ 渲染 DPI: {}", config.render_dpi);
    if !config.has_credential() {
        info!("❌ 未配置模型凭证 (GEMINI_API_KEY)");
    }
    info!("{}", "=".repeat(60));
}

/// 记录单个文档的处理结果
pub fn log_record_summary(record: &ProcessingRecord) {
    info!("\n{}", "─".repeat(60));
    info!("📄 文件: {}", record.filename_only);
    info!("🏷️ 类型: {}", record.doc_type);
    info!("🔎 提取信息: {}", truncate_text(&record.extracted_info, 80));
    info!("⚙️ 提取方式: {}", record.extraction_method);
    info!("📛 文件名检查: {}", record.filename_check);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
