/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 `debug` 或 `info`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `stage`: 阶段名称
pub fn init_log_file(log_file_path: &str, stage: &str) -> Result<()> {
    let log_header = format!(
        "{}\n{} 运行日志 - {}\n{}\n\n",
        "=".repeat(60),
        stage,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录阶段启动信息
pub fn log_stage_start(stage: &str, pages: Option<u32>) {
    info!("{}", "=".repeat(60));
    info!("🚀 阶段启动 - {}", stage);
    if let Some(pages) = pages {
        info!("📊 页数: {}", pages);
    }
    info!("{}", "=".repeat(60));
}

/// 记录分页进度
pub fn log_page_progress(page: u32, total_pages: u32, found: usize) {
    info!("📄 第 {}/{} 页: {} 条职位", page, total_pages, found);
}

/// 打印阶段统计信息
///
/// # 参数
/// - `stage`: 阶段名称
/// - `records`: 写出的记录数
/// - `failures`: 被吞掉的单条失败数
/// - `output_path`: 输出文件路径
pub fn print_stage_stats(stage: &str, records: usize, failures: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 {} 完成统计", stage);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 记录数: {}", records);
    info!("⚠️ 单条失败: {}", failures);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("développeur", 4), "déve...");
        assert_eq!(truncate_text("dev", 4), "dev");
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        init_log_file(path.to_str().unwrap(), "transform").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("transform 运行日志"));
    }
}
