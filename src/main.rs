use anyhow::{Context, Result};
use clap::Parser;

use job_aggregator::utils::logging;
use job_aggregator::{run_pipeline, Config, DEFAULT_CONFIG_FILE};

/// 依次运行 Adzuna 抓取、France Travail 抓取和转换合并
#[derive(Parser, Debug)]
#[command(name = "job_aggregator", version)]
struct Cli {
    /// 两个抓取阶段的页数（默认取配置值）
    pages: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(DEFAULT_CONFIG_FILE).context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::init_log_file(&config.output_log_file, "job_aggregator")?;

    let stats = run_pipeline(&config, cli.pages).await?;
    tracing::info!("🎉 完成: 共写出 {} 条职位", stats.output_records);

    Ok(())
}
