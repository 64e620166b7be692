use anyhow::{Context, Result};
use clap::Parser;

use job_aggregator::utils::logging;
use job_aggregator::{run_fetch_stage, Config, DEFAULT_CONFIG_FILE};

/// 从 Adzuna API 抓取职位并写入暂存文件
#[derive(Parser, Debug)]
#[command(name = "fetch_adzuna", version)]
struct Cli {
    /// 抓取页数（默认取配置值，缺省为 10）
    pages: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(DEFAULT_CONFIG_FILE).context("加载配置失败")?;
    logging::init(config.verbose_logging);
    logging::init_log_file(&config.output_log_file, "fetch_adzuna")?;

    run_fetch_stage(&config, cli.pages.unwrap_or(config.adzuna_pages)).await?;
    Ok(())
}
