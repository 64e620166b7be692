use anyhow::{Context, Result};
use clap::Parser;

use job_aggregator::utils::logging;
use job_aggregator::{run_scrape_stage, Config, DEFAULT_CONFIG_FILE};

/// 用浏览器抓取 France Travail 搜索结果并写入暂存文件
#[derive(Parser, Debug)]
#[command(name = "scrape_francetravail", version)]
struct Cli {
    /// 翻页次数（默认取配置值，缺省为 5）
    pages: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(DEFAULT_CONFIG_FILE).context("加载配置失败")?;
    logging::init(config.verbose_logging);
    logging::init_log_file(&config.output_log_file, "scrape_francetravail")?;

    run_scrape_stage(&config, cli.pages.unwrap_or(config.francetravail_pages)).await?;
    Ok(())
}
