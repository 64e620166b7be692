use anyhow::{Context, Result};
use clap::Parser;

use job_aggregator::utils::logging;
use job_aggregator::{run_transform_stage, Config, DEFAULT_CONFIG_FILE};

/// 读取两个暂存文件，规范化、富化后合并写出
#[derive(Parser, Debug)]
#[command(name = "transform", version)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let config = Config::load(DEFAULT_CONFIG_FILE).context("加载配置失败")?;
    logging::init(config.verbose_logging);
    logging::init_log_file(&config.output_log_file, "transform")?;

    run_transform_stage(&config).await?;
    Ok(())
}
