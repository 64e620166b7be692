//! Adzuna 抓取阶段 - 编排层
//!
//! 逐页请求 API，遇到空页或请求失败即停止翻页，结果写入暂存 CSV

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::clients::AdzunaClient;
use crate::config::Config;
use crate::models::{write_rows, AdzunaListing};
use crate::utils::logging;

/// 抓取阶段结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchStats {
    /// 成功返回数据的页数
    pub pages: u32,
    pub listings: usize,
}

/// 运行 Adzuna 抓取阶段
///
/// # 参数
/// - `config`: 配置
/// - `pages`: 最多抓取的页数
pub async fn run_fetch_stage(config: &Config, pages: u32) -> Result<FetchStats> {
    logging::log_stage_start("Adzuna API", Some(pages));
    config
        .require_adzuna_credentials()
        .context("Adzuna 凭据未配置")?;

    let client = AdzunaClient::new(config);
    let (listings, stats) = fetch_listings(&client, pages).await;

    let path = Path::new(&config.adzuna_staging_file);
    write_rows(path, &listings)
        .await
        .with_context(|| format!("写入暂存文件 {} 失败", path.display()))?;

    logging::print_stage_stats("Adzuna API", listings.len(), 0, &config.adzuna_staging_file);
    Ok(stats)
}

/// 逐页抓取，返回已转换为暂存行的职位
pub async fn fetch_listings(client: &AdzunaClient, pages: u32) -> (Vec<AdzunaListing>, FetchStats) {
    let mut listings = Vec::new();
    let mut stats = FetchStats::default();

    for page in 1..=pages {
        let jobs = match client.fetch_page(page).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("❌ 第 {} 页请求失败，停止翻页: {}", page, e);
                break;
            }
        };

        if jobs.is_empty() {
            info!("第 {} 页没有更多职位，停止翻页", page);
            break;
        }

        logging::log_page_progress(page, pages, jobs.len());
        stats.pages += 1;
        listings.extend(jobs.into_iter().map(AdzunaListing::from));
    }

    stats.listings = listings.len();
    (listings, stats)
}
