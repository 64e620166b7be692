//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责阶段调度和资源管理，是整个流水线的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `fetch_stage` - Adzuna 抓取
//! - 逐页请求 API，空页或失败即停止
//! - 写入 `adzuna_job_listings.csv`
//!
//! ### `scrape_stage` - France Travail 抓取
//! - 唯一持有浏览器会话的模块
//! - 翻页、去重、读取详情页
//! - 写入 `francetravail_job_listings.csv`
//!
//! ### `transform_stage` - 转换与合并
//! - 构造外部服务句柄并注入富化流程
//! - 映射 → 规范化 → 富化 → 合并 → 写出
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (阶段：fetch / scrape / transform)
//!     ↓
//! workflow (映射 / 规范化 / 富化 / 合并)
//!     ↓
//! services (能力层：翻译 / 问答 / 地理编码 / 页面解析 / warn)
//!     ↓
//! clients + infrastructure (HTTP 客户端、JsExecutor、ServicePolicy)
//! ```

pub mod fetch_stage;
pub mod scrape_stage;
pub mod transform_stage;

use anyhow::Result;
use tracing::info;

use crate::config::Config;

pub use fetch_stage::{fetch_listings, run_fetch_stage, FetchStats};
pub use scrape_stage::{run_scrape_stage, ScrapeStats};
pub use transform_stage::{
    build_enricher, process_source, run_transform_stage, transform_records, TransformStats,
};

/// 依次运行三个阶段
///
/// # 参数
/// - `pages`: 两个抓取阶段的页数；为空时各自使用配置中的默认值
pub async fn run_pipeline(config: &Config, pages: Option<u32>) -> Result<TransformStats> {
    let fetched = run_fetch_stage(config, pages.unwrap_or(config.adzuna_pages)).await?;
    info!("Adzuna: {} 页, {} 条", fetched.pages, fetched.listings);

    let scraped = run_scrape_stage(config, pages.unwrap_or(config.francetravail_pages)).await?;
    info!("France Travail: {} 页, {} 条", scraped.pages, scraped.listings);

    run_transform_stage(config).await
}
