//! France Travail 抓取阶段 - 编排层
//!
//! ## 职责
//!
//! - 唯一持有浏览器会话的模块，无论成功失败都在退出前释放
//! - 逐页解析结果卡片，按链接去重
//! - 可选地打开详情页读取大区、行业和薪资微数据
//! - 结果写入暂存 CSV

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::JsExecutor;
use crate::models::{write_rows, FranceTravailListing, OfferCard, OfferDetail};
use crate::services::francetravail_parser::{
    parse_offer_detail, parse_result_cards, NEXT_PAGE_SELECTOR, RESULT_CARD_SELECTOR,
};
use crate::utils::logging;
use crate::workflow::parse_relative_date;

/// 抓取阶段统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeStats {
    pub pages: u32,
    pub listings: usize,
    /// 没有链接的卡片
    pub skipped: usize,
    pub detail_failures: usize,
}

/// 运行 France Travail 抓取阶段
pub async fn run_scrape_stage(config: &Config, pages: u32) -> Result<ScrapeStats> {
    logging::log_stage_start("France Travail", Some(pages));

    let session = BrowserSession::open(config, &config.francetravail_search_url)
        .await
        .context("打开浏览器会话失败")?;

    let scraper = FranceTravailScraper::new(config, &session);
    let (listings, stats) = scraper.scrape(pages).await;
    session.shutdown().await;

    let path = Path::new(&config.francetravail_staging_file);
    write_rows(path, &listings)
        .await
        .with_context(|| format!("写入暂存文件 {} 失败", path.display()))?;

    logging::print_stage_stats(
        "France Travail",
        listings.len(),
        stats.detail_failures,
        &config.francetravail_staging_file,
    );
    Ok(stats)
}

/// 在一个已打开的会话上抓取结果列表
struct FranceTravailScraper<'a> {
    config: &'a Config,
    session: &'a BrowserSession,
    today: NaiveDate,
}

impl<'a> FranceTravailScraper<'a> {
    fn new(config: &'a Config, session: &'a BrowserSession) -> Self {
        Self {
            config,
            session,
            today: Local::now().date_naive(),
        }
    }

    /// 抓取最多 `pages` 页；页面级失败只结束翻页，已抓到的结果保留
    async fn scrape(&self, pages: u32) -> (Vec<FranceTravailListing>, ScrapeStats) {
        let executor = JsExecutor::new(self.session.page().clone());
        let detail_tab = self.open_detail_tab().await;
        let mut seen: HashSet<String> = HashSet::new();
        let mut listings = Vec::new();
        let mut stats = ScrapeStats::default();

        for page in 1..=pages {
            if let Err(e) = executor
                .wait_for_selector(RESULT_CARD_SELECTOR, self.config.page_wait_ms)
                .await
            {
                warn!("⚠️ 第 {} 页结果列表未出现，停止翻页: {}", page, e);
                break;
            }

            let html = match executor.html().await {
                Ok(html) => html,
                Err(e) => {
                    warn!("⚠️ 读取第 {} 页 HTML 失败，停止翻页: {}", page, e);
                    break;
                }
            };

            // "显示更多"把新卡片追加在同一列表后，旧卡片靠链接去重
            let mut new_cards = 0;
            for card in parse_result_cards(&html, &self.config.francetravail_origin) {
                let Some(url) = card.url.clone() else {
                    debug!("跳过没有链接的卡片: {:?}", card.title);
                    stats.skipped += 1;
                    continue;
                };
                if !seen.insert(url.clone()) {
                    continue;
                }
                new_cards += 1;
                listings.push(
                    self.build_listing(card, &url, detail_tab.as_ref(), &mut stats)
                        .await,
                );
            }

            logging::log_page_progress(page, pages, new_cards);
            stats.pages += 1;

            if page == pages {
                break;
            }
            match executor.click(NEXT_PAGE_SELECTOR).await {
                Ok(true) => sleep(Duration::from_millis(self.config.next_page_delay_ms)).await,
                Ok(false) => {
                    info!("没有更多结果，停止翻页");
                    break;
                }
                Err(e) => {
                    warn!("⚠️ 点击下一页失败，停止翻页: {}", e);
                    break;
                }
            }
        }

        if let Some(tab) = detail_tab {
            if let Err(e) = tab.page().clone().close().await {
                debug!("关闭详情页标签失败: {}", e);
            }
        }

        stats.listings = listings.len();
        (listings, stats)
    }

    /// 详情页共用一个标签页；打不开时只抓列表
    async fn open_detail_tab(&self) -> Option<JsExecutor> {
        if !self.config.scrape_detail_pages {
            return None;
        }
        match self.session.new_page("about:blank").await {
            Ok(page) => Some(JsExecutor::new(page)),
            Err(e) => {
                warn!("⚠️ 无法打开详情页标签，跳过详情页: {}", e);
                None
            }
        }
    }

    async fn build_listing(
        &self,
        card: OfferCard,
        url: &str,
        detail_tab: Option<&JsExecutor>,
        stats: &mut ScrapeStats,
    ) -> FranceTravailListing {
        let date_posted = card
            .date_raw
            .as_deref()
            .and_then(|raw| parse_relative_date(raw, self.today));

        let detail = match detail_tab {
            Some(tab) => match fetch_detail(tab, url).await {
                Ok(detail) => Some(detail),
                Err(e) => {
                    warn!("⚠️ 详情页 {} 读取失败: {}", url, e);
                    stats.detail_failures += 1;
                    None
                }
            },
            None => None,
        };

        FranceTravailListing::from_parts(card, date_posted, detail)
    }
}

/// 在详情页标签中打开链接并解析微数据
async fn fetch_detail(tab: &JsExecutor, url: &str) -> AppResult<OfferDetail> {
    tab.goto(url).await?;
    let html = tab.html().await?;
    Ok(parse_offer_detail(&html))
}
