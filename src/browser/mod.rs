//! 浏览器会话
//!
//! 会话是抓取阶段独占的资源：要么连接已有浏览器的调试端口，
//! 要么自行启动无头浏览器。自行启动的浏览器在 [`BrowserSession::shutdown`] 中关闭。

pub mod connection;
pub mod headless;

use chromiumoxide::{Browser, Page};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_headless_browser;

/// 抓取阶段持有的浏览器会话
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    launched: bool,
}

impl BrowserSession {
    /// 按配置打开会话并导航到 `url`
    pub async fn open(config: &Config, url: &str) -> AppResult<Self> {
        match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = connect_to_browser_and_page(port, url).await?;
                Ok(Self {
                    browser,
                    page,
                    launched: false,
                })
            }
            None => {
                let (browser, page) =
                    launch_headless_browser(url, config.browser_executable.as_deref()).await?;
                Ok(Self {
                    browser,
                    page,
                    launched: true,
                })
            }
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 打开一个新的标签页
    pub async fn new_page(&self, url: &str) -> AppResult<Page> {
        Ok(self.browser.new_page(url).await?)
    }

    /// 释放会话；只关闭自己启动的浏览器
    pub async fn shutdown(mut self) {
        if !self.launched {
            return;
        }
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
            return;
        }
        let _ = self.browser.wait().await;
        info!("🧹 浏览器已关闭");
    }
}
