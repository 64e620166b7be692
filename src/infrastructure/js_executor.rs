//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"导航 / 执行 JS / 读取 HTML"的能力

use std::time::Duration;

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{AppError, AppResult, BrowserError};

/// 轮询间隔
const POLL_INTERVAL_MS: u64 = 250;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() / html() 能力
/// - 不认识职位卡片，不处理抓取流程
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 导航到指定 URL 并等待加载完成
    pub async fn goto(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        self.page.goto(url).await.map_err(|e| {
            AppError::Browser(BrowserError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            })
        })?;
        Ok(())
    }

    /// 当前页面的完整 HTML
    pub async fn html(&self) -> AppResult<String> {
        Ok(self.page.content().await?)
    }

    /// 执行 JS 代码并返回 JSON 结果
    ///
    /// # 参数
    /// - `js_code`: 要执行的 JavaScript 代码
    ///
    /// # 返回
    /// 返回 JSON 值
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 轮询直到选择器至少命中一个元素
    ///
    /// # 返回
    /// 返回命中的元素数量
    pub async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> AppResult<usize> {
        let script = format!(
            "document.querySelectorAll({}).length",
            serde_json::to_string(selector)?
        );
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            let count: usize = self.eval_as(script.as_str()).await?;
            if count > 0 {
                debug!("选择器 {} 命中 {} 个元素", selector, count);
                return Ok(count);
            }
            if Instant::now() >= deadline {
                return Err(AppError::Browser(BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                    waited_ms: timeout_ms,
                }));
            }
            sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }

    /// 点击第一个命中选择器的元素
    ///
    /// # 返回
    /// 元素不存在时返回 `false`
    pub async fn click(&self, selector: &str) -> AppResult<bool> {
        let script = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                if (!el) {{
                    return false;
                }}
                el.click();
                return true;
            }})()
            "#,
            serde_json::to_string(selector)?
        );
        self.eval_as(script).await
    }
}
