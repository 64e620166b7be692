/// Adzuna API 客户端
///
/// 封装职位搜索接口的分页调用
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::adzuna::{AdzunaJob, AdzunaResponse};
use tracing::debug;

/// Adzuna API 客户端
pub struct AdzunaClient {
    http: reqwest::Client,
    base_url: String,
    country: String,
    app_id: String,
    app_key: String,
    results_per_page: u32,
    query: Option<String>,
}

impl AdzunaClient {
    /// 创建新的 Adzuna 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.adzuna_base_url.trim_end_matches('/').to_string(),
            country: config.adzuna_country.clone(),
            app_id: config.adzuna_app_id.clone(),
            app_key: config.adzuna_app_key.clone(),
            results_per_page: config.adzuna_results_per_page,
            query: config.adzuna_query.clone(),
        }
    }

    /// 某一页的请求地址（页码从 1 开始）
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/{}/search/{}", self.base_url, self.country, page)
    }

    /// 获取一页职位
    ///
    /// # 参数
    /// - `page`: 页码（从 1 开始）
    ///
    /// # 返回
    /// 返回该页的原始职位列表，可能为空
    pub async fn fetch_page(&self, page: u32) -> AppResult<Vec<AdzunaJob>> {
        let url = self.page_url(page);
        debug!("请求 Adzuna: {}", url);

        let results_per_page = self.results_per_page.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("app_id", self.app_id.as_str()),
            ("app_key", self.app_key.as_str()),
            ("results_per_page", results_per_page.as_str()),
            ("content-type", "application/json"),
        ];
        if let Some(query) = self.query.as_deref() {
            params.push(("what", query));
        }

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(ApiError::BadStatus {
                endpoint: url,
                status: status.as_u16(),
            }));
        }

        let body: AdzunaResponse = response.json().await.map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                source: Box::new(e),
            })
        })?;

        debug!("第 {} 页返回 {} 条结果", page, body.results.len());

        Ok(body.results)
    }
}
