//! Adzuna API 响应与暂存行

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 搜索接口响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaResponse {
    #[serde(default)]
    pub results: Vec<AdzunaJob>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayName {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaCategory {
    pub tag: Option<String>,
    pub label: Option<String>,
}

/// 单条职位（字段均可缺失）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdzunaJob {
    pub title: Option<String>,
    pub company: Option<DisplayName>,
    pub location: Option<DisplayName>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<AdzunaCategory>,
    pub contract_type: Option<String>,
    pub contract_time: Option<String>,
    pub created: Option<String>,
    pub redirect_url: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub description: Option<String>,
}

/// 暂存文件 `adzuna_job_listings.csv` 中的一行
///
/// 列名保持 Adzuna 自己的命名，统一命名在字段映射阶段完成
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdzunaListing {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<String>,
    pub contract_type: Option<String>,
    pub contract_time: Option<String>,
    pub date_posted: Option<String>,
    pub job_url: Option<String>,
    /// 年薪
    pub salary_min: Option<f64>,
    /// 年薪
    pub salary_max: Option<f64>,
    pub description: Option<String>,
}

impl From<AdzunaJob> for AdzunaListing {
    fn from(job: AdzunaJob) -> Self {
        let date_posted = job.created.as_deref().and_then(parse_created_date);
        Self {
            title: job.title,
            company: job.company.and_then(|c| c.display_name),
            location: job.location.and_then(|l| l.display_name),
            latitude: job.latitude,
            longitude: job.longitude,
            category: job.category.and_then(|c| c.tag),
            contract_type: job.contract_type,
            contract_time: job.contract_time,
            date_posted,
            job_url: job.redirect_url,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            description: job.description,
        }
    }
}

/// `2024-03-01T09:15:00Z` → `2024-03-01`
pub fn parse_created_date(created: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(created.trim(), "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|dt| dt.date().format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_from_api_json() {
        let json = r#"{
            "results": [{
                "title": "Data Engineer",
                "company": {"display_name": "Acme"},
                "location": {"display_name": "Paris, Ile-de-France"},
                "latitude": 48.8566,
                "longitude": 2.3522,
                "category": {"tag": "it-jobs", "label": "IT Jobs"},
                "contract_type": "permanent",
                "contract_time": "full_time",
                "created": "2024-03-01T09:15:00Z",
                "redirect_url": "https://www.adzuna.fr/details/1",
                "salary_min": 36000,
                "salary_max": 48000,
                "description": "Build pipelines"
            }, {
                "title": "Sparse"
            }]
        }"#;

        let response: AdzunaResponse = serde_json::from_str(json).unwrap();
        let listings: Vec<AdzunaListing> =
            response.results.into_iter().map(AdzunaListing::from).collect();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].company.as_deref(), Some("Acme"));
        assert_eq!(listings[0].category.as_deref(), Some("it-jobs"));
        assert_eq!(listings[0].date_posted.as_deref(), Some("2024-03-01"));
        assert_eq!(listings[0].salary_min, Some(36000.0));
        assert_eq!(listings[1].title.as_deref(), Some("Sparse"));
        assert!(listings[1].company.is_none());
    }

    #[test]
    fn test_parse_created_date_rejects_other_formats() {
        assert_eq!(parse_created_date("01/03/2024"), None);
    }
}
