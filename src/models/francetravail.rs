//! France Travail 抓取结果与暂存行

use serde::{Deserialize, Serialize};

/// 结果列表中的一张职位卡片
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferCard {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// `p.contrat` 中 `-` 之前的部分，如 `CDI`
    pub contract_kind: Option<String>,
    /// `p.contrat` 中最后一个 `-` 之后的部分，如 `Temps plein`
    pub contract_time: Option<String>,
    /// `p.date` 原文
    pub date_raw: Option<String>,
    pub url: Option<String>,
}

/// 详情页中的微数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferDetail {
    pub region: Option<String>,
    pub sector: Option<String>,
    pub salary_text: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_unit: Option<String>,
}

/// 暂存文件 `francetravail_job_listings.csv` 中的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FranceTravailListing {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contract_kind: Option<String>,
    pub contract_time: Option<String>,
    pub date_posted: Option<String>,
    pub job_url: Option<String>,
    pub sector: Option<String>,
    pub salary_text: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_unit: Option<String>,
}

impl FranceTravailListing {
    /// 合并卡片与详情页；详情页的地区优先于卡片上的地点
    pub fn from_parts(card: OfferCard, date_posted: Option<String>, detail: Option<OfferDetail>) -> Self {
        let detail = detail.unwrap_or_default();
        Self {
            title: card.title,
            company: card.company,
            location: detail.region.or(card.location),
            description: card.description,
            contract_kind: card.contract_kind,
            contract_time: card.contract_time,
            date_posted,
            job_url: card.url,
            sector: detail.sector,
            salary_text: detail.salary_text,
            salary_min: detail.salary_min,
            salary_max: detail.salary_max,
            salary_unit: detail.salary_unit,
        }
    }
}
