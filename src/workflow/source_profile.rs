//! 来源配置
//!
//! 每个来源的字段映射表、分类对照表和薪资周期默认值

use crate::models::vocabulary::{ADZUNA_CATEGORY, FRANCETRAVAIL_CATEGORY};
use crate::models::{SalaryPeriod, TargetField, Vocabulary};

/// 一个数据来源的静态描述
#[derive(Debug)]
pub struct SourceProfile {
    pub name: &'static str,
    /// 来源字段名 → 统一字段；不在表中的来源字段会被丢弃
    pub field_mapping: &'static [(&'static str, TargetField)],
    pub category: &'static Vocabulary,
    /// 来源未标注周期时薪资数值的默认周期
    pub default_salary_period: Option<SalaryPeriod>,
    /// 是否翻译描述
    pub translate_description: bool,
}

pub static ADZUNA: SourceProfile = SourceProfile {
    name: "adzuna",
    field_mapping: &[
        ("title", TargetField::Title),
        ("company", TargetField::Company),
        ("location", TargetField::Location),
        ("latitude", TargetField::Latitude),
        ("longitude", TargetField::Longitude),
        ("category", TargetField::Category),
        ("contract_time", TargetField::EmploymentType),
        ("contract_type", TargetField::ContractDuration),
        ("date_posted", TargetField::DatePosted),
        ("job_url", TargetField::Url),
        ("salary_min", TargetField::SalaryMin),
        ("salary_max", TargetField::SalaryMax),
        ("description", TargetField::Description),
    ],
    category: &ADZUNA_CATEGORY,
    default_salary_period: Some(SalaryPeriod::Annual),
    translate_description: true,
};

pub static FRANCE_TRAVAIL: SourceProfile = SourceProfile {
    name: "francetravail",
    field_mapping: &[
        ("title", TargetField::Title),
        ("company", TargetField::Company),
        ("location", TargetField::Location),
        ("description", TargetField::Description),
        ("contract_time", TargetField::EmploymentType),
        ("contract_kind", TargetField::ContractDuration),
        ("date_posted", TargetField::DatePosted),
        ("job_url", TargetField::Url),
        ("sector", TargetField::Category),
        ("salary_text", TargetField::SalaryText),
        ("salary_min", TargetField::SalaryMin),
        ("salary_max", TargetField::SalaryMax),
        ("salary_unit", TargetField::SalaryPeriod),
    ],
    category: &FRANCETRAVAIL_CATEGORY,
    default_salary_period: None,
    translate_description: false,
};
