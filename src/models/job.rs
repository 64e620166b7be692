//! 统一职位记录模型
//!
//! 所有来源经过字段映射后都落到 [`JobRecord`]，字段集合固定，
//! 缺失值统一为 `None`。

use std::collections::BTreeMap;
use std::fmt;

/// 原始记录：来源字段名 → 原始文本值
pub type RawRecord = BTreeMap<String, String>;

/// 统一模式中的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetField {
    Title,
    Category,
    Company,
    Location,
    EmploymentType,
    ContractDuration,
    DatePosted,
    Url,
    SalaryMin,
    SalaryMax,
    Salary,
    Description,
    // 以下字段只在流水线内部流转，不写入输出文件
    Latitude,
    Longitude,
    SalaryText,
    SalaryPeriod,
}

/// 输出文件的规范列顺序
pub const CANONICAL_COLUMNS: [TargetField; 12] = [
    TargetField::Title,
    TargetField::Category,
    TargetField::Company,
    TargetField::Location,
    TargetField::EmploymentType,
    TargetField::ContractDuration,
    TargetField::DatePosted,
    TargetField::Url,
    TargetField::SalaryMin,
    TargetField::SalaryMax,
    TargetField::Salary,
    TargetField::Description,
];

impl TargetField {
    /// 输出文件中的列名
    pub fn column_name(self) -> &'static str {
        match self {
            TargetField::Title => "title",
            TargetField::Category => "category",
            TargetField::Company => "company",
            TargetField::Location => "location",
            TargetField::EmploymentType => "employment_type",
            TargetField::ContractDuration => "contract_duration",
            TargetField::DatePosted => "date_posted",
            TargetField::Url => "url",
            TargetField::SalaryMin => "salary_min",
            TargetField::SalaryMax => "salary_max",
            TargetField::Salary => "salary",
            TargetField::Description => "description",
            TargetField::Latitude => "latitude",
            TargetField::Longitude => "longitude",
            TargetField::SalaryText => "salary_text",
            TargetField::SalaryPeriod => "salary_period",
        }
    }

    /// 是否只在内部流转
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            TargetField::Latitude
                | TargetField::Longitude
                | TargetField::SalaryText
                | TargetField::SalaryPeriod
        )
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// 薪资数值的计价周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryPeriod {
    Annual,
    Monthly,
}

impl SalaryPeriod {
    /// 解析来源中的周期标记（如 `YEAR`、`Mensuel`）
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "year" | "yearly" | "annual" | "annuel" | "an" => Some(SalaryPeriod::Annual),
            "month" | "monthly" | "mensuel" | "mois" => Some(SalaryPeriod::Monthly),
            _ => None,
        }
    }
}

/// 经纬度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// 职位记录
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRecord {
    pub title: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub contract_duration: Option<String>,
    /// ISO 日期、相对日期文本或缺失
    pub date_posted: Option<String>,
    pub url: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// 从文本中抽取的月薪
    pub salary: Option<f64>,
    pub description: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub salary_text: Option<String>,
    pub salary_period: Option<SalaryPeriod>,
}

impl JobRecord {
    /// 读取文本字段；数值字段返回 `None`
    pub fn text(&self, field: TargetField) -> Option<&str> {
        let value = match field {
            TargetField::Title => &self.title,
            TargetField::Category => &self.category,
            TargetField::Company => &self.company,
            TargetField::Location => &self.location,
            TargetField::EmploymentType => &self.employment_type,
            TargetField::ContractDuration => &self.contract_duration,
            TargetField::DatePosted => &self.date_posted,
            TargetField::Url => &self.url,
            TargetField::Description => &self.description,
            TargetField::SalaryText => &self.salary_text,
            _ => return None,
        };
        value.as_deref()
    }

    /// 写入文本字段；对数值字段无效
    pub fn set_text(&mut self, field: TargetField, value: Option<String>) {
        let slot = match field {
            TargetField::Title => &mut self.title,
            TargetField::Category => &mut self.category,
            TargetField::Company => &mut self.company,
            TargetField::Location => &mut self.location,
            TargetField::EmploymentType => &mut self.employment_type,
            TargetField::ContractDuration => &mut self.contract_duration,
            TargetField::DatePosted => &mut self.date_posted,
            TargetField::Url => &mut self.url,
            TargetField::Description => &mut self.description,
            TargetField::SalaryText => &mut self.salary_text,
            _ => return,
        };
        *slot = value;
    }

    /// 数值字段的可变引用
    pub fn number_mut(&mut self, field: TargetField) -> Option<&mut Option<f64>> {
        match field {
            TargetField::SalaryMin => Some(&mut self.salary_min),
            TargetField::SalaryMax => Some(&mut self.salary_max),
            TargetField::Salary => Some(&mut self.salary),
            TargetField::Latitude => Some(&mut self.latitude),
            TargetField::Longitude => Some(&mut self.longitude),
            _ => None,
        }
    }

    /// 两个坐标都存在时返回经纬度
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// 输出文件中的单元格文本，缺失值为空串
    pub fn cell(&self, field: TargetField) -> String {
        match field {
            TargetField::SalaryMin => format_number(self.salary_min),
            TargetField::SalaryMax => format_number(self.salary_max),
            TargetField::Salary => format_number(self.salary),
            TargetField::Latitude => format_number(self.latitude),
            TargetField::Longitude => format_number(self.longitude),
            TargetField::SalaryPeriod => match self.salary_period {
                Some(SalaryPeriod::Annual) => "annual".to_string(),
                Some(SalaryPeriod::Monthly) => "monthly".to_string(),
                None => String::new(),
            },
            other => self.text(other).unwrap_or_default().to_string(),
        }
    }
}

/// 整数保留一位小数，其余按最短可还原的形式输出
fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// 一个来源经过字段映射后的批次
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// 来源名称（仅用于日志与错误信息）
    pub source: String,
    /// 该批次记录所具有的字段集合
    pub schema: Vec<TargetField>,
    pub records: Vec<JobRecord>,
}

impl Batch {
    pub fn new(source: impl Into<String>, schema: Vec<TargetField>, records: Vec<JobRecord>) -> Self {
        Self {
            source: source.into(),
            schema,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
