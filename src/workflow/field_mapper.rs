//! 字段映射 - 流程层
//!
//! 把来源字段名改写成统一字段。映射表就是白名单：
//! 表中没有的来源字段直接丢弃，表中有但记录里没有的字段记为缺失。

use tracing::debug;

use crate::models::{Batch, JobRecord, RawRecord, SalaryPeriod, TargetField, CANONICAL_COLUMNS};
use crate::workflow::source_profile::SourceProfile;

/// 映射单条原始记录
///
/// 对任意输入都成功：空串视为缺失，数值解析失败视为缺失
pub fn map_record(raw: &RawRecord, mapping: &[(&str, TargetField)]) -> JobRecord {
    let mut record = JobRecord::default();

    for (source_name, target) in mapping {
        let Some(value) = raw
            .get(*source_name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        else {
            continue;
        };

        if *target == TargetField::SalaryPeriod {
            record.salary_period = SalaryPeriod::parse(value);
            continue;
        }

        if let Some(slot) = record.number_mut(*target) {
            *slot = parse_number(value);
            if slot.is_none() {
                debug!("字段 {} 的值 '{}' 不是数字，记为缺失", source_name, value);
            }
            continue;
        }

        record.set_text(*target, Some(value.to_string()));
    }

    record
}

/// 映射一个来源的全部记录
///
/// 来源未标注薪资周期时，有薪资数值的记录使用来源默认周期
pub fn map_batch(raws: &[RawRecord], profile: &SourceProfile) -> Batch {
    let records = raws
        .iter()
        .map(|raw| {
            let mut record = map_record(raw, profile.field_mapping);
            let has_salary = record.salary_min.is_some() || record.salary_max.is_some();
            if record.salary_period.is_none() && has_salary {
                record.salary_period = profile.default_salary_period;
            }
            record
        })
        .collect();

    Batch::new(profile.name, CANONICAL_COLUMNS.to_vec(), records)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}
