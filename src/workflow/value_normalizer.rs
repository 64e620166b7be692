//! 取值规范化 - 流程层
//!
//! 用静态对照表把分类字段改写成规范取值

use crate::models::vocabulary::{CONTRACT_DURATION, EMPLOYMENT_TYPE};
use crate::models::{JobRecord, TargetField, Vocabulary};
use crate::workflow::source_profile::SourceProfile;

/// 规范化单个文本字段
pub fn normalize_field(record: &mut JobRecord, field: TargetField, vocabulary: &Vocabulary) {
    let canonical = vocabulary.canonicalize(record.text(field));
    record.set_text(field, canonical);
}

/// 规范化雇佣类型、合同期限与分类
///
/// 对同一条记录重复调用结果不变
pub fn normalize_record(mut record: JobRecord, profile: &SourceProfile) -> JobRecord {
    normalize_field(&mut record, TargetField::EmploymentType, &EMPLOYMENT_TYPE);
    normalize_field(&mut record, TargetField::ContractDuration, &CONTRACT_DURATION);
    normalize_field(&mut record, TargetField::Category, profile.category);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN;
    use crate::workflow::source_profile::{ADZUNA, FRANCE_TRAVAIL};

    fn record(category: Option<&str>, employment: Option<&str>, contract: Option<&str>) -> JobRecord {
        JobRecord {
            category: category.map(str::to_string),
            employment_type: employment.map(str::to_string),
            contract_duration: contract.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_adzuna_values() {
        let normalized = normalize_record(
            record(Some("it-jobs"), Some("full-time"), Some("permanent")),
            &ADZUNA,
        );
        assert_eq!(normalized.category.as_deref(), Some("IT Jobs"));
        assert_eq!(normalized.employment_type.as_deref(), Some("temps plein"));
        assert_eq!(normalized.contract_duration.as_deref(), Some("CDI"));
    }

    #[test]
    fn test_unmapped_category_policies() {
        let adzuna = normalize_record(record(Some("unknown-made-up-tag"), None, None), &ADZUNA);
        assert_eq!(adzuna.category.as_deref(), Some(UNKNOWN));

        let francetravail =
            normalize_record(record(Some("Élevage de chèvres"), None, None), &FRANCE_TRAVAIL);
        assert_eq!(francetravail.category.as_deref(), Some("Élevage de chèvres"));
    }

    #[test]
    fn test_absent_values() {
        let adzuna = normalize_record(record(None, None, None), &ADZUNA);
        assert_eq!(adzuna.category.as_deref(), Some(UNKNOWN));
        assert_eq!(adzuna.employment_type, None);

        let francetravail = normalize_record(record(None, None, None), &FRANCE_TRAVAIL);
        assert_eq!(francetravail, JobRecord::default());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            record(Some("it-jobs"), Some("part_time"), Some("contract")),
            record(Some("unknown-made-up-tag"), Some("Temps partiel"), Some("MIS")),
            record(None, Some("6 Mois"), Some("Saisonnier")),
        ];
        for profile in [&ADZUNA, &FRANCE_TRAVAIL] {
            for input in &inputs {
                let once = normalize_record(input.clone(), profile);
                let twice = normalize_record(once.clone(), profile);
                assert_eq!(once, twice);
            }
        }
    }
}
