//! 合并与输出 - 流程层
//!
//! 两个批次按 A 在前、B 在后拼接，按规范列顺序写出 CSV

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult, MergeError};
use crate::models::{Batch, TargetField, CANONICAL_COLUMNS};

/// 合并两个批次
///
/// # 错误
/// - 两个批次的字段集合不一致时返回 `SchemaMismatch`
/// - 批次缺少规范列时返回 `MissingColumn`
pub fn merge(first: Batch, second: Batch) -> AppResult<Batch> {
    check_same_schema(&first, &second)?;
    for batch in [&first, &second] {
        check_canonical_columns(batch)?;
    }

    info!(
        "🔗 合并 {} ({} 条) + {} ({} 条)",
        first.source,
        first.len(),
        second.source,
        second.len()
    );

    let source = format!("{}+{}", first.source, second.source);
    let mut records = first.records;
    records.extend(second.records);

    Ok(Batch::new(source, CANONICAL_COLUMNS.to_vec(), records))
}

fn check_same_schema(first: &Batch, second: &Batch) -> AppResult<()> {
    let left: BTreeSet<TargetField> = first.schema.iter().copied().collect();
    let right: BTreeSet<TargetField> = second.schema.iter().copied().collect();
    if left == right {
        return Ok(());
    }

    Err(AppError::Merge(MergeError::SchemaMismatch {
        left: first.source.clone(),
        right: second.source.clone(),
        missing_in_left: column_names(right.difference(&left)),
        missing_in_right: column_names(left.difference(&right)),
    }))
}

fn column_names<'a>(fields: impl Iterator<Item = &'a TargetField>) -> Vec<String> {
    fields.map(|f| f.column_name().to_string()).collect()
}

fn check_canonical_columns(batch: &Batch) -> AppResult<()> {
    match CANONICAL_COLUMNS
        .iter()
        .find(|column| !batch.schema.contains(*column))
    {
        Some(column) => Err(AppError::Merge(MergeError::MissingColumn {
            batch: batch.source.clone(),
            column: column.column_name().to_string(),
        })),
        None => Ok(()),
    }
}

/// 按规范列顺序写出 CSV（带表头，缺失值为空单元格）
pub fn write_csv<W: Write>(writer: W, batch: &Batch) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CANONICAL_COLUMNS.iter().map(|c| c.column_name()))?;

    for record in &batch.records {
        writer.write_record(CANONICAL_COLUMNS.iter().map(|c| record.cell(*c)))?;
    }

    writer.flush()?;
    Ok(())
}

/// 写出合并结果文件
pub async fn write_dataset(path: &Path, batch: &Batch) -> AppResult<()> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, batch)
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    fs::write(path, buffer)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    info!("💾 已写出 {} 条记录: {}", batch.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobRecord;

    fn titled(source: &str, titles: &[&str]) -> Batch {
        Batch::new(
            source,
            CANONICAL_COLUMNS.to_vec(),
            titles
                .iter()
                .map(|t| JobRecord {
                    title: Some(t.to_string()),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_merge_keeps_first_batch_before_second() {
        let merged = merge(titled("adzuna", &["a1", "a2"]), titled("francetravail", &["b1"])).unwrap();
        let titles: Vec<_> = merged
            .records
            .iter()
            .map(|r| r.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
        assert_eq!(merged.source, "adzuna+francetravail");
    }

    #[test]
    fn test_merge_with_empty_batches() {
        let merged = merge(titled("adzuna", &[]), titled("francetravail", &["b1"])).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merge(titled("adzuna", &[]), titled("francetravail", &[]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_merge_schema_mismatch() {
        let mut second = titled("francetravail", &["b1"]);
        second.schema.retain(|f| *f != TargetField::Salary);
        second.schema.push(TargetField::Latitude);

        match merge(titled("adzuna", &["a1"]), second) {
            Err(AppError::Merge(MergeError::SchemaMismatch {
                missing_in_left,
                missing_in_right,
                ..
            })) => {
                assert_eq!(missing_in_left, vec!["latitude".to_string()]);
                assert_eq!(missing_in_right, vec!["salary".to_string()]);
            }
            other => panic!("意外结果: {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_merge_missing_canonical_column() {
        let mut first = titled("adzuna", &["a1"]);
        let mut second = titled("francetravail", &["b1"]);
        first.schema.retain(|f| *f != TargetField::Url);
        second.schema.retain(|f| *f != TargetField::Url);

        assert!(matches!(
            merge(first, second),
            Err(AppError::Merge(MergeError::MissingColumn { column, .. })) if column == "url"
        ));
    }

    #[test]
    fn test_write_csv_uses_canonical_order_and_drops_transient_fields() {
        let batch = Batch::new(
            "adzuna",
            CANONICAL_COLUMNS.to_vec(),
            vec![JobRecord {
                title: Some("Dev, Rust".to_string()),
                category: Some("IT Jobs".to_string()),
                salary_min: Some(3000.0),
                latitude: Some(48.85),
                salary_text: Some("36k".to_string()),
                ..Default::default()
            }],
        );

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &batch).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("title,category,company,location,employment_type,contract_duration,date_posted,url,salary_min,salary_max,salary,description")
        );
        assert_eq!(lines.next(), Some("\"Dev, Rust\",IT Jobs,,,,,,,3000.0,,,"));
        assert_eq!(lines.next(), None);
    }
}
