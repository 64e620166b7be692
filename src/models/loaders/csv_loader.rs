use crate::error::{AppError, AppResult, FileError};
use crate::models::job::RawRecord;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 从暂存 CSV 文件加载原始记录（列名 → 单元格文本）
pub async fn load_raw_records(csv_path: &Path) -> AppResult<Vec<RawRecord>> {
    if !csv_path.exists() {
        return Err(AppError::File(FileError::NotFound {
            path: csv_path.display().to_string(),
        }));
    }

    let content = fs::read_to_string(csv_path)
        .await
        .map_err(|e| AppError::file_read_failed(csv_path.display().to_string(), e))?;

    let records = parse_raw_records(&content)
        .map_err(|e| AppError::file_read_failed(csv_path.display().to_string(), e))?;

    tracing::info!(
        "成功加载 {} 条记录: {}",
        records.len(),
        csv_path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(records)
}

/// 解析带表头的 CSV 文本
pub fn parse_raw_records(content: &str) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// 把任意可序列化的行写入 CSV 文件（带表头）
pub async fn write_rows<T: Serialize>(csv_path: &Path, rows: &[T]) -> AppResult<()> {
    let bytes = serialize_rows(rows)
        .map_err(|e| AppError::file_write_failed(csv_path.display().to_string(), e))?;

    fs::write(csv_path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(csv_path.display().to_string(), e))?;

    Ok(())
}

fn serialize_rows<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}
