//! 警告写入服务 - 业务能力层
//!
//! 只负责"把被吞掉的单条失败写入 warn.txt"，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 每条被跳过或降级的富化结果写一行
/// - 只处理单条记录的警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.warn_file_path
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `source`: 来源名称
    /// - `url`: 记录的详情链接（缺失时写 `-`）
    /// - `stage`: 失败的子步骤
    /// - `reason`: 失败原因
    pub async fn write(&self, source: &str, url: Option<&str>, stage: &str, reason: &str) -> Result<()> {
        debug!("写入警告: {} | {} | {}", source, stage, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!(
            "{} | {} | {} | {}\n",
            source,
            url.unwrap_or("-"),
            stage,
            reason.replace('\n', " ")
        );

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
