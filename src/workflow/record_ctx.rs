//! 记录处理上下文
//!
//! 封装"我正在处理哪个来源的第几条记录"这一信息

use std::fmt::Display;

/// 记录处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 来源名称
    pub source: &'static str,

    /// 记录在来源批次中的索引（从1开始，仅用于日志显示）
    pub index: usize,

    /// 记录的详情链接
    pub url: Option<String>,
}

impl RecordCtx {
    /// 创建新的记录上下文
    pub fn new(source: &'static str, index: usize, url: Option<String>) -> Self {
        Self { source, index, url }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} #{}]", self.source, self.index)
    }
}
