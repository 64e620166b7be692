use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 外部服务错误（翻译 / 问答 / 地理编码）
    #[error("服务错误: {0}")]
    Service(#[from] ServiceError),
    /// 合并错误
    #[error("合并错误: {0}")]
    Merge(#[from] MergeError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed { port: u16, source: BoxError },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed { source: BoxError },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed { url: String, source: BoxError },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed { source: BoxError },
    /// 等待元素超时
    #[error("等待元素 {selector} 超时 ({waited_ms} ms)")]
    WaitTimeout { selector: String, waited_ms: u64 },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed { endpoint: String, source: BoxError },
    /// API 返回错误状态码
    #[error("API返回错误响应 ({endpoint}): status={status}")]
    BadStatus { endpoint: String, status: u16 },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed { source: BoxError },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed { path: String, source: BoxError },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed { path: String, source: BoxError },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed { path: String, source: BoxError },
}

/// 外部服务错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 调用失败
    #[error("{service} 调用失败: {source}")]
    CallFailed { service: String, source: BoxError },
    /// 调用超时
    #[error("{service} 调用超时 ({timeout_secs}s)")]
    Timeout { service: String, timeout_secs: u64 },
    /// 返回内容为空
    #[error("{service} 返回内容为空")]
    EmptyResponse { service: String },
    /// 响应中缺少字段
    #[error("{service} 响应缺少字段: {field}")]
    MissingField { service: String, field: String },
}

/// 合并错误
#[derive(Debug, Error)]
pub enum MergeError {
    /// 两个批次的字段集合不一致
    #[error("字段集合不一致: {left} 缺少 {missing_in_left:?}, {right} 缺少 {missing_in_right:?}")]
    SchemaMismatch {
        left: String,
        right: String,
        missing_in_left: Vec<String>,
        missing_in_right: Vec<String>,
    },
    /// 批次缺少规范列
    #[error("{batch} 缺少规范列: {column}")]
    MissingColumn { batch: String, column: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 必填项缺失
    #[error("缺少必填配置: {key}")]
    MissingValue { key: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建外部服务调用错误
    pub fn service_failed(
        service: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        AppError::Service(ServiceError::CallFailed {
            service: service.into(),
            source: source.into(),
        })
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category_prefix() {
        let err = AppError::Merge(MergeError::MissingColumn {
            batch: "adzuna".to_string(),
            column: "url".to_string(),
        });
        assert_eq!(err.to_string(), "合并错误: adzuna 缺少规范列: url");
    }

    #[test]
    fn test_service_failed_keeps_source() {
        let err = AppError::service_failed("translator", "boom");
        assert!(err.to_string().contains("translator 调用失败: boom"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
