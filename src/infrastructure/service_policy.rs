//! 外部服务调用策略 - 基础设施层
//!
//! 给每次外部调用加上超时与有限次重试

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::config::Config;
use crate::error::{AppError, AppResult, ServiceError};

/// 超时与重试设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePolicy {
    pub timeout: Duration,
    /// 首次调用失败后的额外尝试次数
    pub max_retries: u32,
}

impl Default for ServicePolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
        }
    }
}

impl ServicePolicy {
    pub fn new(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.service_timeout_secs),
            max_retries: config.service_max_retries,
        }
    }

    /// 在策略下执行一次外部调用
    ///
    /// # 参数
    /// - `service`: 服务名称（用于日志与错误信息）
    /// - `call`: 每次尝试都会重新调用的闭包
    pub async fn run<T, F, Fut>(&self, service: &str, mut call: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let attempts = self.max_retries.saturating_add(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let err = match timeout(self.timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => e,
                Err(_) => AppError::Service(ServiceError::Timeout {
                    service: service.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                }),
            };

            if attempt < attempts {
                warn!("{} 第 {}/{} 次调用失败: {}，重试中", service, attempt, attempts, err);
            }
            last_error = Some(err);
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::Service(ServiceError::EmptyResponse {
                service: service.to_string(),
            })
        }))
    }
}
