/// 反向地理编码客户端
///
/// 调用 Nominatim 兼容的 `/reverse` 接口
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ServiceError};
use serde::Deserialize;
use tracing::debug;

/// 地址组成部分（只保留用到的字段）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddressComponents {
    pub state: Option<String>,
    pub region: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressComponents>,
    #[serde(default)]
    error: Option<String>,
}

/// 反向地理编码客户端
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl GeocodeClient {
    /// 创建新的地理编码客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
            user_agent: config.geocoder_user_agent.clone(),
        }
    }

    /// 经纬度 → 地址组成部分
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> AppResult<AddressComponents> {
        let url = format!("{}/reverse", self.base_url);
        debug!("反向地理编码: ({}, {})", latitude, longitude);

        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("format", "jsonv2"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(ApiError::BadStatus {
                endpoint: url,
                status: status.as_u16(),
            }));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        parse_reverse_response(&text)
    }
}

/// 解析 `/reverse` 的 JSON 响应
pub fn parse_reverse_response(body: &str) -> AppResult<AddressComponents> {
    let parsed: ReverseResponse = serde_json::from_str(body)?;
    if let Some(message) = parsed.error {
        return Err(AppError::service_failed("geocoder", message));
    }
    parsed.address.ok_or_else(|| {
        AppError::Service(ServiceError::MissingField {
            service: "geocoder".to_string(),
            field: "address".to_string(),
        })
    })
}
