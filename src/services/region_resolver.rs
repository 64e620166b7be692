//! 地区解析服务 - 业务能力层
//!
//! 经纬度 → 行政大区名称

use async_trait::async_trait;

use crate::clients::{AddressComponents, GeocodeClient};
use crate::error::AppResult;
use crate::infrastructure::ServicePolicy;
use crate::models::Coordinates;

/// 反向地理编码能力
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, coordinates: Coordinates) -> AppResult<AddressComponents>;
}

/// Nominatim 实现
pub struct NominatimGeocoder {
    client: GeocodeClient,
    policy: ServicePolicy,
}

impl NominatimGeocoder {
    pub fn new(client: GeocodeClient, policy: ServicePolicy) -> Self {
        Self { client, policy }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> AppResult<AddressComponents> {
        let client = &self.client;
        self.policy
            .run("geocoder", || {
                client.reverse(coordinates.latitude, coordinates.longitude)
            })
            .await
    }
}

/// 从地址中取行政大区：优先 `state`，其次 `region`
pub fn region_of(address: &AddressComponents) -> Option<String> {
    address
        .state
        .as_deref()
        .or(address.region.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 解析经纬度所在的大区
///
/// 服务成功但响应里没有大区字段时返回 `Ok(None)`
pub async fn resolve_region(
    geocoder: &dyn Geocoder,
    coordinates: Coordinates,
) -> AppResult<Option<String>> {
    let address = geocoder.reverse(coordinates).await?;
    Ok(region_of(&address))
}
