pub mod adzuna_client;
pub mod geocode_client;
pub mod llm_client;

pub use adzuna_client::AdzunaClient;
pub use geocode_client::{AddressComponents, GeocodeClient};
pub use llm_client::LlmClient;
