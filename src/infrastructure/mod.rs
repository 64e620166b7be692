pub mod js_executor;
pub mod service_policy;

pub use js_executor::JsExecutor;
pub use service_policy::ServicePolicy;
