use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "jobs.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- Adzuna API 配置 ---
    pub adzuna_app_id: String,
    pub adzuna_app_key: String,
    pub adzuna_base_url: String,
    /// 国家代码（URL 路径的一部分）
    pub adzuna_country: String,
    pub adzuna_results_per_page: u32,
    /// 搜索关键词，为空则不限制
    pub adzuna_query: Option<String>,
    /// 默认抓取页数
    pub adzuna_pages: u32,

    // --- France Travail 抓取配置 ---
    pub francetravail_search_url: String,
    /// 详情页链接的域名前缀
    pub francetravail_origin: String,
    /// 默认翻页次数
    pub francetravail_pages: u32,
    /// 是否访问详情页读取地区与薪资
    pub scrape_detail_pages: bool,
    /// 等待结果列表的最长时间（毫秒）
    pub page_wait_ms: u64,
    /// 每次点击"下一页"后的等待时间（毫秒）
    pub next_page_delay_ms: u64,

    // --- 浏览器配置 ---
    /// 设置后连接已有浏览器的调试端口，否则启动无头浏览器
    pub browser_debug_port: Option<u16>,
    pub browser_executable: Option<String>,

    // --- LLM 配置（翻译与问答） ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,

    // --- 地理编码配置 ---
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,

    // --- 富化配置 ---
    pub translate_source_lang: String,
    pub translate_target_lang: String,
    pub extract_salary: bool,
    /// 外部服务单次调用超时（秒）
    pub service_timeout_secs: u64,
    /// 外部服务失败后的最大重试次数
    pub service_max_retries: u32,

    // --- 文件路径 ---
    pub adzuna_staging_file: String,
    pub francetravail_staging_file: String,
    pub output_file: String,
    pub warn_file: String,
    pub output_log_file: String,

    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adzuna_app_id: String::new(),
            adzuna_app_key: String::new(),
            adzuna_base_url: "https://api.adzuna.com/v1/api/jobs".to_string(),
            adzuna_country: "fr".to_string(),
            adzuna_results_per_page: 20,
            adzuna_query: None,
            adzuna_pages: 10,
            francetravail_search_url:
                "https://candidat.francetravail.fr/offres/recherche?lieux=01P".to_string(),
            francetravail_origin: "https://candidat.francetravail.fr".to_string(),
            francetravail_pages: 5,
            scrape_detail_pages: true,
            page_wait_ms: 10_000,
            next_page_delay_ms: 3_000,
            browser_debug_port: None,
            browser_executable: None,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            geocoder_base_url: "https://nominatim.openstreetmap.org".to_string(),
            geocoder_user_agent: "job_aggregator/0.1".to_string(),
            translate_source_lang: "en".to_string(),
            translate_target_lang: "fr".to_string(),
            extract_salary: true,
            service_timeout_secs: 30,
            service_max_retries: 0,
            adzuna_staging_file: "adzuna_job_listings.csv".to_string(),
            francetravail_staging_file: "francetravail_job_listings.csv".to_string(),
            output_file: "combined_job_listings.csv".to_string(),
            warn_file: "warn.txt".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量读取（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件（文件不存在时使用默认值），再应用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let base = if path.exists() {
            info!("📄 读取配置文件: {}", path.display());
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
            Self::from_toml_str(&content).map_err(|e| match e {
                AppError::File(FileError::TomlParseFailed { source, .. }) => {
                    AppError::File(FileError::TomlParseFailed {
                        path: path.display().to_string(),
                        source,
                    })
                }
                other => other,
            })?
        } else {
            debug!("配置文件 {} 不存在，使用默认配置", path.display());
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 解析 TOML 文本，缺省字段取默认值
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: String::new(),
                source: Box::new(e),
            })
        })
    }

    /// Adzuna 的 app_id 与 app_key 都必须设置
    pub fn require_adzuna_credentials(&self) -> AppResult<()> {
        for (key, value) in [
            ("adzuna_app_id", &self.adzuna_app_id),
            ("adzuna_app_key", &self.adzuna_app_key),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(ConfigError::MissingValue {
                    key: key.to_string(),
                }));
            }
        }
        Ok(())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            adzuna_app_id: env_string("ADZUNA_APP_ID").unwrap_or(self.adzuna_app_id),
            adzuna_app_key: env_string("ADZUNA_APP_KEY").unwrap_or(self.adzuna_app_key),
            adzuna_base_url: env_string("ADZUNA_BASE_URL").unwrap_or(self.adzuna_base_url),
            adzuna_country: env_string("ADZUNA_COUNTRY").unwrap_or(self.adzuna_country),
            adzuna_results_per_page: env_parse("ADZUNA_RESULTS_PER_PAGE")
                .unwrap_or(self.adzuna_results_per_page),
            adzuna_query: env_string("ADZUNA_QUERY").or(self.adzuna_query),
            adzuna_pages: env_parse("ADZUNA_PAGES").unwrap_or(self.adzuna_pages),
            francetravail_search_url: env_string("FRANCETRAVAIL_SEARCH_URL")
                .unwrap_or(self.francetravail_search_url),
            francetravail_origin: env_string("FRANCETRAVAIL_ORIGIN")
                .unwrap_or(self.francetravail_origin),
            francetravail_pages: env_parse("FRANCETRAVAIL_PAGES")
                .unwrap_or(self.francetravail_pages),
            scrape_detail_pages: env_parse("SCRAPE_DETAIL_PAGES")
                .unwrap_or(self.scrape_detail_pages),
            page_wait_ms: env_parse("PAGE_WAIT_MS").unwrap_or(self.page_wait_ms),
            next_page_delay_ms: env_parse("NEXT_PAGE_DELAY_MS").unwrap_or(self.next_page_delay_ms),
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").or(self.browser_debug_port),
            browser_executable: env_string("BROWSER_EXECUTABLE").or(self.browser_executable),
            llm_api_key: env_string("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: env_string("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env_string("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            geocoder_base_url: env_string("GEOCODER_BASE_URL").unwrap_or(self.geocoder_base_url),
            geocoder_user_agent: env_string("GEOCODER_USER_AGENT")
                .unwrap_or(self.geocoder_user_agent),
            translate_source_lang: env_string("TRANSLATE_SOURCE_LANG")
                .unwrap_or(self.translate_source_lang),
            translate_target_lang: env_string("TRANSLATE_TARGET_LANG")
                .unwrap_or(self.translate_target_lang),
            extract_salary: env_parse("EXTRACT_SALARY").unwrap_or(self.extract_salary),
            service_timeout_secs: env_parse("SERVICE_TIMEOUT_SECS")
                .unwrap_or(self.service_timeout_secs),
            service_max_retries: env_parse("SERVICE_MAX_RETRIES")
                .unwrap_or(self.service_max_retries),
            adzuna_staging_file: env_string("ADZUNA_STAGING_FILE")
                .unwrap_or(self.adzuna_staging_file),
            francetravail_staging_file: env_string("FRANCETRAVAIL_STAGING_FILE")
                .unwrap_or(self.francetravail_staging_file),
            output_file: env_string("OUTPUT_FILE").unwrap_or(self.output_file),
            warn_file: env_string("WARN_FILE").unwrap_or(self.warn_file),
            output_log_file: env_string("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            let err = ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type: std::any::type_name::<T>().to_string(),
            };
            warn!("{}，使用默认值", err);
            None
        }
    }
}
