//! # Job Aggregator
//!
//! 从 Adzuna API 和 France Travail 网站收集职位数据，统一字段与分类，
//! 富化后合并为一个 CSV 数据集
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 页面脚本执行、等待、点击
//! - `ServicePolicy` - 外部调用的超时与重试
//! - `browser/` - 浏览器会话的打开与释放
//! - `clients/` - Adzuna / LLM / Nominatim 的 HTTP 客户端
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条记录
//! - `Translator` / `QuestionAnswerer` / `Geocoder` - 外部服务契约
//! - `francetravail_parser` - 结果卡片与详情页解析
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条记录"的完整处理流程
//! - 字段映射 → 取值规范化 → 富化 → 合并
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - fetch / scrape / transform 三个阶段
//!
//! ## 模块结构

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use error::{AppError, AppResult};
pub use models::{Batch, JobRecord, TargetField, CANONICAL_COLUMNS};
pub use orchestrator::{run_fetch_stage, run_pipeline, run_scrape_stage, run_transform_stage};
pub use workflow::{Enricher, EnrichmentOptions, EnrichmentServices};
