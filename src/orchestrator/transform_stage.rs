//! 转换阶段 - 编排层
//!
//! 读取两个暂存文件，依次执行 字段映射 → 取值规范化 → 富化 → 合并，
//! 写出最终数据集。外部服务句柄在这里构造一次后注入富化流程。

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::clients::{GeocodeClient, LlmClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ServicePolicy;
use crate::models::{load_raw_records, Batch, RawRecord};
use crate::services::{LlmAnswerer, LlmTranslator, NominatimGeocoder, WarnWriter};
use crate::utils::logging;
use crate::workflow::{
    map_batch, merge, normalize_record, write_dataset, Enricher, EnrichmentOptions,
    EnrichmentReport, EnrichmentServices, SourceProfile, ADZUNA, FRANCE_TRAVAIL,
};

/// 转换阶段统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    pub adzuna_records: usize,
    pub francetravail_records: usize,
    pub output_records: usize,
    pub enrichment: EnrichmentReport,
}

/// 按配置构造真实服务的富化流程
pub fn build_enricher(config: &Config) -> Enricher {
    let policy = ServicePolicy::new(config);
    let llm = Arc::new(LlmClient::new(config));

    let services = EnrichmentServices {
        translator: Arc::new(LlmTranslator::new(Arc::clone(&llm), policy)),
        answerer: Arc::new(LlmAnswerer::new(llm, policy)),
        geocoder: Arc::new(NominatimGeocoder::new(GeocodeClient::new(config), policy)),
    };

    Enricher::new(services, EnrichmentOptions::new(config))
        .with_warn_writer(WarnWriter::with_path(config.warn_file.as_str()))
}

/// 处理一个来源：映射、规范化、富化
pub async fn process_source(
    raws: &[RawRecord],
    profile: &SourceProfile,
    enricher: &Enricher,
) -> (Batch, EnrichmentReport) {
    let Batch {
        source,
        schema,
        records,
    } = map_batch(raws, profile);

    let normalized = records
        .into_iter()
        .map(|record| normalize_record(record, profile))
        .collect();

    enricher
        .enrich_batch(Batch::new(source, schema, normalized), profile)
        .await
}

/// 处理两个来源并合并，Adzuna 在前
pub async fn transform_records(
    adzuna: &[RawRecord],
    francetravail: &[RawRecord],
    enricher: &Enricher,
) -> AppResult<(Batch, EnrichmentReport)> {
    let (first, mut report) = process_source(adzuna, &ADZUNA, enricher).await;
    let (second, second_report) = process_source(francetravail, &FRANCE_TRAVAIL, enricher).await;
    report.absorb(second_report);

    Ok((merge(first, second)?, report))
}

/// 运行转换阶段
pub async fn run_transform_stage(config: &Config) -> Result<TransformStats> {
    logging::log_stage_start("Transform", None);

    let adzuna = load_raw_records(Path::new(&config.adzuna_staging_file))
        .await
        .with_context(|| format!("读取 {} 失败", config.adzuna_staging_file))?;
    let francetravail = load_raw_records(Path::new(&config.francetravail_staging_file))
        .await
        .with_context(|| format!("读取 {} 失败", config.francetravail_staging_file))?;

    let enricher = build_enricher(config);
    let (merged, report) = transform_records(&adzuna, &francetravail, &enricher)
        .await
        .context("合并失败")?;

    info!(
        "🧩 富化: 翻译 {} 条, 抽取薪资 {} 条, 解析大区 {} 条",
        report.translated, report.salaries_extracted, report.regions_resolved
    );

    write_dataset(Path::new(&config.output_file), &merged)
        .await
        .with_context(|| format!("写入 {} 失败", config.output_file))?;

    logging::print_stage_stats("Transform", merged.len(), report.failures, &config.output_file);

    Ok(TransformStats {
        adzuna_records: adzuna.len(),
        francetravail_records: francetravail.len(),
        output_records: merged.len(),
        enrichment: report,
    })
}
