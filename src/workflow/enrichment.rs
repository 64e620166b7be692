//! 富化流程 - 流程层
//!
//! 核心职责：对一条记录依次执行
//! 1. 描述翻译
//! 2. 薪资问答抽取
//! 3. 经纬度 → 大区
//! 4. 年薪 → 月薪
//!
//! 每一步单独兜底：失败只记日志和 warn.txt，记录保留原值继续流转。
//! 服务句柄由编排层构造后注入。

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::models::{Batch, JobRecord, SalaryPeriod};
use crate::services::region_resolver::resolve_region;
use crate::services::salary_extractor::extract_monthly_salary;
use crate::services::{Geocoder, QuestionAnswerer, Translator, WarnWriter};
use crate::utils::truncate_text;
use crate::workflow::record_ctx::RecordCtx;
use crate::workflow::source_profile::SourceProfile;

/// 富化依赖的外部服务
#[derive(Clone)]
pub struct EnrichmentServices {
    pub translator: Arc<dyn Translator>,
    pub answerer: Arc<dyn QuestionAnswerer>,
    pub geocoder: Arc<dyn Geocoder>,
}

/// 富化选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentOptions {
    pub source_lang: String,
    pub target_lang: String,
    pub extract_salary: bool,
}

impl EnrichmentOptions {
    pub fn new(config: &Config) -> Self {
        Self {
            source_lang: config.translate_source_lang.clone(),
            target_lang: config.translate_target_lang.clone(),
            extract_salary: config.extract_salary,
        }
    }
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// 一个批次的富化统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub records: usize,
    pub translated: usize,
    pub salaries_extracted: usize,
    pub regions_resolved: usize,
    /// 被吞掉的单条失败数
    pub failures: usize,
}

impl EnrichmentReport {
    /// 累加另一个批次的统计
    pub fn absorb(&mut self, other: EnrichmentReport) {
        self.records += other.records;
        self.translated += other.translated;
        self.salaries_extracted += other.salaries_extracted;
        self.regions_resolved += other.regions_resolved;
        self.failures += other.failures;
    }
}

/// 富化流程
///
/// - 不持有任何浏览器资源
/// - 只依赖注入的服务
/// - 单条失败不会中断批次
pub struct Enricher {
    services: EnrichmentServices,
    options: EnrichmentOptions,
    warn_writer: Option<WarnWriter>,
}

impl Enricher {
    pub fn new(services: EnrichmentServices, options: EnrichmentOptions) -> Self {
        Self {
            services,
            options,
            warn_writer: None,
        }
    }

    /// 把单条失败同时追加到 warn 文件
    pub fn with_warn_writer(mut self, warn_writer: WarnWriter) -> Self {
        self.warn_writer = Some(warn_writer);
        self
    }

    /// 富化整个批次，记录数与顺序不变
    pub async fn enrich_batch(&self, batch: Batch, profile: &SourceProfile) -> (Batch, EnrichmentReport) {
        let Batch {
            source,
            schema,
            records,
        } = batch;

        let mut report = EnrichmentReport::default();
        let mut enriched = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let ctx = RecordCtx::new(profile.name, index + 1, record.url.clone());
            enriched.push(self.enrich_record(record, profile, &ctx, &mut report).await);
        }

        report.records = enriched.len();
        (Batch::new(source, schema, enriched), report)
    }

    /// 富化单条记录
    pub async fn enrich_record(
        &self,
        mut record: JobRecord,
        profile: &SourceProfile,
        ctx: &RecordCtx,
        report: &mut EnrichmentReport,
    ) -> JobRecord {
        if profile.translate_description {
            self.translate_description(&mut record, ctx, report).await;
        }
        if self.options.extract_salary {
            self.extract_salary(&mut record, ctx, report).await;
        }
        self.resolve_region(&mut record, ctx, report).await;

        normalize_salary(record)
    }

    async fn translate_description(
        &self,
        record: &mut JobRecord,
        ctx: &RecordCtx,
        report: &mut EnrichmentReport,
    ) {
        let Some(description) = record.description.as_deref() else {
            return;
        };

        let result = self
            .services
            .translator
            .translate(description, &self.options.source_lang, &self.options.target_lang)
            .await;

        match result {
            Ok(translated) if !translated.trim().is_empty() => {
                debug!("{} 🌐 翻译完成: {}", ctx, truncate_text(&translated, 40));
                record.description = Some(translated);
                report.translated += 1;
            }
            Ok(_) => {
                self.record_failure(ctx, "translation", "翻译结果为空，保留原文", report)
                    .await;
            }
            Err(e) => {
                self.record_failure(ctx, "translation", &e.to_string(), report)
                    .await;
            }
        }
    }

    async fn extract_salary(
        &self,
        record: &mut JobRecord,
        ctx: &RecordCtx,
        report: &mut EnrichmentReport,
    ) {
        let Some(context) = record
            .salary_text
            .as_deref()
            .or(record.description.as_deref())
        else {
            return;
        };

        match extract_monthly_salary(self.services.answerer.as_ref(), context).await {
            Ok(Some(salary)) => {
                debug!("{} 💶 抽取月薪: {}", ctx, salary);
                record.salary = Some(salary);
                report.salaries_extracted += 1;
            }
            Ok(None) => {
                record.salary = None;
            }
            Err(e) => {
                record.salary = None;
                self.record_failure(ctx, "salary", &e.to_string(), report)
                    .await;
            }
        }
    }

    async fn resolve_region(
        &self,
        record: &mut JobRecord,
        ctx: &RecordCtx,
        report: &mut EnrichmentReport,
    ) {
        let Some(coordinates) = record.coordinates() else {
            return;
        };

        match resolve_region(self.services.geocoder.as_ref(), coordinates).await {
            Ok(Some(region)) => {
                debug!("{} 📍 {:?} → {}", ctx, record.location, region);
                record.location = Some(region);
                report.regions_resolved += 1;
            }
            Ok(None) => {
                debug!("{} 地理编码响应中没有大区，保留原地点", ctx);
            }
            Err(e) => {
                self.record_failure(ctx, "region", &e.to_string(), report)
                    .await;
            }
        }
    }

    async fn record_failure(
        &self,
        ctx: &RecordCtx,
        stage: &str,
        reason: &str,
        report: &mut EnrichmentReport,
    ) {
        report.failures += 1;
        warn!("{} ⚠️ {} 失败: {}", ctx, stage, reason);

        if let Some(writer) = &self.warn_writer {
            if let Err(e) = writer.write(ctx.source, ctx.url.as_deref(), stage, reason).await {
                error!("{} 写入 {} 失败: {}", ctx, writer.path(), e);
            }
        }
    }
}

/// 年薪换算月薪
pub fn salary_norm(salary: Option<f64>) -> Option<f64> {
    salary.map(|s| s / 12.0)
}

/// 把年薪记录的薪资区间换算为月薪，并把周期标记为月
pub fn normalize_salary(mut record: JobRecord) -> JobRecord {
    if record.salary_period == Some(SalaryPeriod::Annual) {
        record.salary_min = salary_norm(record.salary_min);
        record.salary_max = salary_norm(record.salary_max);
        record.salary_period = Some(SalaryPeriod::Monthly);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::AddressComponents;
    use crate::error::{AppError, AppResult, ServiceError};
    use crate::models::Coordinates;
    use crate::workflow::source_profile::{ADZUNA, FRANCE_TRAVAIL};
    use async_trait::async_trait;

    struct UpperTranslator;

    #[async_trait]
    impl Translator for UpperTranslator {
        async fn translate(&self, text: &str, _source: &str, _target: &str) -> AppResult<String> {
            Ok(text.to_uppercase())
        }
    }

    struct FixedAnswer(&'static str);

    #[async_trait]
    impl QuestionAnswerer for FixedAnswer {
        async fn answer(&self, _question: &str, _context: &str) -> AppResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct DownAnswerer;

    #[async_trait]
    impl QuestionAnswerer for DownAnswerer {
        async fn answer(&self, _question: &str, _context: &str) -> AppResult<String> {
            Err(AppError::service_failed("question-answering", "model unavailable"))
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn reverse(&self, _coordinates: Coordinates) -> AppResult<AddressComponents> {
            Err(AppError::Service(ServiceError::Timeout {
                service: "geocoder".to_string(),
                timeout_secs: 30,
            }))
        }
    }

    fn enricher() -> Enricher {
        Enricher::new(
            EnrichmentServices {
                translator: Arc::new(UpperTranslator),
                answerer: Arc::new(FixedAnswer("2 500 euros")),
                geocoder: Arc::new(FailingGeocoder),
            },
            EnrichmentOptions::default(),
        )
    }

    #[test]
    fn test_salary_norm() {
        assert_eq!(salary_norm(Some(36000.0)), Some(3000.0));
        assert_eq!(salary_norm(Some(1.0)), Some(1.0 / 12.0));
        assert_eq!(salary_norm(None), None);
    }

    #[test]
    fn test_normalize_salary_only_touches_annual_figures() {
        let annual = normalize_salary(JobRecord {
            salary_min: Some(36000.0),
            salary_period: Some(SalaryPeriod::Annual),
            ..Default::default()
        });
        assert_eq!(annual.salary_min, Some(3000.0));
        assert_eq!(annual.salary_period, Some(SalaryPeriod::Monthly));
        assert_eq!(normalize_salary(annual.clone()), annual);

        let unknown = JobRecord {
            salary_min: Some(1800.0),
            ..Default::default()
        };
        assert_eq!(normalize_salary(unknown.clone()), unknown);
    }

    #[tokio::test]
    async fn test_region_failure_keeps_location() {
        let batch = Batch::new(
            "adzuna",
            crate::models::CANONICAL_COLUMNS.to_vec(),
            vec![JobRecord {
                location: Some("Lyon".to_string()),
                latitude: Some(45.76),
                longitude: Some(4.83),
                description: Some("hello".to_string()),
                ..Default::default()
            }],
        );

        let (batch, report) = enricher().enrich_batch(batch, &ADZUNA).await;
        let record = &batch.records[0];
        assert_eq!(record.location.as_deref(), Some("Lyon"));
        assert_eq!(record.description.as_deref(), Some("HELLO"));
        assert_eq!(record.salary, Some(2500.0));
        assert_eq!(report.failures, 1);
        assert_eq!(report.translated, 1);
        assert_eq!(report.records, 1);
    }

    #[tokio::test]
    async fn test_francetravail_descriptions_are_not_translated() {
        let batch = Batch::new(
            "francetravail",
            crate::models::CANONICAL_COLUMNS.to_vec(),
            vec![JobRecord {
                description: Some("Poste en CDI".to_string()),
                salary_text: Some("Mensuel de 2000 Euros".to_string()),
                ..Default::default()
            }],
        );

        let (batch, report) = enricher().enrich_batch(batch, &FRANCE_TRAVAIL).await;
        assert_eq!(batch.records[0].description.as_deref(), Some("Poste en CDI"));
        assert_eq!(report.translated, 0);
        assert_eq!(report.salaries_extracted, 1);
    }

    #[tokio::test]
    async fn test_salary_question_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let warn_path = dir.path().join("warn.txt");

        let enricher = Enricher::new(
            EnrichmentServices {
                translator: Arc::new(UpperTranslator),
                answerer: Arc::new(DownAnswerer),
                geocoder: Arc::new(FailingGeocoder),
            },
            EnrichmentOptions::default(),
        )
        .with_warn_writer(WarnWriter::with_path(warn_path.display().to_string()));

        let batch = Batch::new(
            "francetravail",
            crate::models::CANONICAL_COLUMNS.to_vec(),
            vec![JobRecord {
                url: Some("https://candidat.francetravail.fr/offres/1".to_string()),
                salary_text: Some("Mensuel de 1800,00 Euros".to_string()),
                ..Default::default()
            }],
        );

        let (batch, report) = enricher.enrich_batch(batch, &FRANCE_TRAVAIL).await;
        assert_eq!(batch.records[0].salary, None);
        assert_eq!(report.salaries_extracted, 0);
        assert_eq!(report.failures, 1);

        let warnings = std::fs::read_to_string(&warn_path).unwrap();
        assert_eq!(warnings.lines().count(), 1);
        assert!(warnings.starts_with(
            "francetravail | https://candidat.francetravail.fr/offres/1 | salary |"
        ));
    }
}
