use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use job_aggregator::clients::AddressComponents;
use job_aggregator::error::{AppError, AppResult};
use job_aggregator::models::{load_raw_records, Coordinates, RawRecord, UNKNOWN};
use job_aggregator::orchestrator::{process_source, transform_records};
use job_aggregator::services::{Geocoder, QuestionAnswerer, Translator, WarnWriter};
use job_aggregator::workflow::{
    map_record, normalize_record, write_dataset, Enricher, EnrichmentOptions, EnrichmentServices,
    ADZUNA, FRANCE_TRAVAIL,
};
use job_aggregator::JobRecord;

// ========== 假服务 ==========

struct PrefixTranslator;

#[async_trait]
impl Translator for PrefixTranslator {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> AppResult<String> {
        Ok(format!("[{}] {}", target, text))
    }
}

struct FailingTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::service_failed("translator", "quota exceeded"))
    }
}

struct NoAnswer;

#[async_trait]
impl QuestionAnswerer for NoAnswer {
    async fn answer(&self, _question: &str, _context: &str) -> AppResult<String> {
        Ok("non précisé".to_string())
    }
}

struct StateGeocoder(&'static str);

#[async_trait]
impl Geocoder for StateGeocoder {
    async fn reverse(&self, _coordinates: Coordinates) -> AppResult<AddressComponents> {
        Ok(AddressComponents {
            state: Some(self.0.to_string()),
            ..Default::default()
        })
    }
}

fn enricher_with(translator: Arc<dyn Translator>) -> Enricher {
    Enricher::new(
        EnrichmentServices {
            translator,
            answerer: Arc::new(NoAnswer),
            geocoder: Arc::new(StateGeocoder("Auvergne-Rhône-Alpes")),
        },
        EnrichmentOptions::default(),
    )
}

fn raw(pairs: &[(&str, &str)]) -> RawRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn adzuna_row(title: &str, category: &str) -> RawRecord {
    raw(&[
        ("title", title),
        ("company", "Acme"),
        ("location", "Lyon, Rhône"),
        ("latitude", "45.76"),
        ("longitude", "4.83"),
        ("category", category),
        ("contract_time", "full-time"),
        ("contract_type", "permanent"),
        ("date_posted", "2024-03-01"),
        ("job_url", "https://www.adzuna.fr/details/1"),
        ("salary_min", "36000"),
        ("salary_max", "42000"),
        ("description", "Build data pipelines."),
        ("adref", "ignored"),
    ])
}

fn francetravail_row(title: &str) -> RawRecord {
    raw(&[
        ("title", title),
        ("company", "Mairie"),
        ("location", "Île-de-France"),
        ("description", "Accueil du public."),
        ("contract_kind", "CDD"),
        ("contract_time", "6 Mois"),
        ("date_posted", "2024-03-09"),
        ("job_url", "https://candidat.francetravail.fr/offres/recherche/detail/1"),
        ("sector", "Administration publique générale"),
        ("salary_text", "Mensuel de 1800,00 Euros"),
        ("salary_min", "1800"),
        ("salary_unit", "MONTH"),
    ])
}

// ========== 场景 ==========

#[tokio::test]
async fn test_adzuna_record_is_normalized_and_enriched() {
    let enricher = enricher_with(Arc::new(PrefixTranslator));
    let (batch, report) =
        process_source(&[adzuna_row("Data Engineer", "it-jobs")], &ADZUNA, &enricher).await;

    let record = &batch.records[0];
    assert_eq!(record.category.as_deref(), Some("IT Jobs"));
    assert_eq!(record.employment_type.as_deref(), Some("temps plein"));
    assert_eq!(record.contract_duration.as_deref(), Some("CDI"));
    assert_eq!(record.salary_min, Some(3000.0));
    assert_eq!(record.salary_max, Some(3500.0));
    assert_eq!(record.salary, None);
    assert_eq!(record.location.as_deref(), Some("Auvergne-Rhône-Alpes"));
    assert_eq!(record.description.as_deref(), Some("[fr] Build data pipelines."));
    assert_eq!(report.failures, 0);
}

#[tokio::test]
async fn test_unknown_adzuna_tag_becomes_sentinel() {
    let enricher = enricher_with(Arc::new(PrefixTranslator));
    let (batch, _) = process_source(
        &[adzuna_row("Mystery", "unknown-made-up-tag")],
        &ADZUNA,
        &enricher,
    )
    .await;
    assert_eq!(batch.records[0].category.as_deref(), Some(UNKNOWN));
}

#[tokio::test]
async fn test_translation_failure_keeps_original_description() {
    let dir = tempfile::tempdir().unwrap();
    let warn_path = dir.path().join("warn.txt");

    let translator = Arc::new(FailingTranslator {
        calls: AtomicUsize::new(0),
    });
    let enricher = enricher_with(translator.clone())
        .with_warn_writer(WarnWriter::with_path(warn_path.display().to_string()));

    let rows = vec![adzuna_row("A", "it-jobs"), adzuna_row("B", "sales-jobs")];
    let (batch, report) = process_source(&rows, &ADZUNA, &enricher).await;

    assert_eq!(batch.len(), 2);
    assert!(batch
        .records
        .iter()
        .all(|r| r.description.as_deref() == Some("Build data pipelines.")));
    assert_eq!(translator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(report.failures, 2);

    let warnings = std::fs::read_to_string(&warn_path).unwrap();
    assert_eq!(warnings.lines().count(), 2);
    assert!(warnings.starts_with("adzuna | https://www.adzuna.fr/details/1 | translation |"));
}

#[tokio::test]
async fn test_francetravail_values_pass_through() {
    let enricher = enricher_with(Arc::new(PrefixTranslator));
    let (batch, _) =
        process_source(&[francetravail_row("Agent d'accueil")], &FRANCE_TRAVAIL, &enricher).await;

    let record = &batch.records[0];
    assert_eq!(record.category.as_deref(), Some("Administration publique générale"));
    assert_eq!(record.contract_duration.as_deref(), Some("CDD"));
    assert_eq!(record.employment_type.as_deref(), Some("6 Mois"));
    assert_eq!(record.description.as_deref(), Some("Accueil du public."));
    assert_eq!(record.salary_min, Some(1800.0));
    assert_eq!(record.location.as_deref(), Some("Île-de-France"));
}

#[tokio::test]
async fn test_merge_places_adzuna_before_francetravail() {
    let enricher = enricher_with(Arc::new(PrefixTranslator));
    let (merged, report) = transform_records(
        &[adzuna_row("a1", "it-jobs"), adzuna_row("a2", "it-jobs")],
        &[francetravail_row("b1"), francetravail_row("b2")],
        &enricher,
    )
    .await
    .unwrap();

    let titles: Vec<_> = merged
        .records
        .iter()
        .map(|r| r.title.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(titles, vec!["a1", "a2", "b1", "b2"]);
    assert_eq!(report.records, 4);
}

#[tokio::test]
async fn test_staging_files_to_combined_csv() {
    let dir = tempfile::tempdir().unwrap();
    let adzuna_path = dir.path().join("adzuna_job_listings.csv");
    let francetravail_path = dir.path().join("francetravail_job_listings.csv");
    let output_path = dir.path().join("combined_job_listings.csv");

    std::fs::write(
        &adzuna_path,
        "title,company,category,contract_time,salary_min,description,job_url\n\
         \"Dev, Rust\",Acme,it-jobs,full_time,36000,\"Line one\nline two\",https://a/1\n",
    )
    .unwrap();
    std::fs::write(
        &francetravail_path,
        "title,company,contract_kind,contract_time,sector,job_url\n\
         Serveur,Bistrot,MIS,Temps plein,Restauration traditionnelle,https://b/1\n",
    )
    .unwrap();

    let adzuna = load_raw_records(&adzuna_path).await.unwrap();
    let francetravail = load_raw_records(&francetravail_path).await.unwrap();
    let enricher = enricher_with(Arc::new(PrefixTranslator));

    let (merged, _) = transform_records(&adzuna, &francetravail, &enricher)
        .await
        .unwrap();
    write_dataset(&output_path, &merged).await.unwrap();

    let written = load_raw_records(&output_path).await.unwrap();
    assert_eq!(written.len(), 2);

    assert_eq!(written[0]["title"], "Dev, Rust");
    assert_eq!(written[0]["category"], "IT Jobs");
    assert_eq!(written[0]["employment_type"], "temps plein");
    assert_eq!(written[0]["salary_min"], "3000.0");
    assert_eq!(written[0]["description"], "[fr] Line one\nline two");
    assert!(!written[0].contains_key("latitude"));

    assert_eq!(written[1]["category"], "Hospitality & Catering Jobs");
    assert_eq!(written[1]["contract_duration"], "temporaire");
    assert_eq!(written[1]["employment_type"], "temps plein");
    assert_eq!(written[1]["salary"], "");
}

// ========== 性质 ==========

#[test]
fn test_mapper_is_total_for_arbitrary_records() {
    let inputs = [
        RawRecord::new(),
        raw(&[("unrelated", "x")]),
        raw(&[("salary_min", "beaucoup"), ("latitude", ""), ("title", "   ")]),
    ];
    for input in &inputs {
        for profile in [&ADZUNA, &FRANCE_TRAVAIL] {
            assert_eq!(map_record(input, profile.field_mapping), JobRecord::default());
        }
    }
}

#[test]
fn test_normalization_is_idempotent_across_sources() {
    for (row, profile) in [
        (adzuna_row("a", "it-jobs"), &ADZUNA),
        (adzuna_row("a", "unknown-made-up-tag"), &ADZUNA),
        (francetravail_row("b"), &FRANCE_TRAVAIL),
    ] {
        let once = normalize_record(map_record(&row, profile.field_mapping), profile);
        let twice = normalize_record(once.clone(), profile);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_empty_sources_merge_to_empty_dataset() {
    let enricher = enricher_with(Arc::new(PrefixTranslator));
    let (merged, report) =
        tokio_test::block_on(transform_records(&[], &[], &enricher)).unwrap();
    assert!(merged.is_empty());
    assert_eq!(report.records, 0);
}
