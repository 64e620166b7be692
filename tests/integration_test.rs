use job_aggregator::browser::BrowserSession;
use job_aggregator::clients::{AdzunaClient, GeocodeClient, LlmClient};
use job_aggregator::config::Config;
use job_aggregator::infrastructure::{JsExecutor, ServicePolicy};
use job_aggregator::services::francetravail_parser::{parse_result_cards, RESULT_CARD_SELECTOR};
use job_aggregator::services::{LlmTranslator, NominatimGeocoder, Translator};
use job_aggregator::services::region_resolver::resolve_region;
use job_aggregator::models::Coordinates;
use job_aggregator::utils::logging;
use std::sync::Arc;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_fetch_first_adzuna_page() {
    // 初始化日志
    logging::init(true);

    // 需要 ADZUNA_APP_ID / ADZUNA_APP_KEY
    let config = Config::from_env();
    let client = AdzunaClient::new(&config);

    let jobs = client.fetch_page(1).await.expect("请求 Adzuna 失败");
    println!("第 1 页 {} 条职位", jobs.len());
    assert!(!jobs.is_empty(), "第一页应该有职位");
}

#[tokio::test]
#[ignore]
async fn test_scrape_first_francetravail_page() {
    logging::init(true);

    let config = Config::from_env();
    let session = BrowserSession::open(&config, &config.francetravail_search_url)
        .await
        .expect("打开浏览器失败");

    let executor = JsExecutor::new(session.page().clone());
    let found = executor
        .wait_for_selector(RESULT_CARD_SELECTOR, config.page_wait_ms)
        .await;
    let html = executor.html().await;
    session.shutdown().await;

    assert!(found.is_ok(), "结果列表应该出现");
    let cards = parse_result_cards(&html.expect("读取 HTML 失败"), &config.francetravail_origin);
    println!("找到 {} 张卡片", cards.len());
    assert!(!cards.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_llm_translation() {
    logging::init(true);

    // 需要 LLM_API_KEY
    let config = Config::from_env();
    let translator = LlmTranslator::new(Arc::new(LlmClient::new(&config)), ServicePolicy::new(&config));

    let translated = translator
        .translate("Software engineer, full-time position in Paris.", "en", "fr")
        .await
        .expect("翻译失败");
    println!("翻译结果: {}", translated);
    assert!(!translated.trim().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_reverse_geocode_paris() {
    logging::init(true);

    let config = Config::from_env();
    let geocoder = NominatimGeocoder::new(GeocodeClient::new(&config), ServicePolicy::new(&config));

    let region = resolve_region(
        &geocoder,
        Coordinates {
            latitude: 48.8566,
            longitude: 2.3522,
        },
    )
    .await
    .expect("地理编码失败");
    assert_eq!(region.as_deref(), Some("Île-de-France"));
}
