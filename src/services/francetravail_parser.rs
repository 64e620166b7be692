//! France Travail 页面解析 - 业务能力层
//!
//! 只负责把 HTML 文本解析成卡片 / 详情结构，不持有浏览器

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::models::{OfferCard, OfferDetail};

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("静态 CSS 选择器")
}

/// 结果列表中的卡片
pub const RESULT_CARD_SELECTOR: &str = "li.result";
/// "Afficher les 20 offres suivantes" 按钮
pub const NEXT_PAGE_SELECTOR: &str = "a.btn-primary[href*='afficherplusderesultats']";

static CARD: LazyLock<Selector> = LazyLock::new(|| selector(RESULT_CARD_SELECTOR));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h2.t4"));
static SUBTEXT: LazyLock<Selector> = LazyLock::new(|| selector("p.subtext"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector("p.description"));
static CONTRACT: LazyLock<Selector> = LazyLock::new(|| selector("p.contrat"));
static DATE: LazyLock<Selector> = LazyLock::new(|| selector("p.date"));

static ADDRESS_REGION: LazyLock<Selector> =
    LazyLock::new(|| selector("[itemprop='addressRegion']"));
static INDUSTRY: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='industry']"));
static BASE_SALARY: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='baseSalary']"));
static MIN_VALUE: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='minValue']"));
static MAX_VALUE: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='maxValue']"));
static SINGLE_VALUE: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='value']"));
static UNIT_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop='unitText']"));

/// 解析结果列表页
///
/// # 参数
/// - `html`: 页面 HTML
/// - `origin`: 相对链接的域名前缀
pub fn parse_result_cards(html: &str, origin: &str) -> Vec<OfferCard> {
    let document = Html::parse_document(html);
    document
        .select(&CARD)
        .map(|card| parse_card(card, origin))
        .collect()
}

fn parse_card(card: ElementRef<'_>, origin: &str) -> OfferCard {
    let url = card
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| absolute_url(origin, href));

    let subtext = card.select(&SUBTEXT).next();
    let company = subtext.and_then(first_child_text);
    let location = subtext
        .and_then(|p| p.select(&SPAN).next())
        .map(element_text)
        .and_then(|text| text.rsplit(" - ").next().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());

    let contract = first_text(card, &CONTRACT);
    let (contract_kind, contract_time) = match contract.as_deref() {
        Some(text) => split_contract(text),
        None => (None, None),
    };

    OfferCard {
        title: first_text(card, &TITLE),
        company,
        location,
        description: first_text(card, &DESCRIPTION),
        contract_kind,
        contract_time,
        date_raw: first_text(card, &DATE),
        url,
    }
}

/// `CDD - 6 Mois` → (`CDD`, `6 Mois`)；没有 `-` 时第二项为空
pub fn split_contract(text: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = text.split('-').map(str::trim).collect();
    let kind = parts
        .first()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let time = if parts.len() > 1 {
        parts.last().filter(|s| !s.is_empty()).map(|s| s.to_string())
    } else {
        None
    };
    (kind, time)
}

/// 解析详情页中的微数据
pub fn parse_offer_detail(html: &str) -> OfferDetail {
    let document = Html::parse_document(html);
    let root = document.root_element();

    OfferDetail {
        region: itemprop_value(root, &ADDRESS_REGION),
        sector: itemprop_value(root, &INDUSTRY),
        salary_text: first_text(root, &BASE_SALARY),
        salary_min: itemprop_value(root, &MIN_VALUE)
            .or_else(|| itemprop_value(root, &SINGLE_VALUE))
            .and_then(|v| parse_decimal(&v)),
        salary_max: itemprop_value(root, &MAX_VALUE).and_then(|v| parse_decimal(&v)),
        salary_unit: itemprop_value(root, &UNIT_TEXT),
    }
}

fn absolute_url(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), href)
    }
}

/// 元素的可见文本，空白折叠为单个空格
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// 微数据优先取 `content` 属性，否则取文本
fn itemprop_value(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    element
        .value()
        .attr("content")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| Some(element_text(element)).filter(|s| !s.is_empty()))
}

/// `p.subtext` 的第一个子节点的第一行（公司名）
fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    let first = element.children().next()?;
    let text = match first.value() {
        Node::Text(text) => text.to_string(),
        Node::Element(_) => ElementRef::wrap(first)
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default(),
        _ => return None,
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().ok()
}
