//! 发布日期解析
//!
//! France Travail 卡片上的日期是相对描述（"il y a 3 jours"），
//! 这里统一换算成 ISO 日期；超过 30 天的只保留固定文本。

use chrono::{Duration, NaiveDate};

/// 超过 30 天的固定文本
pub const MORE_THAN_30_DAYS: &str = "more than 30 days ago";

/// 解析相对日期
///
/// # 参数
/// - `raw`: 卡片上的原文
/// - `today`: 运行当天
///
/// # 返回
/// - `aujourd'hui` → 当天
/// - `hier` → 前一天
/// - `il y a N jours` → 当天减 N 天，数字无法解析或越界时为 `None`
/// - `plus de 30 jours` → [`MORE_THAN_30_DAYS`]
/// - 其他 → 小写原文
pub fn parse_relative_date(raw: &str, today: NaiveDate) -> Option<String> {
    let lowered = raw.trim().to_lowercase().replace('’', "'");
    if lowered.is_empty() {
        return None;
    }

    if lowered.contains("plus de 30 jours") {
        return Some(MORE_THAN_30_DAYS.to_string());
    }
    if lowered.contains("aujourd'hui") {
        return Some(iso(today));
    }
    if lowered.contains("hier") {
        return days_before(today, 1).map(iso);
    }
    if lowered.contains("il y a") {
        let digits: String = lowered.chars().filter(char::is_ascii_digit).collect();
        return digits
            .parse::<i64>()
            .ok()
            .and_then(|days| days_before(today, days))
            .map(iso);
    }

    Some(lowered)
}

/// 越界的天数得到 `None`
fn days_before(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_sub_signed(Duration::try_days(days)?)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
