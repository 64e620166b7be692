//! 薪资抽取服务 - 业务能力层
//!
//! 用抽取式问答向一段非结构化文本提问"月薪是多少"，
//! 再从答案片段中解析第一个数字。问答调用失败作为错误返回，
//! 答案中没有数字只得到 `None`。

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::clients::LlmClient;
use crate::error::AppResult;
use crate::infrastructure::ServicePolicy;

/// 固定的问题
pub const SALARY_QUESTION: &str = "What is the monthly salary?";

/// 第一个数字：支持 `2 500,50`、`3.000`、`36000`、`12,5` 等写法
static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<int>\d{1,3}(?:[ \u{00a0}\u{202f}.]\d{3})+|\d+)(?:[.,](?P<frac>\d+))?",
    )
    .expect("静态正则")
});

/// 抽取式问答能力
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    /// 问题 + 上下文 → 上下文中的答案片段
    async fn answer(&self, question: &str, context: &str) -> AppResult<String>;
}

/// 基于 LLM 的抽取式问答实现
pub struct LlmAnswerer {
    client: Arc<LlmClient>,
    policy: ServicePolicy,
}

impl LlmAnswerer {
    pub fn new(client: Arc<LlmClient>, policy: ServicePolicy) -> Self {
        Self { client, policy }
    }

    fn build_messages(question: &str, context: &str) -> (String, String) {
        let system_message = "你是一个抽取式问答模型。答案必须是上下文中连续出现的原文片段，\
                              原样返回，不要改写、翻译或补充。上下文中没有答案时只返回空字符串。"
            .to_string();
        let user_message = format!("问题：{}\n\n上下文：\n{}", question, context);
        (user_message, system_message)
    }
}

#[async_trait]
impl QuestionAnswerer for LlmAnswerer {
    async fn answer(&self, question: &str, context: &str) -> AppResult<String> {
        let (user_message, system_message) = Self::build_messages(question, context);
        let client = &self.client;
        let user_message = user_message.as_str();
        let system_message = system_message.as_str();

        let span = self
            .policy
            .run("question-answering", || {
                client.send_to_llm(user_message, Some(system_message))
            })
            .await?;

        // 空串表示上下文中没有答案
        Ok(span
            .trim_matches(|c: char| c == '"' || c.is_whitespace())
            .to_string())
    }
}

/// 从答案片段中解析第一个数字
pub fn parse_first_number(answer: &str) -> Option<f64> {
    let caps = FIRST_NUMBER.captures(answer)?;
    let int_part: String = caps
        .name("int")?
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let number = match caps.name("frac") {
        Some(frac) => format!("{}.{}", int_part, frac.as_str()),
        None => int_part,
    };
    number.parse().ok()
}

/// 提问并解析月薪
///
/// 文本为空、答案为空或答案中没有数字时返回 `Ok(None)`；
/// 问答服务本身失败时返回错误，由调用方记录
pub async fn extract_monthly_salary(
    answerer: &dyn QuestionAnswerer,
    text: &str,
) -> AppResult<Option<f64>> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let span = answerer.answer(SALARY_QUESTION, text).await?;
    let salary = parse_first_number(&span);
    debug!("问答片段 '{}' → {:?}", span, salary);
    Ok(salary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    struct FixedAnswer(AppResult<String>);

    #[async_trait]
    impl QuestionAnswerer for FixedAnswer {
        async fn answer(&self, _question: &str, _context: &str) -> AppResult<String> {
            match &self.0 {
                Ok(span) => Ok(span.clone()),
                Err(_) => Err(AppError::service_failed("qa", "down")),
            }
        }
    }

    #[test]
    fn test_parse_first_number_formats() {
        assert_eq!(parse_first_number("36000"), Some(36000.0));
        assert_eq!(parse_first_number("Mensuel de 2 500,50 Euros"), Some(2500.5));
        assert_eq!(parse_first_number("3.000 € par mois"), Some(3000.0));
        assert_eq!(parse_first_number("2500.50"), Some(2500.5));
        assert_eq!(parse_first_number("entre 1\u{202f}800 et 2\u{202f}000"), Some(1800.0));
        assert_eq!(parse_first_number("12,5 euros de l'heure"), Some(12.5));
    }

    #[test]
    fn test_parse_first_number_without_digits() {
        assert_eq!(parse_first_number("selon profil"), None);
        assert_eq!(parse_first_number(""), None);
    }

    #[tokio::test]
    async fn test_extract_monthly_salary_uses_first_number_of_span() {
        let answerer = FixedAnswer(Ok("2 800 € brut".to_string()));
        let salary = extract_monthly_salary(&answerer, "Salaire : 2 800 € brut mensuel").await;
        assert_eq!(salary.unwrap(), Some(2800.0));
    }

    #[tokio::test]
    async fn test_extract_monthly_salary_without_number_gives_none() {
        let no_number = FixedAnswer(Ok("à négocier".to_string()));
        let salary = extract_monthly_salary(&no_number, "Salaire à négocier").await;
        assert_eq!(salary.unwrap(), None);

        let empty = FixedAnswer(Ok(String::new()));
        let salary = extract_monthly_salary(&empty, "Poste en CDI").await;
        assert_eq!(salary.unwrap(), None);

        let answerer = FixedAnswer(Ok("2000".to_string()));
        assert_eq!(extract_monthly_salary(&answerer, "   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_extract_monthly_salary_propagates_service_error() {
        let failing = FixedAnswer(Err(AppError::service_failed("qa", "down")));
        assert!(extract_monthly_salary(&failing, "Salaire : 2 800 €").await.is_err());
    }
}
