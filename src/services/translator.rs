//! 翻译服务 - 业务能力层
//!
//! 只负责"把一段文本从一种语言翻译成另一种语言"，不关心记录和流程

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::clients::LlmClient;
use crate::error::AppResult;
use crate::infrastructure::ServicePolicy;

/// 翻译能力
#[async_trait]
pub trait Translator: Send + Sync {
    /// 文本 + 源语言 + 目标语言 → 译文
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
        -> AppResult<String>;
}

/// 基于 LLM 的翻译实现
pub struct LlmTranslator {
    client: Arc<LlmClient>,
    policy: ServicePolicy,
}

impl LlmTranslator {
    pub fn new(client: Arc<LlmClient>, policy: ServicePolicy) -> Self {
        Self { client, policy }
    }

    fn build_messages(text: &str, source_lang: &str, target_lang: &str) -> (String, String) {
        let system_message = "你是一个专业的招聘文本翻译器。只输出译文，不要添加解释、引号或前后缀，\
                              保留原文中的数字、金额、公司名和换行。"
            .to_string();
        let user_message = format!(
            "把下面的文本从 `{}` 翻译成 `{}`：\n\n{}",
            source_lang, target_lang, text
        );
        (user_message, system_message)
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> AppResult<String> {
        debug!("翻译 {} 字符: {} → {}", text.chars().count(), source_lang, target_lang);

        let (user_message, system_message) = Self::build_messages(text, source_lang, target_lang);
        let client = &self.client;
        let user_message = user_message.as_str();
        let system_message = system_message.as_str();

        self.policy
            .run("translator", || client.send_to_llm(user_message, Some(system_message)))
            .await
    }
}
