// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::domain::models::intent::IntentResult;
use crate::domain::services::llm_service::LLMServiceTrait;
use crate::utils::deadline::within_deadline;
use crate::utils::errors::RankingError;

const INTENT_PROMPT: &str = r#"You extract news query info.

Extract:
- entities (people, orgs, locations, categories, publishers)
- intent (any of "latest", "category", "source", "nearby")

Respond ONLY in JSON with no explanation, no markdown, no code block, no backticks.
Example: {"entities": ["News18"], "intent": ["source"]}
User Query: "#;

/// 意图解析器
///
/// 无状态。调用语言模型把自由文本解析为 `{entities, intent}`，
/// 不重试也不修复格式错误的输出
#[derive(Clone)]
pub struct IntentResolver {
    llm: Arc<dyn LLMServiceTrait>,
}

impl IntentResolver {
    pub fn new(llm: Arc<dyn LLMServiceTrait>) -> Self {
        Self { llm }
    }

    /// 解析查询文本的实体和意图
    ///
    /// # 错误
    ///
    /// * `RankingError::Upstream` - 语言模型调用失败或截止时间到期
    /// * `RankingError::Parse` - 返回内容不是恰好包含两个键的 JSON 对象
    pub async fn resolve(&self, text: &str, deadline: Instant) -> Result<IntentResult, RankingError> {
        let prompt = format!("{}{:?}", INTENT_PROMPT, text);
        let raw = within_deadline(deadline, "intent resolution", self.llm.generate(&prompt)).await??;
        debug!(raw = %raw, "Intent model output");
        parse_intent(&raw)
    }
}

/// 严格解析意图 JSON
pub fn parse_intent(raw: &str) -> Result<IntentResult, RankingError> {
    serde_json::from_str::<IntentResult>(raw.trim()).map_err(|e| {
        error!("Intent JSON parse error: {} - raw: {}", e, raw);
        RankingError::Parse(format!("intent response: {}", e))
    })
}
