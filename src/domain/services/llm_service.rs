// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::settings::LlmSettings;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API key not configured")]
    MissingApiKey,
    #[error("Failed to send request to LLM API: {0}")]
    Request(String),
    #[error("LLM API returned error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response format from LLM API")]
    InvalidResponse,
}

/// 文本生成接口
///
/// 意图解析和摘要生成都建立在这个接口之上，各自负责提示词和输出解析
#[async_trait]
pub trait LLMServiceTrait: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// LLM服务 - 处理与LLM提供商的交互
///
/// # 功能
///
/// 调用 OpenAI 兼容的 `/chat/completions` 接口，返回首个候选的文本内容
///
/// # 配置
///
/// 通过 `[llm]` 配置段：
/// - `api_key` - LLM API密钥
/// - `model` - 使用的模型名称
/// - `api_base_url` - LLM API基础URL
/// - `timeout_secs` - 单次请求超时
pub struct LLMService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
}

#[async_trait]
impl LLMServiceTrait for LLMService {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        LLMService::generate(self, prompt).await
    }
}

impl LLMService {
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone().filter(|key| !key.is_empty()),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn new_with_config(api_key: Option<String>, model: String, api_base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 使用LLM生成文本
    ///
    /// # 参数
    /// * `prompt` - 完整的用户提示词
    ///
    /// # 返回值
    /// * `Result<String, LlmError>` - 模型返回的原始文本，未做任何修复
    ///
    /// # 错误
    /// * 当LLM API密钥未配置时返回错误
    /// * 当LLM服务调用失败或响应缺少内容时返回错误
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingApiKey)?;

        let request_body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a news assistant. You output only valid JSON."
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": 0.0
        });

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| LlmError::InvalidResponse)?;

        if let Some(usage_val) = body.get("usage") {
            let usage = TokenUsage {
                prompt_tokens: usage_val["prompt_tokens"].as_u64().unwrap_or(0) as u32,
                completion_tokens: usage_val["completion_tokens"].as_u64().unwrap_or(0) as u32,
                total_tokens: usage_val["total_tokens"].as_u64().unwrap_or(0) as u32,
            };
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "LLM call completed"
            );
            counter!("llm_tokens_total").increment(u64::from(usage.total_tokens));
        }

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(LlmError::InvalidResponse)
    }
}
