// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use newsrank::domain::services::llm_service::{LLMService, LlmError, TokenUsage};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer, api_key: Option<&str>) -> LLMService {
        LLMService::new_with_config(
            api_key.map(str::to_string),
            "gpt-4o-mini".to_string(),
            format!("{}/v1/", server.uri()),
        )
    }

    #[tokio::test]
    async fn test_generate_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "model": "gpt-4o-mini", "temperature": 0.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "{\"entities\": [], \"intent\": [\"latest\"]}" } }
                ],
                "usage": { "prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = service(&server, Some("test-key"))
            .generate("latest headlines")
            .await
            .unwrap();
        assert_eq!(reply, r#"{"entities": [], "intent": ["latest"]}"#);
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = service(&server, None).generate("anything").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
        assert!(err.to_string().contains("LLM API key not configured"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = service(&server, Some("k")).generate("q").await.unwrap_err();
        match err {
            LlmError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = service(&server, Some("k")).generate("q").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse));
    }

    #[test]
    fn test_token_usage_serialization() {
        let usage = TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
        };
        let json = serde_json::to_string(&usage).unwrap();
        let deserialized: TokenUsage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.total_tokens, 30);
    }
}
