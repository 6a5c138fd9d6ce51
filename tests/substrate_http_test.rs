//! Substrate adapters against mocked HTTP backends.

use std::sync::Arc;

use interviewer::domain::ports::{
    ExecutionParameters, HealthStatus, LlmSubstrate, SubstrateError, SubstrateRequest,
};
use interviewer::infrastructure::substrates::{
    AnthropicApiConfig, AnthropicApiSubstrate, OllamaConfig, OllamaSubstrate,
};
use interviewer::EvaluationService;
use mockito::{Matcher, Server};
use serde_json::json;

fn ollama(server: &Server) -> OllamaSubstrate {
    OllamaSubstrate::new(OllamaConfig {
        model: "phi3:mini".to_string(),
        base_url: server.url(),
        requests_per_second: 100,
    })
    .unwrap()
}

fn anthropic(server: &Server) -> AnthropicApiSubstrate {
    AnthropicApiSubstrate::new(AnthropicApiConfig {
        api_key: "test-key".to_string(),
        model: "claude-3-5-haiku-latest".to_string(),
        base_url: server.url(),
        requests_per_second: 100,
    })
    .unwrap()
}

fn json_request(prompt: &str) -> SubstrateRequest {
    SubstrateRequest::new(prompt).with_parameters(ExecutionParameters {
        max_tokens: Some(256),
        temperature: Some(0.2),
        json_output: true,
    })
}

#[tokio::test]
async fn test_ollama_chat_completion() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({
            "model": "phi3:mini",
            "stream": false,
            "format": "json",
            "messages": [{"role": "user", "content": "Grade this"}],
            "options": {"num_predict": 256}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "model": "phi3:mini",
                "message": {"role": "assistant", "content": "{\"score\": 3, \"remarks\": \"Good\"}"},
                "done": true,
                "prompt_eval_count": 42,
                "eval_count": 11
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = ollama(&server).execute(json_request("Grade this")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content, r#"{"score": 3, "remarks": "Good"}"#);
    assert_eq!(response.model, "phi3:mini");
    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, 42);
    assert_eq!(usage.output_tokens, 11);
}

#[tokio::test]
async fn test_ollama_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body("model crashed")
        .create_async()
        .await;

    let err = ollama(&server)
        .execute(json_request("Grade this"))
        .await
        .unwrap_err();

    assert!(matches!(err, SubstrateError::ExecutionFailed(ref msg) if msg.contains("model crashed")));
}

#[tokio::test]
async fn test_ollama_health_reflects_pulled_models() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"models": [{"name": "phi3:mini"}, {"name": "llama3:8b"}]}).to_string())
        .create_async()
        .await;
    assert_eq!(ollama(&server).health_check().await.unwrap(), HealthStatus::Healthy);

    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"models": [{"name": "llama3:8b"}]}).to_string())
        .create_async()
        .await;
    assert_eq!(ollama(&server).health_check().await.unwrap(), HealthStatus::Degraded);
}

#[tokio::test]
async fn test_anthropic_messages() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-3-5-haiku-latest",
            "max_tokens": 256
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "model": "claude-3-5-haiku-latest",
                "content": [
                    {"type": "text", "text": "{\"score\": 4, "},
                    {"type": "text", "text": "\"remarks\": \"Correct\"}"}
                ],
                "usage": {"input_tokens": 30, "output_tokens": 9}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = anthropic(&server)
        .execute(json_request("Grade this"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.content, r#"{"score": 4, "remarks": "Correct"}"#);
    assert_eq!(response.usage.unwrap().output_tokens, 9);
}

#[tokio::test]
async fn test_anthropic_status_mapping() {
    let mut server = Server::new_async().await;
    let _unauthorized = server
        .mock("POST", "/v1/messages")
        .with_status(401)
        .with_body(r#"{"error": "invalid x-api-key"}"#)
        .create_async()
        .await;

    let err = anthropic(&server)
        .execute(json_request("Grade this"))
        .await
        .unwrap_err();
    assert!(matches!(err, SubstrateError::AuthError(_)));

    let mut server = Server::new_async().await;
    let _limited = server
        .mock("POST", "/v1/messages")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let err = anthropic(&server)
        .execute(json_request("Grade this"))
        .await
        .unwrap_err();
    assert!(matches!(err, SubstrateError::RateLimitExceeded(_)));
}

#[tokio::test]
async fn test_evaluation_over_ollama() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Regex("Candidate Answer: Adds numbers".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "model": "phi3:mini",
                "message": {
                    "role": "assistant",
                    "content": "```json\n{\"score\": 9, \"remarks\": \"Excellent\"}\n```"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let service = EvaluationService::new(Arc::new(ollama(&server)));
    let result = service.evaluate("What does SUM do?", "Adds numbers").await;

    assert_eq!(result.score, 4);
    assert_eq!(result.remarks, "Excellent");
}

#[tokio::test]
async fn test_evaluation_falls_back_when_unreachable() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(503)
        .create_async()
        .await;

    let service = EvaluationService::new(Arc::new(ollama(&server)));
    let result = service.evaluate("What does SUM do?", "Adds numbers").await;

    assert_eq!(result.score, 0);
    assert_eq!(result.remarks, interviewer::domain::models::FALLBACK_REMARKS);
}
