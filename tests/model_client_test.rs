// ABOUTME: Tests for the local model client against a stand-in runtime on 127.0.0.1
// ABOUTME: Request shape, response clean-up, connectivity states and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::init_test_logging;
use prompt_forge::config::ModelTimeouts;
use prompt_forge::errors::{AppError, ErrorCode};
use prompt_forge::llm::{
    ConnectionStatus, GenerateOptions, LocalModelClient, LocalModelConfig, ModelClient,
    ModelClientError,
};
use prompt_forge::models::OutputFormat;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const FAST: ModelTimeouts = ModelTimeouts {
    generate: Duration::from_millis(300),
    check: Duration::from_millis(300),
};

/// Serve `router` on an ephemeral loopback port and return its base URL
async fn spawn_runtime(router: Router) -> Result<String> {
    init_test_logging();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://{addr}"))
}

fn client(base_url: &str, model: &str) -> Result<LocalModelClient> {
    Ok(LocalModelClient::new(
        Some(LocalModelConfig {
            provider: "ollama".into(),
            base_url: base_url.into(),
            model: model.into(),
        }),
        FAST,
    )?)
}

fn tags(names: &'static [&'static str]) -> Router {
    Router::new().route(
        "/api/tags",
        get(move || async move {
            let models: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
            Json(json!({ "models": models }))
        }),
    )
}

#[tokio::test]
async fn test_generate_sends_non_streaming_request_and_cleans_reply() -> Result<()> {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/api/generate",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(body);
                Json(json!({
                    "response": "```markdown\n# Rain\nSoft rain on slate.\n```\nWord count: 4",
                    "done": true
                }))
            }
        }),
    );
    let base_url = spawn_runtime(router).await?;
    let client = client(&base_url, "llama3")?;

    let options = GenerateOptions {
        temperature: Some(0.5),
        format: Some(OutputFormat::Markdown),
    };
    let reply = client.generate("a poem about rain", &options).await?;
    assert_eq!(reply, "```markdown\n# Rain\nSoft rain on slate.\n```");

    let plain = client
        .generate("a poem about rain", &GenerateOptions::default())
        .await?;
    assert_eq!(plain, "# Rain\nSoft rain on slate.");

    let requests = seen.lock().unwrap().clone();
    assert_eq!(
        requests[0],
        json!({
            "model": "llama3",
            "prompt": "a poem about rain",
            "stream": false,
            "options": { "temperature": 0.5 }
        })
    );
    assert!(requests[1].get("options").is_none());
    Ok(())
}

#[tokio::test]
async fn test_generate_error_mapping() -> Result<()> {
    let router = Router::new()
        .route(
            "/missing/api/generate",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "model 'phi3' not found, try pulling it first" })),
                )
            }),
        )
        .route(
            "/broken/api/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "out of memory") }),
        )
        .route("/garbled/api/generate", post(|| async { "not json" }));
    let base_url = spawn_runtime(router).await?;
    let options = GenerateOptions::default();

    let error = client(&format!("{base_url}/missing"), "phi3")?
        .generate("hi", &options)
        .await
        .unwrap_err();
    assert!(matches!(error, ModelClientError::ModelNotFound { ref model } if model == "phi3"));
    assert_eq!(AppError::from(error).code, ErrorCode::ResourceNotFound);

    let error = client(&format!("{base_url}/broken"), "llama3")?
        .generate("hi", &options)
        .await
        .unwrap_err();
    assert!(matches!(error, ModelClientError::Protocol { status: 500, ref body } if body == "out of memory"));
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalServiceError);

    let error = client(&format!("{base_url}/garbled"), "llama3")?
        .generate("hi", &options)
        .await
        .unwrap_err();
    assert!(matches!(error, ModelClientError::MalformedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn test_slow_runtime_times_out() -> Result<()> {
    let router = Router::new()
        .route(
            "/api/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "response": "too late" }))
            }),
        )
        .route(
            "/api/tags",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "models": [] }))
            }),
        );
    let base_url = spawn_runtime(router).await?;
    let client = client(&base_url, "llama3")?;

    let error = client
        .generate("hi", &GenerateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(error, ModelClientError::Timeout { .. }));
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalTimeout);
    assert_eq!(client.check_connection().await, ConnectionStatus::Timeout);
    Ok(())
}

#[tokio::test]
async fn test_check_connection_states() -> Result<()> {
    let base_url = spawn_runtime(tags(&["llama3:latest", "mistral"])).await?;

    assert_eq!(
        client(&base_url, "llama3")?.check_connection().await,
        ConnectionStatus::Ok {
            model: "llama3".into()
        }
    );
    assert_eq!(
        client(&base_url, "phi3")?.check_connection().await,
        ConnectionStatus::ModelNotFound {
            model: "phi3".into(),
            available: vec!["llama3:latest".into(), "mistral".into()],
        }
    );

    let empty = spawn_runtime(tags(&[])).await?;
    assert_eq!(
        client(&empty, "llama3")?.check_connection().await,
        ConnectionStatus::NoModelsFound
    );
    Ok(())
}

#[tokio::test]
async fn test_nothing_listening_is_unreachable() -> Result<()> {
    init_test_logging();
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let base_url = format!("http://{}", listener.local_addr()?);
    drop(listener);
    let client = client(&base_url, "llama3")?;

    assert!(matches!(
        client.check_connection().await,
        ConnectionStatus::Unreachable { .. }
    ));
    let error = client
        .generate("hi", &GenerateOptions::default())
        .await
        .unwrap_err();
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalServiceUnavailable);
    Ok(())
}

#[tokio::test]
async fn test_unconfigured_and_non_loopback_clients() -> Result<()> {
    init_test_logging();
    let unconfigured = LocalModelClient::new(None, FAST)?;
    assert_eq!(unconfigured.check_connection().await, ConnectionStatus::NotConfigured);
    let error = unconfigured
        .generate("hi", &GenerateOptions::default())
        .await
        .unwrap_err();
    assert_eq!(AppError::from(error).code, ErrorCode::ConfigMissing);

    let remote = client("http://10.0.0.5:11434", "llama3").err().unwrap();
    assert_eq!(
        remote.downcast_ref::<AppError>().map(|e| e.code),
        Some(ErrorCode::ConfigInvalid)
    );
    Ok(())
}
