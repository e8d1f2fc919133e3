//! Description assistant against a stand-in model endpoint.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use inventory_app::assistant::DescriptionAssistant;
use inventory_app::config::AssistantConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

async fn generate(
    Path(call): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if params.get("key").map(String::as_str) != Some("test-key") {
        return Err(StatusCode::FORBIDDEN);
    }
    if call != "gemini-2.5-flash:generateContent"
        || body["generationConfig"]["responseMimeType"] != "application/json"
    {
        return Err(StatusCode::BAD_REQUEST);
    }
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let text = if prompt.contains("\"Broken\"") {
        "{\"suggestedDescription\": ".to_string()
    } else {
        json!({
            "suggestedDescription": "ကြာရှည်ခံ ကွင်းဆက်",
            "technicalSpecs": ["428H", "120 links", "O-ring"]
        })
        .to_string()
    };
    Ok(Json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })))
}

async fn model_endpoint() -> String {
    let app = Router::new().route("/v1beta/models/:call", post(generate));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

fn config(endpoint: String, api_key: Option<&str>) -> AssistantConfig {
    AssistantConfig {
        api_key: api_key.map(str::to_string),
        endpoint,
        ..AssistantConfig::default()
    }
}

#[tokio::test]
async fn returns_structured_suggestion() {
    let assistant = DescriptionAssistant::new(&config(model_endpoint().await, Some("test-key")));

    let suggestion = assistant.suggest("Chain", "Drivetrain").await.unwrap();
    assert_eq!(suggestion.suggested_description, "ကြာရှည်ခံ ကွင်းဆက်");
    assert_eq!(suggestion.technical_specs, vec!["428H", "120 links", "O-ring"]);
}

#[tokio::test]
async fn rejected_key_yields_nothing() {
    let assistant = DescriptionAssistant::new(&config(model_endpoint().await, Some("wrong")));
    assert_eq!(assistant.suggest("Chain", "Drivetrain").await, None);
}

#[tokio::test]
async fn malformed_model_output_yields_nothing() {
    let assistant = DescriptionAssistant::new(&config(model_endpoint().await, Some("test-key")));
    assert_eq!(assistant.suggest("Broken", "Frame").await, None);
}

#[tokio::test]
async fn unreachable_endpoint_yields_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    // no configured key: falls back to API_KEY, and either way nothing comes back
    let assistant = DescriptionAssistant::new(&config(format!("http://{}", addr), None));
    assert_eq!(assistant.suggest("Chain", "Drivetrain").await, None);
}
