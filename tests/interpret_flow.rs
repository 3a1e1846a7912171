//! Query interpretation: open-schema tolerance and hard failure on
//! exhausted validation.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::ScriptedModelClient;
use mediamuse::services::QueryInterpreterService;
use mediamuse::MuseError;

fn service(client: Arc<ScriptedModelClient>, max_retries: u32) -> QueryInterpreterService {
    QueryInterpreterService::new(Some(client), "test-model", max_retries)
}

#[tokio::test]
async fn parses_a_full_interpretation() {
    let response = json!({
        "discover_params": {
            "genres": ["thriller"],
            "year_from": 2010,
            "year_to": 2019,
            "original_language": "ko",
            "min_rating": 7.5
        },
        "suggested_titles": [
            {"title": "Memories of Murder", "year": 2003, "rationale": "genre-defining"}
        ]
    })
    .to_string();
    let client = Arc::new(ScriptedModelClient::new(&[&response]));

    let interpretation = service(client, 0)
        .interpret("korean thrillers from the 2010s", None)
        .await
        .unwrap();

    assert_eq!(
        interpretation.discover_params.genres,
        Some(vec!["thriller".to_string()])
    );
    assert_eq!(interpretation.discover_params.min_rating, Some(7.5));
    assert_eq!(interpretation.suggested_titles.len(), 1);
    assert_eq!(interpretation.suggested_titles[0].title, "Memories of Murder");
}

#[tokio::test]
async fn unknown_discover_keys_are_dropped_not_rejected() {
    // discover_params is the one open schema: models love inventing
    // keys like "mood" and the downstream consumer just ignores them.
    let response = json!({
        "discover_params": {"genres": ["drama"], "mood": "melancholic"},
        "suggested_titles": []
    })
    .to_string();
    let client = Arc::new(ScriptedModelClient::new(&[&response]));

    let interpretation = service(client.clone(), 0)
        .interpret("sad dramas", None)
        .await
        .unwrap();

    assert_eq!(client.call_count(), 1);
    assert_eq!(
        interpretation.discover_params.genres,
        Some(vec!["drama".to_string()])
    );
}

#[tokio::test]
async fn unknown_top_level_keys_are_rejected() {
    let bad = json!({
        "discover_params": {},
        "suggested_titles": [],
        "confidence": 0.9
    })
    .to_string();
    let good = json!({
        "discover_params": {},
        "suggested_titles": []
    })
    .to_string();
    let client = Arc::new(ScriptedModelClient::new(&[&bad, &good]));

    let interpretation = service(client.clone(), 1)
        .interpret("anything", None)
        .await
        .unwrap();

    assert_eq!(client.call_count(), 2);
    assert!(interpretation.suggested_titles.is_empty());
}

#[tokio::test]
async fn exhausted_validation_is_surfaced_to_the_caller() {
    // Interactive path: the user must see the failure.
    let client = Arc::new(ScriptedModelClient::new(&["junk", "junk"]));

    let result = service(client.clone(), 1).interpret("anything", None).await;

    assert_eq!(client.call_count(), 2);
    match result {
        Err(MuseError::ValidationExhausted { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected ValidationExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_model_client_yields_empty_interpretation() {
    let service = QueryInterpreterService::new(None, "test-model", 0);

    let interpretation = service.interpret("anything", Some("context")).await.unwrap();

    assert_eq!(interpretation, Default::default());
}
