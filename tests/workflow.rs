//! End-to-end scenarios through the query service.

mod common;

use std::sync::Arc;

use common::{DownProvider, RuleProvider, orchestrator};
use recipe_rs::agent::prompt::REFUSAL_MESSAGE;
use recipe_rs::agent::response::ERROR_RESPONSE;
use serde_json::json;

#[tokio::test]
async fn chicken_soup_runs_every_stage() {
    let provider = Arc::new(RuleProvider::new());
    let response = orchestrator(provider.clone(), true)
        .process("How do I make chicken soup?")
        .await;

    assert!(response.relevant);
    assert!(response.response.contains("Chicken Soup"), "{}", response.response);

    let debug = response.debug_info.unwrap_or_default();
    assert_eq!(
        debug["stages"],
        json!(["classify", "search", "identify_tools", "validate_cookware", "respond"])
    );
    assert_eq!(debug["relevance_check"]["relevant"], true);
    assert_eq!(debug["search"]["tool"], "search_recipes");
    assert_eq!(
        debug["search"]["result"]["results"][0]["title"],
        "Classic Chicken Soup Recipe"
    );
    assert_eq!(
        debug["tools"]["required_cookware"],
        json!(["Little Pot", "Ladle", "Spoon"])
    );
    // The recorded list is validated, not the model's proposed ["Oven"].
    assert_eq!(debug["cookware_validation"]["can_cook"], true);
    assert_eq!(debug["cookware_validation"]["missing_tools"], json!([]));
}

#[tokio::test]
async fn car_engine_is_refused_verbatim() {
    let provider = Arc::new(RuleProvider::new());
    let response = orchestrator(provider.clone(), true)
        .process("How do I fix my car's engine?")
        .await;

    assert!(!response.relevant);
    assert_eq!(response.response, REFUSAL_MESSAGE);
    let debug = response.debug_info.unwrap_or_default();
    assert_eq!(debug["relevance_check"]["relevant"], false);
    assert_eq!(debug["stages"], json!(["classify", "respond"]));
    assert!(debug.get("search").is_none());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn no_cookware_skips_validation() {
    let provider = Arc::new(RuleProvider::new().without_extraction());
    let response = orchestrator(provider, true)
        .process("How long should I cook pasta?")
        .await;

    assert!(response.relevant);
    let debug = response.debug_info.unwrap_or_default();
    assert_eq!(
        debug["stages"],
        json!(["classify", "search", "identify_tools", "respond"])
    );
    assert!(debug.get("tools").is_none());
    assert!(debug.get("cookware_validation").is_none());
}

#[tokio::test]
async fn unknown_tool_becomes_error_payload() {
    let provider = Arc::new(RuleProvider::new().with_search_tool("order_takeout"));
    let response = orchestrator(provider, true)
        .process("Give me a soup recipe")
        .await;

    assert!(!response.relevant);
    assert_eq!(response.response, ERROR_RESPONSE);
    let debug = response.debug_info.unwrap_or_default();
    let error = debug["error"].as_str().unwrap_or_default();
    assert!(error.contains("tool 'order_takeout' not found"), "{error}");
    assert!(error.contains("Available tools: validate_query_relevance"), "{error}");
}

#[tokio::test]
async fn provider_outage_becomes_error_payload() {
    let response = orchestrator(Arc::new(DownProvider), true)
        .process("How do I bake bread?")
        .await;

    assert!(!response.relevant);
    assert_eq!(response.response, ERROR_RESPONSE);
    let debug = response.debug_info.clone().unwrap_or_default();
    assert!(
        debug["error"]
            .as_str()
            .is_some_and(|e| e.contains("503 Service Unavailable"))
    );

    let hidden = response.with_debug(false);
    assert!(hidden.debug_info.is_none());
    assert!(!hidden.response.contains("503"));
}

#[tokio::test]
async fn concurrent_queries_are_independent() {
    let service = Arc::new(orchestrator(Arc::new(RuleProvider::new()), true));

    let (soup, car) = tokio::join!(
        service.process("chicken soup recipe please"),
        service.process("Who won the Super Bowl?"),
    );

    assert!(soup.relevant);
    assert!(!car.relevant);
    assert_eq!(car.response, REFUSAL_MESSAGE);
    let soup_debug = soup.debug_info.unwrap_or_default();
    assert_eq!(soup_debug["stages"].as_array().map_or(0, Vec::len), 5);
}
