use hookviral::filter::{passes_filter, word_count, MAX_HOOKS, MAX_HOOK_WORDS};
use hookviral::{HookError, HookGenerator, HookRequest, HookSource, OpenAIProvider, Style};
use serde_json::json;

fn request(topic: &str, niche: &str) -> HookRequest {
    HookRequest {
        topic: Some(topic.to_string()),
        niche: Some(niche.to_string()),
        ..Default::default()
    }
}

/// Wrap a hooks payload the way the chat-completion endpoint returns it
fn chat_body(hooks: serde_json::Value) -> String {
    json!({
        "model": "gpt-4o-mini",
        "choices": [{"message": {"content": json!({ "hooks": hooks }).to_string()}}]
    })
    .to_string()
}

async fn model_generator(server: &mockito::ServerGuard) -> HookGenerator {
    let provider = OpenAIProvider::with_base_url(
        "fake_api_key".to_string(),
        server.url(),
        "gpt-4o-mini".to_string(),
    );
    HookGenerator::new(Some(Box::new(provider)))
}

#[tokio::test]
async fn test_morning_routine_without_credential() {
    let generator = HookGenerator::fallback_only();
    let mut req = request("morning routine", "fitness");
    req.style = Some("story".to_string());
    req.spice_level = Some(5.0);

    let response = generator.generate_hooks(&req).await.unwrap();

    assert_eq!(response.source, "fallback");
    assert_eq!(response.count, 10);
    assert_eq!(response.hooks.len(), 10);
    assert_eq!(response.spice_level, 4);
    assert_eq!(response.style, "story");
    for hook in &response.hooks {
        assert!(hook.word_count <= MAX_HOOK_WORDS);
        let lower = hook.text.to_lowercase();
        assert!(lower.contains("morning") || lower.contains("routine"));
    }
}

#[tokio::test]
async fn test_template_opener_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!([
            {"text": "I was doing this wrong for years"},
            {"text": "Your protein timing is wrecking your morning routine"}
        ])))
        .create_async()
        .await;

    let generator = model_generator(&server).await;
    let response = generator
        .generate_hooks(&request("morning routine", "fitness"))
        .await
        .unwrap();

    assert_eq!(response.source, "model");
    assert_eq!(response.count, 1);
    assert_eq!(
        response.hooks[0].text,
        "Your protein timing is wrecking your morning routine"
    );
}

#[tokio::test]
async fn test_long_candidate_is_rejected() {
    let fourteen = "Your morning routine is missing the one habit that makes every other habit stick";
    assert_eq!(word_count(fourteen), 14);

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!([{ "text": fourteen, "wordCount": 9 }])))
        .create_async()
        .await;

    let generator = model_generator(&server).await;
    let response = generator
        .generate_hooks(&request("morning routine", "fitness"))
        .await
        .unwrap();

    assert_eq!(response.source, "model");
    assert!(response.hooks.is_empty());
    assert_eq!(response.count, 0);
}

#[tokio::test]
async fn test_missing_style_defaults_to_mixed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::Regex("Default style tag: mixed".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!([{ "text": "Meal prep saved my Sunday nights" }])))
        .create_async()
        .await;

    let generator = model_generator(&server).await;
    let response = generator
        .generate_hooks(&request("meal prep", "food"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.style, Style::Mixed.as_str());
    assert_eq!(response.hooks[0].style, "mixed");
}

#[tokio::test]
async fn test_unknown_niche_uses_default_profile() {
    let generator = HookGenerator::fallback_only();
    let response = generator
        .generate_hooks(&request("knots", "underwater-basket-weaving"))
        .await
        .unwrap();

    assert_eq!(response.niche, "underwater-basket-weaving");
    assert_eq!(response.count, 10);
}

#[tokio::test]
async fn test_empty_topic_is_a_validation_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let generator = model_generator(&server).await;
    let result = generator.generate_hooks(&request("", "fitness")).await;

    assert!(matches!(result, Err(HookError::Validation(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_model_http_failure_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "The server had an error"}}"#)
        .create_async()
        .await;

    let generator = model_generator(&server).await;
    let req = request("cold plunge", "fitness").validate().unwrap();
    let generation = generator.generate(&req).await;

    match &generation.source {
        HookSource::Fallback { reason } => assert!(reason.contains("server had an error")),
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_eq!(generation.hooks.len(), 10);
}

#[tokio::test]
async fn test_results_are_capped_and_ordered() {
    let hooks: Vec<_> = (1..=15)
        .map(|i| json!({ "text": format!("Budget mistake {} costs you money", i) }))
        .collect();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!(hooks)))
        .create_async()
        .await;

    let generator = model_generator(&server).await;
    let response = generator
        .generate_hooks(&request("budget", "finance"))
        .await
        .unwrap();

    assert_eq!(response.count, MAX_HOOKS);
    assert_eq!(response.hooks[0].text, "Budget mistake 1 costs you money");
    assert_eq!(response.hooks[9].text, "Budget mistake 10 costs you money");
}

#[tokio::test]
async fn test_both_branches_satisfy_the_filter() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(json!([
            {"text": "Nobody talks about sleep debt"},
            {"text": "Sleep debt is why your squat stalled"},
            {"text": "   Eight hours   is a minimum  "}
        ])))
        .create_async()
        .await;

    let from_model = model_generator(&server)
        .await
        .generate_hooks(&request("sleep", "fitness"))
        .await
        .unwrap();
    let from_templates = HookGenerator::fallback_only()
        .generate_hooks(&request("sleep", "fitness"))
        .await
        .unwrap();

    assert_eq!(from_model.count, 2);
    for hook in from_model.hooks.iter().chain(from_templates.hooks.iter()) {
        assert!(passes_filter(&hook.text), "{:?}", hook.text);
        assert_eq!(hook.word_count, word_count(&hook.text));
    }
}
