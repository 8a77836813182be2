//! Integration tests for the LLM operations using wiremock HTTP mocks.

use geolens_llm::{
    analyze_visibility, classify_industry, find_competitors, generate_topics, suggest_audience,
    suggest_moat, CompletionClient, LlmError,
};
use wiremock::matchers::{header, method};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn test_client(base_url: &str) -> CompletionClient {
    CompletionClient::with_base_url("test-key", "test-model", 30, base_url)
        .expect("client construction should not fail")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

/// Matches only requests whose body does NOT contain the given substring.
struct BodyLacks(&'static str);

impl Match for BodyLacks {
    fn matches(&self, request: &Request) -> bool {
        !String::from_utf8_lossy(&request.body).contains(self.0)
    }
}

/// Matches only requests whose body contains the given substring.
struct BodyHas(&'static str);

impl Match for BodyHas {
    fn matches(&self, request: &Request) -> bool {
        String::from_utf8_lossy(&request.body).contains(self.0)
    }
}

#[tokio::test]
async fn classify_strips_quotes_from_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("\"Real Estate\"")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let industry = classify_industry(&client, "We sell houses.", "Acme Homes")
        .await
        .expect("should classify");

    assert_eq!(industry, "Real Estate");
}

#[tokio::test]
async fn classify_submits_only_first_thousand_characters() {
    let server = MockServer::start().await;

    // 1000 filler characters, then a sentinel that must never reach the
    // model. The mock only matches requests lacking the sentinel, so a
    // truncation bug fails with an unmatched request.
    let content = format!("{}{}", "a".repeat(1000), "ZEBRA_SENTINEL");

    Mock::given(method("POST"))
        .and(BodyLacks("ZEBRA_SENTINEL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Retail")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let industry = classify_industry(&client, &content, "Acme")
        .await
        .expect("should classify from truncated content");

    assert_eq!(industry, "Retail");
}

#[tokio::test]
async fn classify_empty_label_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("\"\"")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = classify_industry(&client, "content", "Acme")
        .await
        .expect_err("blank label should fail");
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn find_competitors_parses_fenced_array() {
    let server = MockServer::start().await;

    let content = "```json\n[\
        {\"domain\":\"rival.com\",\"name\":\"Rival\",\"reason\":\"same market\"},\
        {\"domain\":\"other.io\"}\
    ]\n```";

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = find_competitors(&client, "Real Estate", "Austin", "Acme", None)
        .await
        .expect("should parse suggestions");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].domain, "rival.com");
    assert_eq!(suggestions[0].reason.as_deref(), Some("same market"));
}

#[tokio::test]
async fn find_competitors_truncates_content_to_eight_hundred() {
    let server = MockServer::start().await;

    let content = format!("{}{}", "b".repeat(800), "ZEBRA_SENTINEL");

    Mock::given(method("POST"))
        .and(BodyLacks("ZEBRA_SENTINEL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("[{\"domain\":\"rival.com\"}]")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = find_competitors(&client, "Retail", "US", "Acme", Some(&content))
        .await
        .expect("should parse");
    assert_eq!(suggestions.len(), 1);
}

#[tokio::test]
async fn find_competitors_requires_industry_and_region() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    let err = find_competitors(&client, "", "Austin", "Acme", None)
        .await
        .expect_err("empty industry must fail");
    assert!(matches!(err, LlmError::MissingInput("industry")));

    let err = find_competitors(&client, "Real Estate", "  ", "Acme", None)
        .await
        .expect_err("blank region must fail");
    assert!(matches!(err, LlmError::MissingInput("region")));
}

#[tokio::test]
async fn audience_failure_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestion = suggest_audience(&client, "Retail", "content").await;

    assert!(suggestion.persona.is_empty());
    assert!(suggestion.pain_point.is_empty());
}

#[tokio::test]
async fn audience_parses_fenced_object() {
    let server = MockServer::start().await;

    let content = "```json\n{\"persona\": \"store owner\", \"painPoint\": \"foot traffic\"}\n```";

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestion = suggest_audience(&client, "Retail", "content").await;

    assert_eq!(suggestion.persona, "store owner");
    assert_eq!(suggestion.pain_point, "foot traffic");
}

#[tokio::test]
async fn topics_split_from_comma_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "home staging, mortgage rates, curb appeal",
        )))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let topics = generate_topics(&client, "Real Estate").await;

    assert_eq!(topics, vec!["home staging", "mortgage rates", "curb appeal"]);
}

#[tokio::test]
async fn topics_failure_degrades_to_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(generate_topics(&client, "Real Estate").await.is_empty());
}

#[tokio::test]
async fn moat_returns_stripped_sentence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(BodyHas("Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "\"Acme is the only anvil maker with same-day delivery.\"",
        )))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let moat = suggest_moat(&client, "Acme", "anvil maker", "Manufacturing").await;

    assert_eq!(moat, "Acme is the only anvil maker with same-day delivery.");
}

#[tokio::test]
async fn moat_failure_degrades_to_empty_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(suggest_moat(&client, "Acme", "desc", "Retail").await.is_empty());
}

#[tokio::test]
async fn analysis_parses_and_validates_strict_json() {
    let server = MockServer::start().await;

    let content = "```json\n{\
        \"geoScore\": 72,\
        \"summary\": \"Good structure, thin facts\",\
        \"markdownStructure\": {\"score\": 85, \"observation\": \"clean headings\"},\
        \"factDensity\": {\"score\": 55, \"observation\": \"few numbers\"},\
        \"directAnswerCapability\": {\"score\": 70, \"observation\": \"answers late\"},\
        \"criticalFix\": \"Lead with the answer\"\
    }\n```";

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = analyze_visibility(&client, "# Acme page")
        .await
        .expect("should parse analysis");

    assert_eq!(result.geo_score, 72);
    assert_eq!(result.markdown_structure.score, 85);
    assert_eq!(result.critical_fix, "Lead with the answer");
}

#[tokio::test]
async fn analysis_submits_only_first_fifteen_thousand_characters() {
    let server = MockServer::start().await;

    // 15000 filler characters, then a sentinel that must never reach the
    // model. The mock only matches requests lacking the sentinel, so a
    // truncation bug fails with an unmatched request.
    let content = format!("{}{}", "c".repeat(15_000), "ZEBRA_SENTINEL");

    let body = "{\
        \"geoScore\": 60,\
        \"summary\": \"s\",\
        \"markdownStructure\": {\"score\": 60, \"observation\": \"o\"},\
        \"factDensity\": {\"score\": 60, \"observation\": \"o\"},\
        \"directAnswerCapability\": {\"score\": 60, \"observation\": \"o\"},\
        \"criticalFix\": \"f\"\
    }";

    Mock::given(method("POST"))
        .and(BodyLacks("ZEBRA_SENTINEL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(body)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = analyze_visibility(&client, &content)
        .await
        .expect("should analyze truncated content");
    assert_eq!(result.geo_score, 60);
}

#[tokio::test]
async fn analysis_rejects_out_of_range_scores() {
    let server = MockServer::start().await;

    let content = "{\
        \"geoScore\": 140,\
        \"summary\": \"s\",\
        \"markdownStructure\": {\"score\": 10, \"observation\": \"o\"},\
        \"factDensity\": {\"score\": 10, \"observation\": \"o\"},\
        \"directAnswerCapability\": {\"score\": 10, \"observation\": \"o\"},\
        \"criticalFix\": \"f\"\
    }";

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = analyze_visibility(&client, "content")
        .await
        .expect_err("score of 140 must fail validation");
    assert!(matches!(err, LlmError::InvalidAudit(_)));
}

#[tokio::test]
async fn analysis_without_json_object_is_extraction_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("The page looks fine to me.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = analyze_visibility(&client, "content")
        .await
        .expect_err("prose response must fail extraction");
    assert!(matches!(err, LlmError::Extraction));
}
