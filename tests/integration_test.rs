use notable_editor::clients::{NotableBackend, NotableClient};
use notable_editor::error::{AppError, EditError, UpstreamError};
use notable_editor::{Config, EditOptions, InputRecord, NotableEditor};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        session_key: "test-key".to_string(),
        max_concurrent_requests: 4,
        ..Config::default()
    }
}

async fn mount_reference_data(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(
            "/servicesNS/nobody/SA-ThreatIntelligence/storage/collections/data/reviewstatuses",
        ))
        .and(header("Authorization", "Splunk test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_key": "1", "label": "New", "status": "1", "disabled": "0", "status_type": "notable"},
            {"_key": "2", "label": "In Progress", "status": "2", "disabled": "0", "status_type": "notable"},
            {"_key": "5", "label": "Closed", "status": "5", "disabled": "0", "status_type": "notable"},
            {"_key": "9", "label": "Archived", "status": "9", "disabled": "1", "status_type": "notable"},
            {"_key": "d1", "label": "True Positive", "status": "disposition:1", "disabled": "0",
             "status_type": "disposition", "description": "Confirmed malicious"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .and(body_string_contains("exec_mode=oneshot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"urgency": "critical"},
                {"urgency": "high"},
                {"urgency": "medium"},
                {"urgency": "low"},
                {"urgency": "informational"}
            ]
        })))
        .mount(server)
        .await;
}

fn records(ids: &[&str]) -> Vec<InputRecord> {
    ids.iter()
        .map(|id| InputRecord::from_pairs([("event_id", *id)]))
        .collect()
}

#[tokio::test]
async fn test_client_reads_reference_data() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    let client = NotableClient::new(&config_for(&server)).unwrap();

    let statuses = client.list_review_statuses().await.unwrap();
    assert_eq!(statuses.len(), 5);
    assert!(statuses[3].disabled);

    let urgencies = client.list_urgencies().await.unwrap();
    assert_eq!(urgencies, vec!["critical", "high", "medium", "low", "informational"]);
}

#[tokio::test]
async fn test_bulk_edit_sends_one_request_with_all_ids() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/notable_update"))
        .and(header("Authorization", "Splunk test-key"))
        .and(body_string_contains("ruleUIDs=A&ruleUIDs=B&ruleUIDs=C"))
        .and(body_string_contains("status=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "success_count": 3,
            "failure_count": 0,
            "message": "3 events updated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let editor = NotableEditor::initialize(config_for(&server)).unwrap();
    let outcome = editor
        .run(
            &EditOptions::batch().with_status("In Progress"),
            records(&["A", "B", "C"]),
        )
        .await
        .unwrap();

    let output = outcome.records();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0]["success_count"], 3);
}

#[tokio::test]
async fn test_per_record_edit_isolates_failures() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/notable_update"))
        .and(body_string_contains("ruleUIDs=BROKEN"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/notable_update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "success_count": 1,
            "failure_count": 0,
            "message": "1 event updated successfully"
        })))
        .mount(&server)
        .await;

    let input = vec![
        InputRecord::from_pairs([("event_id", "OK1"), ("edit-urgency", "High")]),
        InputRecord::from_pairs([("event_id", "BROKEN"), ("edit-comment", "retry later")]),
        InputRecord::from_pairs([("rule_id", "OK2"), ("edit-disposition", "true positive")]),
        InputRecord::from_pairs([("event_id", "UNTOUCHED")]),
    ];

    let editor = NotableEditor::initialize(config_for(&server)).unwrap();
    let outcome = editor.run(&EditOptions::single(), input).await.unwrap();

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.succeeded(), 2);

    let failures: Vec<Value> = outcome
        .records()
        .into_iter()
        .filter(|r| r["success"] == false)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["successCount"], 0);
    assert_eq!(failures[0]["failureCount"], 1);
    assert!(failures[0]["message"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_invalid_status_never_reaches_update_endpoint() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/notable_update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let editor = NotableEditor::initialize(config_for(&server)).unwrap();
    let err = editor
        .run(&EditOptions::batch().with_status("Archived"), records(&["A"]))
        .await
        .unwrap_err();

    match err {
        AppError::Edit(EditError::InvalidEnumValue { field, valid, .. }) => {
            assert_eq!(field, "status");
            assert_eq!(valid, vec!["closed", "in progress", "new"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_reference_store_outage_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("KV Store is initializing"))
        .mount(&server)
        .await;

    let editor = NotableEditor::initialize(config_for(&server)).unwrap();
    let err = editor
        .run(&EditOptions::batch().with_comment("note"), records(&["A"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Upstream(UpstreamError::ReferenceStoreUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_unparseable_update_response_becomes_failure_result() {
    let server = MockServer::start().await;
    mount_reference_data(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/notable_update"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let backend: Arc<dyn NotableBackend> = Arc::new(NotableClient::new(&config_for(&server)).unwrap());
    let editor = NotableEditor::with_backend(config_for(&server), backend);
    let outcome = editor
        .run(&EditOptions::batch().with_comment("note"), records(&["A", "B"]))
        .await
        .unwrap();

    let output = outcome.records();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0]["success"], false);
    assert_eq!(output[0]["failureCount"], 2);
}
