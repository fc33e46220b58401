//! Integration tests for the resource facades.
//!
//! These tests verify request paths, bodies, query strings and hosts for
//! the facades, and the decoding of their responses.

use std::time::Duration;

use opp_api::rest::resources::{
    CreateCharge, CreateFileUpload, FileUpload, StatusUpdate, UploadFile, FILES_TOKEN_HEADER,
};
use opp_api::rest::ListParams;
use opp_api::{ApiKey, Environment, HostUrl, OppClient, OppConfig, OppError};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, environment: Environment) -> OppClient {
    let config = OppConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .environment(environment)
        .api_host(HostUrl::new(format!("{}/v1", server.uri())).unwrap())
        .files_host(HostUrl::new(format!("{}/files/v1", server.uri())).unwrap())
        .retry_delay(Duration::from_millis(1))
        .build()
        .unwrap();
    OppClient::new(config).unwrap()
}

fn sandbox(server: &MockServer) -> OppClient {
    client(server, Environment::Sandbox)
}

#[tokio::test]
async fn test_create_charge_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "type": "balance",
            "amount": 1000,
            "from_owner_uid": "mer_123",
            "to_owner_uid": "mer_456"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "uid": "cha_1",
            "type": "balance",
            "status": "pending",
            "amount": 1000,
            "currency": "EUR",
            "from_owner_uid": "mer_123",
            "to_owner_uid": "mer_456"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let charge = sandbox(&server)
        .charges()
        .create(CreateCharge {
            charge_type: Some("balance".to_string()),
            amount: Some(1000),
            from_owner_uid: Some("mer_123".to_string()),
            to_owner_uid: Some("mer_456".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(charge.uid, "cha_1");
    assert_eq!(charge.amount, Some(1000));
    assert_eq!(charge.status.as_deref(), Some("pending"));
    assert_eq!(charge.currency.as_deref(), Some("EUR"));
}

#[tokio::test]
async fn test_raw_map_input_is_null_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .and(body_json(json!({
            "type": "balance",
            "amount": 250,
            "metadata": {"order": "42"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "cha_2"})))
        .expect(1)
        .mount(&server)
        .await;

    let raw = json!({
        "type": "balance",
        "amount": 250,
        "description": null,
        "metadata": {"order": "42", "note": null}
    });
    let body = raw.as_object().unwrap().clone();

    let charge = sandbox(&server).charges().create(body).await.unwrap();
    assert_eq!(charge.uid, "cha_2");
}

#[tokio::test]
async fn test_sandbox_only_operation_sends_nothing_in_production() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "tra_1"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, Environment::Production);

    let error = client
        .transactions()
        .update_status("tra_1", StatusUpdate::new("completed"))
        .await
        .unwrap_err();
    assert!(matches!(error, OppError::SandboxOnly(_)));
    assert_eq!(error.code(), 400);
    assert_eq!(
        error.message(),
        "The transactions.update_status operation is only available in sandbox mode"
    );

    let error = client
        .merchants()
        .update_status("mer_1", StatusUpdate::new("live"))
        .await
        .unwrap_err();
    assert!(matches!(error, OppError::SandboxOnly(_)));
}

#[tokio::test]
async fn test_sandbox_only_operation_runs_in_sandbox() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions/tra_1/update-status"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"uid": "tra_1", "status": "completed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transaction = sandbox(&server)
        .transactions()
        .update_status("tra_1", StatusUpdate::new("completed"))
        .await
        .unwrap();
    assert_eq!(transaction.status.as_deref(), Some("completed"));
}

#[tokio::test]
async fn test_identifiers_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/merchants/mer%201%2Fx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "mer 1/x"})))
        .expect(1)
        .mount(&server)
        .await;

    let merchant = sandbox(&server).merchants().get("mer 1/x").await.unwrap();
    assert_eq!(merchant.uid, "mer 1/x");
}

#[tokio::test]
async fn test_empty_identifier_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = sandbox(&server).transactions().get("  ").await.unwrap_err();
    assert!(matches!(error, OppError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_list_sends_paging_and_filters_and_pages_forward() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/merchants"))
        .and(query_param("page", "2"))
        .and(query_param("perpage", "10"))
        .and(query_param("filter[status]", "live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "has_more": true,
            "total_item_count": 25,
            "items_per_page": 10,
            "current_page": 2,
            "last_page": 3,
            "data": [{"uid": "mer_11"}, {"uid": "mer_12"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = ListParams::new().page(2).perpage(10).filter("status", "live");
    let page = sandbox(&server)
        .merchants()
        .list(params.clone())
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].uid, "mer_11");
    assert_eq!(page.total_item_count, Some(25));

    let next = page.next_params(&params).unwrap();
    assert_eq!(next.current_page(), Some(3));
    assert_eq!(next.per_page(), Some(10));
    assert!(next
        .to_query()
        .contains(&("filter[status]".to_string(), "live".to_string())));
}

#[tokio::test]
async fn test_merchant_sub_resource_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/merchants/mer_1/bank_accounts/bnk_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "bnk_1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/merchants/mer_1/profiles/pro_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = sandbox(&server);
    let merchant = client.merchant("mer_1");

    let account = merchant.bank_accounts().get("bnk_1").await.unwrap();
    assert_eq!(account.uid, "bnk_1");

    let response = merchant.profiles().delete("pro_1").await.unwrap();
    assert_eq!(response.code, 204);
    assert!(response.successful());
}

#[tokio::test]
async fn test_file_upload_goes_to_files_host_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/files"))
        .and(body_json(json!({"purpose": "coc_extract", "merchant_uid": "mer_1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "fil_1",
            "token": "tok_abc",
            "purpose": "coc_extract"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/files/v1/uploads/fil_1"))
        .and(header(FILES_TOKEN_HEADER, "tok_abc"))
        .and(header_exists("content-type"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"uid": "fil_1", "name": "kvk.pdf"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = sandbox(&server);
    let upload = client
        .files()
        .create_upload(CreateFileUpload {
            purpose: Some("coc_extract".to_string()),
            merchant_uid: Some("mer_1".to_string()),
            object_uid: None,
        })
        .await
        .unwrap();

    let file = UploadFile::new("kvk.pdf", b"%PDF-1.4".to_vec()).mime_type("application/pdf");
    let uploaded = client.files().upload(&upload, file).await.unwrap();
    assert_eq!(uploaded.name.as_deref(), Some("kvk.pdf"));
}

#[tokio::test]
async fn test_file_upload_without_token_is_validation_error() {
    let server = MockServer::start().await;
    let upload = FileUpload {
        uid: "fil_1".to_string(),
        ..Default::default()
    };

    let error = sandbox(&server)
        .files()
        .upload(&upload, UploadFile::new("a.txt", b"a".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(error, OppError::Validation(_)));
    assert_eq!(error.message(), "The token field is required");
}

#[tokio::test]
async fn test_partner_configuration_has_no_uid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/partners/me/configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "partner_configuration",
            "notify_url": "https://example.com/notify"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let configuration = sandbox(&server)
        .partners()
        .get_configuration()
        .await
        .unwrap();
    assert_eq!(
        configuration.notify_url.as_deref(),
        Some("https://example.com/notify")
    );
}
