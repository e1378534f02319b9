//! Curl transport against a local HTTP server.

mod common;

use celum_core::client::ApiClient;
use celum_core::config::HttpConfig;
use celum_core::credentials::Credentials;
use celum_core::error::ErrorKind;
use celum_core::http::CurlTransport;
use celum_core::upload::{self, BodyContentType, UploadTarget};
use celum_core::{operations, BinaryData, BinaryPayload, NodeError};
use common::api_server::{self, ServerResponse};
use common::host::{TestHost, API_KEY};
use serde_json::json;
use std::io::Cursor;

fn curl_host(base_url: &str, item: serde_json::Value) -> TestHost {
    TestHost::single(item)
        .with_credentials(Some(json!({"apiKey": API_KEY, "baseUrl": base_url})))
        .with_transport(CurlTransport::new(HttpConfig::default()))
}

#[tokio::test]
async fn get_with_repeated_query_keys() {
    let (base, requests) = api_server::start(|_| ServerResponse::json(200, r#"{"id":42,"name":"logo"}"#));
    let host = curl_host(&base, json!({"assetId": 42, "informationFields": "1,2"}));

    let out = operations::find("getAsset")
        .unwrap()
        .execute(&host, 0)
        .await
        .unwrap();
    assert_eq!(out, json!({"id": 42, "name": "logo"}));

    let requests = requests.lock().unwrap();
    let req = &requests[0];
    assert_eq!(req.method, "GET");
    assert_eq!(
        req.target,
        "/assets/42?locale=en&inclusions=informationFields&inclusions=informationFieldPermissions\
         &inclusions=fileProperties&informationFields=1&informationFields=2"
    );
    assert_eq!(req.header("x-api-key"), Some(API_KEY));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert!(req.header("expect").is_none());
}

#[tokio::test]
async fn post_json_with_full_response() {
    let (base, requests) = api_server::start(|_| ServerResponse::json(201, r#"{"id":77}"#));
    let host = curl_host(
        &base,
        json!({"name": "Brand", "parentId": 3, "returnFullResponse": true}),
    );

    let out = operations::find("createCollection")
        .unwrap()
        .execute(&host, 0)
        .await
        .unwrap();
    assert_eq!(out["statusCode"], 201);
    assert_eq!(out["body"], json!({"id": 77}));
    assert_eq!(out["headers"]["x-request-id"], "test-1");

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].target, "/collections");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"name": "Brand", "parentId": 3}));
}

#[tokio::test]
async fn patch_sends_json_body() {
    let (base, requests) = api_server::start(|_| ServerResponse::json(200, r#"{"id":5}"#));
    let host = curl_host(&base, json!({"assetId": 5, "name": "Renamed"}));
    operations::find("updateAsset")
        .unwrap()
        .execute(&host, 0)
        .await
        .unwrap();
    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].body, br#"{"name":"Renamed"}"#);
}

#[tokio::test]
async fn raw_upload_streams_body() {
    let (base, requests) = api_server::start(|_| ServerResponse::json(200, ""));
    let host = curl_host(&base, json!({}));
    let client = ApiClient::with_credentials(&host, Credentials::new(API_KEY, base.as_str()));

    let payload: Vec<u8> = (0u8..=255).cycle().take(100_000).collect();
    let binary = BinaryData {
        mime_type: Some("image/png".to_string()),
        file_name: Some("logo.png".to_string()),
        payload: BinaryPayload::Stream {
            reader: Box::new(Cursor::new(payload.clone())),
            length: Some(payload.len() as u64),
        },
    };
    let target = UploadTarget {
        url: format!("{base}/upload/abc"),
        content_type: BodyContentType::Raw,
        form_field: "file".to_string(),
        detect_presigned: true,
    };
    let response = upload::upload_binary(&client, &target, binary).await.unwrap();
    assert_eq!(response.status, 200);

    let requests = requests.lock().unwrap();
    let req = &requests[0];
    assert_eq!(req.method, "PUT");
    assert_eq!(req.target, "/upload/abc");
    assert_eq!(req.header("content-type"), Some("image/png"));
    assert_eq!(req.header("content-length"), Some("100000"));
    assert_eq!(req.header("x-api-key"), Some(API_KEY));
    assert_eq!(req.body, payload);
}

#[tokio::test]
async fn raw_upload_of_unknown_length_is_chunked() {
    let (base, requests) = api_server::start(|_| ServerResponse::json(200, ""));
    let host = curl_host(&base, json!({}));
    let client = ApiClient::with_credentials(&host, Credentials::new(API_KEY, base.as_str()));

    let payload: Vec<u8> = (0u8..=250).cycle().take(70_000).collect();
    let binary = BinaryData {
        mime_type: Some("video/mp4".to_string()),
        file_name: Some("clip.mp4".to_string()),
        payload: BinaryPayload::Stream {
            reader: Box::new(Cursor::new(payload.clone())),
            length: None,
        },
    };
    let target = UploadTarget {
        url: format!("{base}/upload/clip"),
        content_type: BodyContentType::Raw,
        form_field: "file".to_string(),
        detect_presigned: true,
    };
    let response = upload::upload_binary(&client, &target, binary).await.unwrap();
    assert_eq!(response.status, 200);

    let requests = requests.lock().unwrap();
    let req = &requests[0];
    assert_eq!(req.method, "PUT");
    assert_eq!(req.header("transfer-encoding"), Some("chunked"));
    assert!(req.header("content-length").is_none());
    assert!(req.header("expect").is_none());
    assert_eq!(req.header("content-type"), Some("video/mp4"));
    assert_eq!(req.body.len(), payload.len());
    assert_eq!(req.body, payload);
}

#[tokio::test]
async fn multipart_upload_names_field_and_file() {
    let (base, requests) = api_server::start(|_| ServerResponse::json(201, "{}"));
    let host = curl_host(
        &base,
        json!({
            "uploadUrl": format!("{base}/upload/form"),
            "bodyContentType": "formData",
        }),
    )
    .with_binary(0, "data", b"PNGDATA", Some("image/png"), Some("logo.png"));

    let out = operations::find("uploadBinary")
        .unwrap()
        .execute(&host, 0)
        .await
        .unwrap();
    assert_eq!(out["uploaded"], true);

    let requests = requests.lock().unwrap();
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert!(req
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data; boundary="));
    let body = String::from_utf8_lossy(&req.body);
    assert!(body.contains(r#"name="file"; filename="logo.png""#));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains("PNGDATA"));
}

#[tokio::test]
async fn not_found_surfaces_status_and_body() {
    let (base, _) = api_server::start(|_| ServerResponse::json(404, r#"{"message":"missing"}"#));
    let host = curl_host(&base, json!({"assetTypeId": 9}));
    let err = operations::find("getAssetType")
        .unwrap()
        .execute(&host, 0)
        .await
        .unwrap_err();
    match err {
        NodeError::ApiRequest { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"message":"missing"}"#);
        }
        other => panic!("expected ApiRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let base = api_server::closed_port_url();
    let host = curl_host(&base, json!({"assetTypeId": 9}));
    let err = operations::find("getAssetType")
        .unwrap()
        .execute(&host, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, NodeError::Network(_)));
    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn credential_check_requires_page_field() {
    let (base, requests) = api_server::start(|req| {
        if req.target == "/collections?page=1&size=1" {
            ServerResponse::json(200, r#"{"page":1,"items":[]}"#)
        } else {
            ServerResponse::json(404, "{}")
        }
    });
    let host = curl_host(&base, json!({}));
    let client = ApiClient::connect(&host).await.unwrap();
    assert!(client.verify().await.unwrap());
    assert_eq!(requests.lock().unwrap().len(), 1);

    let (base, _) = api_server::start(|_| ServerResponse::json(200, r#"{"items":[]}"#));
    let host = curl_host(&base, json!({}));
    let client = ApiClient::connect(&host).await.unwrap();
    assert!(!client.verify().await.unwrap());
}
