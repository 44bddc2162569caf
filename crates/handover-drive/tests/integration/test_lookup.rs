//! Integration tests for item lookups and listings
//!
//! Verifies kind resolution, error classification and `nextPageToken`
//! pagination against a wiremock-based Drive API mock server.

use handover_core::domain::{ItemId, ItemKind};
use handover_core::ports::{IStorageProvider, ProviderError};
use handover_drive::client::{owned_query, DriveClient};
use handover_drive::provider::DriveStorageProvider;
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn id(s: &str) -> ItemId {
    ItemId::new(s.to_string()).unwrap()
}

#[tokio::test]
async fn test_get_file_sends_bearer_token() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("GET"))
        .and(path("/files/doc1"))
        .and(bearer_token(common::TOKEN))
        .and(query_param("supportsAllDrives", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::file_json("doc1", "a.txt")))
        .expect(1)
        .mount(&server)
        .await;

    let file = client.get_file("doc1").await.expect("get_file failed");
    assert_eq!(file.name, "a.txt");
    assert!(!file.is_folder());
}

#[tokio::test]
async fn test_provider_resolves_by_kind() {
    let (server, provider) = common::setup_provider().await;
    common::mount_item(&server, common::file_json("doc1", "a.txt")).await;
    common::mount_item(&server, common::folder_json("dir1", "Docs")).await;

    let file = provider.get_file(&id("doc1")).await.unwrap();
    assert_eq!(file.kind, ItemKind::File);
    assert_eq!(file.size, Some(512));
    assert_eq!(file.owner.as_deref(), Some("me@example.com"));

    let folder = provider.get_folder(&id("dir1")).await.unwrap();
    assert_eq!(folder.name, "Docs");

    let err = provider.get_folder(&id("doc1")).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::WrongKind {
            id: id("doc1"),
            expected: ItemKind::Folder,
            actual: ItemKind::File,
        }
    );
    assert!(err.is_unresolved());

    assert!(matches!(
        provider.get_file(&id("dir1")).await,
        Err(ProviderError::WrongKind { .. })
    ));
}

#[tokio::test]
async fn test_lookup_errors_are_classified() {
    let (server, provider) = common::setup_provider().await;
    common::mount_item_error(&server, "gone", 404, "notFound").await;
    common::mount_item_error(&server, "secret", 403, "insufficientFilePermissions").await;
    common::mount_item_error(&server, "expired", 401, "authError").await;
    common::mount_item_error(&server, "flaky", 500, "backendError").await;

    assert!(matches!(
        provider.get_file(&id("gone")).await,
        Err(ProviderError::NotFound(_))
    ));
    assert!(matches!(
        provider.get_file(&id("secret")).await,
        Err(ProviderError::AccessDenied(_))
    ));
    assert!(matches!(
        provider.get_folder(&id("expired")).await,
        Err(ProviderError::AccessDenied(_))
    ));
    assert_eq!(
        provider.get_file(&id("flaky")).await.unwrap_err(),
        ProviderError::Unknown("backendError: flaky.".to_string())
    );
}

#[tokio::test]
async fn test_child_listings_split_by_kind() {
    let (server, provider) = common::setup_provider().await;
    common::mount_children(
        &server,
        "root1",
        json!([common::file_json("f1", "one.txt"), common::file_json("f2", "two.txt")]),
        json!([common::folder_json("d1", "Sub")]),
    )
    .await;

    let files = provider.list_child_files(&id("root1")).await.unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["one.txt", "two.txt"]);

    let folders = provider.list_child_folders(&id("root1")).await.unwrap();
    assert_eq!(folders.len(), 1);
    assert!(folders[0].is_folder());
}

#[tokio::test]
async fn test_listing_follows_next_page_token() {
    let server = wiremock::MockServer::start().await;
    let client = DriveClient::with_base_url(common::TOKEN, server.uri()).with_page_size(2);
    let query = owned_query(ItemKind::File);

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("q", query.as_str()))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [common::file_json("p1a", "1a"), common::file_json("p1b", "1b")],
            "nextPageToken": "page-2"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [common::file_json("p2a", "2a")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = DriveStorageProvider::new(client);
    let owned = provider.list_owned_files().await.expect("listing failed");
    let ids: Vec<_> = owned.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["p1a", "p1b", "p2a"]);
}

#[tokio::test]
async fn test_owned_folders_query() {
    let (server, provider) = common::setup_provider().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("q", owned_query(ItemKind::Folder)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [common::folder_json("d1", "Projects")]
        })))
        .mount(&server)
        .await;

    let folders = provider.list_owned_folders().await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "Projects");
}

#[tokio::test]
async fn test_listing_error_stops_pagination() {
    let (server, provider) = common::setup_provider().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(common::error_json(
                403,
                "insufficientFilePermissions",
                "The user does not have sufficient permissions for this file.",
            )),
        )
        .mount(&server)
        .await;

    let err = provider.list_child_files(&id("locked")).await.unwrap_err();
    assert!(matches!(err, ProviderError::AccessDenied(_)));
}

#[tokio::test]
async fn test_malformed_listing_is_unknown() {
    let (server, provider) = common::setup_provider().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider.list_owned_files().await.unwrap_err();
    assert!(matches!(err, ProviderError::Unknown(msg) if msg.starts_with("Invalid response")));
}
